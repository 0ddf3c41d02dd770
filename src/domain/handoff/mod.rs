//! Handoff domain module.
//!
//! Records passed from the assistant to the booking and calling workflows,
//! and where the presentation layer should go next.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::doctor::Doctor;
use crate::domain::foundation::{CallId, Timestamp};

/// Doctor chosen for booking, waiting for the scheduling workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSelection {
    pub doctor: Doctor,
    pub selected_at: Timestamp,
}

impl PendingSelection {
    pub fn new(doctor: Doctor) -> Self {
        Self {
            doctor,
            selected_at: Timestamp::now(),
        }
    }
}

/// Call started with a doctor, waiting for the call workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveCall {
    pub id: CallId,
    pub doctor: Doctor,
    pub start_time: Timestamp,
}

impl ActiveCall {
    /// Starts a call with a fresh id.
    pub fn start(doctor: Doctor) -> Self {
        Self {
            id: CallId::new(),
            doctor,
            start_time: Timestamp::now(),
        }
    }
}

/// Destination after a handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    ScheduleAppointment,
    Call { call_id: CallId },
}

impl Navigation {
    /// Route path of the destination.
    pub fn path(&self) -> String {
        match self {
            Navigation::ScheduleAppointment => "/schedule-appointment".to_string(),
            Navigation::Call { call_id } => format!("/call/{}", call_id),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
