//! LocationStatus enum for the geolocation permission lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle of the device location grant within a session.
///
/// ```text
/// idle ──► requesting ──► granted
///   │           │
///   └───────────┴───────► denied
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    #[default]
    Idle,
    Requesting,
    Granted,
    Denied,
}

impl LocationStatus {
    /// Returns true while the user has not been asked yet.
    pub fn is_idle(&self) -> bool {
        matches!(self, LocationStatus::Idle)
    }

    /// Returns true once coordinates are available.
    pub fn is_granted(&self) -> bool {
        matches!(self, LocationStatus::Granted)
    }
}

impl StateMachine for LocationStatus {
    fn successors(&self) -> &'static [Self] {
        use LocationStatus::*;
        match self {
            Idle => &[Requesting, Denied],
            Requesting => &[Granted, Denied],
            Granted | Denied => &[],
        }
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocationStatus::Idle => "idle",
            LocationStatus::Requesting => "requesting",
            LocationStatus::Granted => "granted",
            LocationStatus::Denied => "denied",
        };
        write!(f, "{}", s)
    }
}
