//! Session Notifier Port - Outbound events for the presentation layer.
//!
//! Everything the user should see flows through here: appended messages,
//! location changes, search results and transient notices.

use serde::Serialize;

use crate::domain::conversation::Message;
use crate::domain::doctor::Doctor;
use crate::domain::location::LocationState;
use crate::domain::specialty::Specialty;

/// Port for publishing session events. Delivery is best effort.
pub trait SessionNotifier: Send + Sync {
    fn notify(&self, event: SessionEvent);
}

/// Something the presentation layer may want to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    MessageAppended { message: Message },
    LocationChanged { location: LocationState },
    LoadingChanged { loading: bool },
    DoctorsFound { specialty: Specialty, doctors: Vec<Doctor> },
    Notice { notice: Notice },
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient, non-log notification (a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Shown when a search is attempted without a location grant.
    pub fn location_required() -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Location Required".to_string(),
            description: "Please allow location access to find doctors near you.".to_string(),
        }
    }

    /// Shown when a doctor search fails.
    pub fn search_error() -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Search Error".to_string(),
            description: "Unable to find doctors at this time. Please try again later.".to_string(),
        }
    }
}
