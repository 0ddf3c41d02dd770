//! Results of session operations.

use crate::domain::conversation::MessageId;
use crate::domain::doctor::Doctor;
use crate::domain::location::LocationStatus;
use crate::domain::specialty::Specialty;

/// What a submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The user agreed to share a location; no AI call was made.
    PermissionRequested { status: LocationStatus },

    /// The AI replied.
    Replied {
        reply_id: MessageId,
        specialty: Option<Specialty>,
        /// True when a delayed doctor search was scheduled.
        search_scheduled: bool,
    },

    /// The AI call failed and the fallback message was appended.
    FallbackUsed { message_id: MessageId },
}

impl TurnOutcome {
    pub fn search_scheduled(&self) -> bool {
        matches!(self, TurnOutcome::Replied { search_scheduled: true, .. })
    }
}

/// What a doctor search did.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Results replaced the session's doctor list.
    Found { specialty: Specialty, doctors: Vec<Doctor> },

    /// No location grant; the permission flow was triggered instead.
    LocationRequired,

    /// The search service failed; a notice was emitted.
    Failed,

    /// The session closed before the search finished.
    Cancelled,
}
