//! Errors returned by the assistant session.

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Why a submission was not processed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Text was empty or whitespace only.
    #[error("Validation error: message text cannot be empty")]
    EmptyInput,

    /// Another submission is still being processed.
    #[error("Another message is still being processed")]
    RequestInFlight,

    /// The session has been closed.
    #[error("Session is closed")]
    SessionClosed,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
