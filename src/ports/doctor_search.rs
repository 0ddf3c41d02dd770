//! Doctor Search Port - Interface for the nearby-practitioner lookup.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::doctor::Doctor;
use crate::domain::location::Coordinates;
use crate::domain::specialty::Specialty;

/// Port for finding practitioners of a specialty near a position.
///
/// Implementations must return records with a non-empty `image`.
#[async_trait]
pub trait DoctorSearch: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<Vec<Doctor>, SearchError>;
}

/// `{specialty, location: {latitude, longitude}}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchQuery {
    pub specialty: Specialty,
    pub location: Coordinates,
}

impl SearchQuery {
    pub fn new(specialty: Specialty, location: Coordinates) -> Self {
        Self { specialty, location }
    }
}

/// Doctor search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The service answered with an `{error}` body.
    #[error("search service error: {message}")]
    Service { message: String },

    /// Non-success status without a usable error body.
    #[error("search rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("search service unavailable: {message}")]
    Unavailable { message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("search timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl SearchError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::Unavailable { .. } | SearchError::Network(_) | SearchError::Timeout { .. }
        )
    }
}
