//! Port for the conversational reply service.
//!
//! The assistant sends the latest user text together with the running
//! conversation and receives a single reply string. Adapters translate that
//! into whatever the backing service speaks (an HTTP function, scripted
//! keyword replies, a test double).
//!
//! # Example
//!
//! ```ignore
//! struct Echo;
//!
//! #[async_trait]
//! impl AIResponder for Echo {
//!     async fn respond(&self, request: AIRequest) -> Result<String, AIError> {
//!         Ok(request.message)
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{ConversationTurn, Sender};

/// Port for generating assistant replies.
#[async_trait]
pub trait AIResponder: Send + Sync {
    /// Produce a reply for the given conversation.
    async fn respond(&self, request: AIRequest) -> Result<String, AIError>;
}

/// Wire-shaped request: the new user text plus the full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AIRequest {
    /// The text the user just submitted.
    pub message: String,
    /// Every message so far, in log order, including `message`.
    pub conversation: Vec<ConversationTurn>,
}

impl AIRequest {
    pub fn new(message: impl Into<String>, conversation: Vec<ConversationTurn>) -> Self {
        Self {
            message: message.into(),
            conversation,
        }
    }

    /// Text of the most recent user turn, falling back to `message`.
    pub fn latest_user_text(&self) -> &str {
        self.conversation
            .iter()
            .rev()
            .find(|turn| turn.sender == Sender::User)
            .map(|turn| turn.text.as_str())
            .unwrap_or(&self.message)
    }
}

/// Why a reply could not be produced. The session answers every variant
/// with the fallback message; only transient ones are retried by adapters.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("service unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    /// The body was unreadable or carried no reply text.
    #[error("parse error: {0}")]
    Parse(String),

    /// The adapter itself is misconfigured.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
