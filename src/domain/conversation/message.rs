//! Message entity for the assistant timeline.
//!
//! Messages are immutable records of user/bot exchanges. Identifiers are
//! assigned by [`MessageLog`](super::MessageLog) only, which is what keeps
//! them equal to the 1-based position in the log.

use crate::domain::foundation::{DomainError, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position-derived identifier of a message within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// Returns the raw numeric id.
    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn from_position(position: usize) -> Self {
        Self(position as u64 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The patient typing into the assistant.
    User,
    /// The assistant itself (AI replies and system notices alike).
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// An immutable message within the assistant timeline.
///
/// # Invariants
///
/// - `id` equals the message's 1-based position in its log
/// - `text` is non-empty after trimming
/// - `time` is fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
    time: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    created_at: Option<Timestamp>,
}

impl Message {
    pub(crate) fn new(
        id: MessageId,
        sender: Sender,
        text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "text",
                "Message text cannot be empty",
            ));
        }

        let created_at = Timestamp::now();
        Ok(Self {
            id,
            text,
            sender,
            time: created_at.local_clock(),
            created_at: Some(created_at),
        })
    }

    /// Returns the message ID.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the formatted local time (`HH:MM`).
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns true if the user wrote this message.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Projects the message to the shape the AI endpoint consumes.
    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn {
            text: self.text.clone(),
            sender: self.sender,
        }
    }
}

/// `{text, sender}` pair sent to the AI endpoint as conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub text: String,
    pub sender: Sender,
}

impl ConversationTurn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Creates a bot turn.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}
