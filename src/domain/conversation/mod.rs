//! Conversation domain module.
//!
//! The message timeline of a session: immutable messages, the append-only
//! log that numbers them, and the fixed texts the assistant speaks.

mod log;
mod message;
pub mod replies;

pub use log::MessageLog;
pub use message::{ConversationTurn, Message, MessageId, Sender};
