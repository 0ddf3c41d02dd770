//! Append-only message log.

use serde::Serialize;

use super::message::{ConversationTurn, Message, MessageId, Sender};
use crate::domain::foundation::DomainError;

/// Ordered, append-only sequence of messages for one session.
///
/// Nothing is ever edited or removed. Each appended message receives
/// `id = position + 1`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log opened by a single bot greeting.
    pub fn with_greeting(greeting: &str) -> Result<Self, DomainError> {
        let mut log = Self::new();
        log.append(Sender::Bot, greeting)?;
        Ok(log)
    }

    /// Appends a message and returns it.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is blank; the log is left untouched
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> Result<&Message, DomainError> {
        let id = MessageId::from_position(self.messages.len());
        let message = Message::new(id, sender, text)?;
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Appends a user message.
    pub fn append_user(&mut self, text: impl Into<String>) -> Result<&Message, DomainError> {
        self.append(Sender::User, text)
    }

    /// Appends a bot message.
    pub fn append_bot(&mut self, text: impl Into<String>) -> Result<&Message, DomainError> {
        self.append(Sender::Bot, text)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Looks a message up by id.
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        let index = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.messages.get(index)
    }

    /// Full history as `{text, sender}` pairs, in log order.
    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.messages.iter().map(Message::to_turn).collect()
    }
}
