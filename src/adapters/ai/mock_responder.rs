//! Mock AI Responder for testing.
//!
//! # Features
//!
//! - Queued replies, consumed in order
//! - Error injection
//! - Simulated latency (works with paused tokio time)
//! - Call recording with the instant each call arrived
//!
//! # Example
//!
//! ```ignore
//! let responder = MockAIResponder::new()
//!     .with_reply("You should see a Neurologist.")
//!     .with_error(AIError::unavailable("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::ports::{AIError, AIRequest, AIResponder};

const DEFAULT_REPLY: &str = "Mock response";

#[derive(Debug)]
enum MockReply {
    Reply(String),
    Error(AIError),
}

/// Scriptable AI responder.
#[derive(Debug, Clone, Default)]
pub struct MockAIResponder {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<(AIRequest, Instant)>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Reply(reply.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<AIRequest> {
        lock(&self.calls).iter().map(|(request, _)| request.clone()).collect()
    }

    /// Instants at which calls arrived.
    pub fn call_instants(&self) -> Vec<Instant> {
        lock(&self.calls).iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl AIResponder for MockAIResponder {
    async fn respond(&self, request: AIRequest) -> Result<String, AIError> {
        lock(&self.calls).push((request, Instant::now()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.replies).pop_front();
        match next {
            Some(MockReply::Reply(reply)) => Ok(reply),
            Some(MockReply::Error(err)) => Err(err),
            None => Ok(DEFAULT_REPLY.to_string()),
        }
    }
}
