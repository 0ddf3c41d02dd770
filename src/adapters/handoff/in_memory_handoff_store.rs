//! In-Memory Handoff Store Adapter
//!
//! Holds the pending selection and active call slots in memory. Share one
//! instance by `Arc` between the assistant and downstream workflows.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::handoff::{ActiveCall, PendingSelection};
use crate::ports::{HandoffError, HandoffStore};

/// In-memory handoff slots
#[derive(Debug, Clone, Default)]
pub struct InMemoryHandoffStore {
    pending: Arc<RwLock<Option<PendingSelection>>>,
    active_call: Arc<RwLock<Option<ActiveCall>>>,
}

impl InMemoryHandoffStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the pending selection without taking it
    pub async fn pending_selection(&self) -> Option<PendingSelection> {
        self.pending.read().await.clone()
    }

    /// Peek at the active call without taking it
    pub async fn active_call(&self) -> Option<ActiveCall> {
        self.active_call.read().await.clone()
    }
}

#[async_trait]
impl HandoffStore for InMemoryHandoffStore {
    async fn put_pending_selection(&self, selection: PendingSelection) -> Result<(), HandoffError> {
        *self.pending.write().await = Some(selection);
        Ok(())
    }

    async fn take_pending_selection(&self) -> Result<Option<PendingSelection>, HandoffError> {
        Ok(self.pending.write().await.take())
    }

    async fn put_active_call(&self, call: ActiveCall) -> Result<(), HandoffError> {
        *self.active_call.write().await = Some(call);
        Ok(())
    }

    async fn take_active_call(&self) -> Result<Option<ActiveCall>, HandoffError> {
        Ok(self.active_call.write().await.take())
    }
}
