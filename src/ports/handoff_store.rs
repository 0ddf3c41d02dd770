//! Handoff Store Port - Slots shared with the booking and call workflows.
//!
//! The assistant only writes. Downstream workflows take the record they
//! were handed, which empties the slot.

use async_trait::async_trait;

use crate::domain::handoff::{ActiveCall, PendingSelection};

#[async_trait]
pub trait HandoffStore: Send + Sync {
    /// Replaces the pending selection.
    async fn put_pending_selection(&self, selection: PendingSelection) -> Result<(), HandoffError>;

    /// Removes and returns the pending selection.
    async fn take_pending_selection(&self) -> Result<Option<PendingSelection>, HandoffError>;

    /// Replaces the active call.
    async fn put_active_call(&self, call: ActiveCall) -> Result<(), HandoffError>;

    /// Removes and returns the active call.
    async fn take_active_call(&self) -> Result<Option<ActiveCall>, HandoffError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HandoffError {
    #[error("handoff store unavailable: {0}")]
    Unavailable(String),
}
