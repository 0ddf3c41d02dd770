//! Channel-backed session notifier.

use tokio::sync::mpsc;

use crate::ports::{SessionEvent, SessionNotifier};

/// Forwards events into an unbounded mpsc channel.
///
/// Send failures (receiver dropped) are ignored.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end for the presentation layer.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SessionNotifier for ChannelNotifier {
    fn notify(&self, event: SessionEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Session event dropped, receiver closed");
        }
    }
}
