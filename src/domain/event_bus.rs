//! Broadcast channel for board updates.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every floor
//! mutation publishes a [`BoardUpdate`] through the bus, and WebSocket
//! connections subscribe to receive filtered updates.

use tokio::sync::broadcast;

use super::BoardUpdate;

/// Broadcast bus for [`BoardUpdate`]s.
///
/// When the ring buffer is full, the oldest updates are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BoardUpdate>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an update to all subscribers.
    ///
    /// Returns the number of receivers that got it. Without receivers the
    /// update is silently dropped.
    pub fn publish(&self, update: BoardUpdate) -> usize {
        self.sender.send(update).unwrap_or(0)
    }

    /// Creates a receiver for all future updates.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardUpdate> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
