//! Broadcaster abstraction for publishing frames
//!
//! Current implementation uses an in-memory tokio broadcast channel. Hosts
//! that ship frames elsewhere (a socket, a GUI thread) implement the same
//! trait.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::BROADCAST_CAPACITY;
use crate::protocol::Snapshot;

/// Receiver type for broadcast frames
pub type BroadcastReceiver = broadcast::Receiver<Arc<Snapshot>>;

/// Trait for publishing frames to all observers
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Subscribe to receive frames
    fn subscribe(&self) -> BroadcastReceiver;

    /// Send a frame to all subscribers
    async fn send(&self, snapshot: Snapshot);

    /// Get the number of active subscribers
    fn subscriber_count(&self) -> usize;
}

/// In-memory broadcaster using a tokio broadcast channel
pub struct InMemoryBroadcaster {
    tx: broadcast::Sender<Arc<Snapshot>>,
}

impl InMemoryBroadcaster {
    /// Create a new in-memory broadcaster
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Create with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    fn subscribe(&self) -> BroadcastReceiver {
        self.tx.subscribe()
    }

    async fn send(&self, snapshot: Snapshot) {
        // Wrap in Arc for zero-copy broadcast
        let snapshot = Arc::new(snapshot);

        // send() returns error if there are no receivers, which is fine
        if let Err(e) = self.tx.send(snapshot) {
            debug!("Broadcast send (no receivers): {}", e);
        }
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
