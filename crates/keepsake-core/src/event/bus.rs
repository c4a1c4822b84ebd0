//! Broadcast event bus for distributing `DraftEvent` to multiple subscribers.
//!
//! Built on `tokio::sync::broadcast`. Publishing with no active subscribers
//! is a no-op, so the draft layer can emit events unconditionally whether or
//! not a UI or log tail is listening.

use keepsake_types::event::DraftEvent;
use tokio::sync::broadcast;

/// Multi-consumer bus for draft lifecycle events.
///
/// Cloning the bus clones the underlying sender, so any number of producers
/// can feed the same set of subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DraftEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    ///
    /// Draft sessions emit a handful of events per edit cycle; a capacity
    /// of 64 leaves plenty of slack for a slow subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// New subscriber receiving all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DraftEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to every current subscriber. Silently dropped when
    /// nobody is listening.
    pub fn publish(&self, event: DraftEvent) {
        let _ = self.sender.send(event);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
