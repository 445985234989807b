//! Broadcast bus for presentation events.

use game_core::GameEvent;
use tokio::sync::broadcast;

/// Fan-out of [`GameEvent`]s to any number of subscribers.
///
/// Publishing is best-effort: with no subscriber the event is dropped, and a
/// subscriber that falls more than `capacity` events behind sees a lag error
/// on its receiver.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: GameEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for game event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
