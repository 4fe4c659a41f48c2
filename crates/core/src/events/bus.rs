use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::trace;

use super::types::StoreEvent;

/// Fan-out of store events to any number of listeners.
///
/// Emitting never fails: with no listener attached the event is dropped, and
/// a listener that falls more than `capacity` events behind skips ahead.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<StoreEvent>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Deliver `event` to current listeners; returns how many received it.
    pub fn emit(&self, event: StoreEvent) -> usize {
        match self.sender.send(event) {
            Ok(delivered) => delivered,
            Err(broadcast::error::SendError(event)) => {
                trace!(?event, "no listeners, event dropped");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
