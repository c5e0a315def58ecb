//! In-memory bus for testing and single-process scenarios.

use tokio::sync::broadcast;

use super::{Event, PublishError, Publisher, Subscribable, Subscription};

const DEFAULT_CAPACITY: usize = 256;

/// In-memory notification bus.
///
/// - Thread-safe (can be shared across tasks via `Clone`)
/// - Fan-out: every subscription of a topic gets every event of that topic
///
/// ## Example
///
/// ```
/// use storefront_engine::bus::{Event, InMemoryBus, Publisher, Subscribable};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let bus = InMemoryBus::new();
/// let mut subscription = bus.subscribe("stores:m-1").unwrap();
///
/// bus.publish(Event::new("evt-1", "model.saved", "stores:m-1", Vec::new())).unwrap();
///
/// let event = subscription.next().await.unwrap();
/// assert_eq!(event.event_type, "model.saved");
/// # });
/// ```
#[derive(Clone)]
pub struct InMemoryBus {
    sender: broadcast::Sender<Event>,
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` bounds how far a subscriber may fall behind before it
    /// starts missing events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }
}

impl Publisher for InMemoryBus {
    fn publish(&self, event: Event) -> Result<(), PublishError> {
        // No live subscribers is not an error.
        let _ = self.sender.send(event);
        Ok(())
    }
}

impl Subscribable for InMemoryBus {
    fn subscribe(&self, topic: &str) -> Result<Subscription, PublishError> {
        Ok(Subscription::new(topic, self.sender.subscribe()))
    }
}
