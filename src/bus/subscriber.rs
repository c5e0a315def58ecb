//! Topic-scoped subscriptions.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use super::publisher::{Event, PublishError};

pub const LAGGED: &str = "bus.lagged";

/// Sources that can hand out topic-scoped subscriptions.
pub trait Subscribable: Send + Sync {
    /// Subscribe to events published on `topic` from now on.
    fn subscribe(&self, topic: &str) -> Result<Subscription, PublishError>;
}

/// A live subscription to one topic.
///
/// Dropping the subscription unsubscribes.
pub struct Subscription {
    topic: String,
    receiver: broadcast::Receiver<Event>,
}

impl Subscription {
    pub fn new(topic: impl Into<String>, receiver: broadcast::Receiver<Event>) -> Self {
        Self {
            topic: topic.into(),
            receiver,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next event on this topic. `None` once the bus is closed.
    ///
    /// If the subscriber fell behind and events were dropped, a synthetic
    /// `bus.lagged` event is delivered in their place, since any of the
    /// dropped events may have been for this topic.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.topic == self.topic => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(topic = %self.topic, skipped, "subscription lagged");
                    return Some(Event::new(
                        format!("lagged-{}", skipped),
                        LAGGED,
                        self.topic.clone(),
                        Vec::new(),
                    ));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .finish()
    }
}
