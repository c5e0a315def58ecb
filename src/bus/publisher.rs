//! Core publisher types for the notification bus.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// A change notification published to the bus.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub id: String,
    /// What happened, e.g. `"model.saved"`.
    pub event_type: String,
    /// Routing key; subscribers receive only events of their topic
    pub topic: String,
    /// bitcode-encoded body; empty for synthetic events
    pub payload: Vec<u8>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        event_type: impl Into<String>,
        topic: impl Into<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            topic: topic.into(),
            payload,
        }
    }

    /// Create an event with a bitcode-serialized payload.
    pub fn encode<T: Serialize>(
        id: impl Into<String>,
        event_type: impl Into<String>,
        topic: impl Into<String>,
        payload: &T,
    ) -> Result<Self, bitcode::Error> {
        let bytes = bitcode::serialize(payload)?;
        Ok(Self::new(id, event_type, topic, bytes))
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, bitcode::Error> {
        bitcode::deserialize(&self.payload)
    }
}

/// Error type for bus operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The bus refused the event or subscription
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Trait for publishing events to a notification bus.
pub trait Publisher: Send + Sync {
    /// Publish a single event.
    fn publish(&self, event: Event) -> Result<(), PublishError>;
}
