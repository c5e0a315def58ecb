//! Change-notification bus.
//!
//! Stores publish an event after each upsert; editing sessions subscribe to
//! the topic of the record they edit and treat every delivery as "something
//! changed". Payloads are informational only.
//!
//! ```text
//! ModelStore ──publish(topic)──▶ InMemoryBus ──subscribe(topic)──▶ StoreController
//! ```

mod in_memory_bus;
mod publisher;
mod subscriber;

pub use in_memory_bus::InMemoryBus;
pub use publisher::{Event, PublishError, Publisher};
pub use subscriber::{Subscribable, Subscription, LAGGED};
