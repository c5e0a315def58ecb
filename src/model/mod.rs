//! Models - the persistence boundary.
//!
//! A model is a typed record stored whole under a single key. Stores only need
//! two operations: read by key and upsert. Upserting a model whose key already
//! exists overwrites the stored copy, so each key holds at most one record.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_engine::{InMemoryModelStore, Model, ModelsExt};
//!
//! #[derive(Serialize, Deserialize, Clone, Model)]
//! #[model(collection = "stores")]
//! struct StoreRecord {
//!     #[model(id)]
//!     merchant_id: String,
//! }
//!
//! let store = InMemoryModelStore::new();
//! store.models::<StoreRecord>().save(&record).await?;
//! let loaded = store.models::<StoreRecord>().get("merchant-1").await?;
//! ```

mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g., "stores").
    /// Maps to a table in SQL, a collection in a document store, a key prefix in KV stores.
    const COLLECTION: &'static str;

    /// The storage key of this instance; upserts conflict on it.
    fn id(&self) -> &str;
}

/// A versioned wrapper around model data.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Serialization/deserialization error.
    #[error("model serialization error: {0}")]
    Serde(String),
    /// Storage-level error (network, database, lock).
    #[error("model storage error: {0}")]
    Storage(String),
}

/// Payload of the change notification a store publishes after an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelChange {
    pub collection: String,
    pub id: String,
    pub version: u64,
}

/// Notification topic for one model instance: `"<collection>:<id>"`.
pub fn change_topic(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}

pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
