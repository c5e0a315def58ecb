//! InMemoryModelStore - HashMap-backed model store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::warn;

use super::{change_topic, Model, ModelChange, ModelError, ModelStore, Versioned};
use crate::block::id::generate_id;
use crate::bus::{Event, Publisher};

pub const MODEL_SAVED: &str = "model.saved";

/// Internal stored representation of a model.
struct StoredModel {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc. When built with
/// [`InMemoryModelStore::with_publisher`], every upsert publishes a
/// `model.saved` event on the model's change topic.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<HashMap<String, StoredModel>>>,
    publisher: Option<Arc<dyn Publisher>>,
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that announces every upsert through `publisher`.
    pub fn with_publisher(publisher: Arc<dyn Publisher>) -> Self {
        Self {
            storage: Arc::default(),
            publisher: Some(publisher),
        }
    }

    /// Number of stored records across all collections.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn announce(&self, collection: &str, id: &str, version: u64) {
        let Some(publisher) = &self.publisher else {
            return;
        };

        let change = ModelChange {
            collection: collection.to_string(),
            id: id.to_string(),
            version,
        };
        let event = match Event::encode(
            generate_id("evt"),
            MODEL_SAVED,
            change_topic(collection, id),
            &change,
        ) {
            Ok(event) => event,
            Err(err) => {
                warn!(collection, id, error = %err, "failed to encode change notification");
                return;
            }
        };

        // The write already happened; a lost notification only delays refresh.
        if let Err(err) = publisher.publish(event) {
            warn!(collection, id, error = %err, "failed to publish change notification");
        }
    }
}

#[async_trait]
impl ModelStore for InMemoryModelStore {
    async fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(stored) => {
                let data: M = serde_json::from_slice(&stored.bytes)
                    .map_err(|e| ModelError::Serde(e.to_string()))?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    async fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))?;

        let new_version = {
            let mut storage = self
                .storage
                .write()
                .map_err(|_| ModelError::Storage("lock poisoned".into()))?;

            let new_version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);
            storage.insert(
                key,
                StoredModel {
                    bytes,
                    version: new_version,
                },
            );
            new_version
        };

        self.announce(M::COLLECTION, model.id(), new_version);

        Ok(Versioned {
            data: model.clone(),
            version: new_version,
        })
    }
}
