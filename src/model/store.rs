//! ModelStore - abstract keyed storage for models.

use async_trait::async_trait;

use super::{Model, ModelError, Versioned};

/// Abstract keyed storage for models.
///
/// Timeouts and retries belong to implementations; callers see a single
/// result per call.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Get a model by key. Returns None if not found.
    async fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError>;

    /// Upsert a model: insert, or overwrite the record with the same key.
    async fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;
}
