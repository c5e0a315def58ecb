//! Test doubles: a model store that can fail or pause on demand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storefront_engine::{
    InMemoryModelStore, Model, ModelError, ModelStore, ModelsExt, Session, StoreController,
    Versioned,
};
use tokio::sync::Notify;

pub const MERCHANT: &str = "merchant-1";

/// A document in the stores collection, written exactly as given. Stands in
/// for records left behind by older editors.
#[derive(Clone, Serialize, Deserialize, Model)]
#[model(collection = "stores")]
struct StoredDocument {
    #[model(id)]
    #[serde(rename = "merchantId")]
    merchant_id: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Write `fields` as the stored record of [`MERCHANT`].
pub async fn seed_record(store: &FlakyStore, fields: Value) {
    let document = StoredDocument {
        merchant_id: MERCHANT.to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
    };
    store
        .inner
        .models::<StoredDocument>()
        .save(&document)
        .await
        .unwrap();
}

/// Wraps an [`InMemoryModelStore`] with switches for failures and a gate
/// that holds the next read or write until released.
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: InMemoryModelStore,
    switches: Arc<Switches>,
}

#[derive(Default)]
struct Switches {
    fail_gets: AtomicBool,
    fail_saves: AtomicBool,
    hold_next_get: AtomicBool,
    hold_next_save: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_gets(&self, fail: bool) {
        self.switches.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.switches.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The next read completes its lookup, then waits for [`release`](Self::release).
    pub fn hold_next_get(&self) {
        self.switches.hold_next_get.store(true, Ordering::SeqCst);
    }

    /// The next write waits for [`release`](Self::release) before writing.
    pub fn hold_next_save(&self) {
        self.switches.hold_next_save.store(true, Ordering::SeqCst);
    }

    /// Resolves once a held call is waiting.
    pub async fn held(&self) {
        self.switches.entered.notified().await;
    }

    pub fn release(&self) {
        self.switches.release.notify_one();
    }

    async fn pause_if(&self, flag: &AtomicBool) {
        if flag.swap(false, Ordering::SeqCst) {
            self.switches.entered.notify_one();
            self.switches.release.notified().await;
        }
    }
}

#[async_trait]
impl ModelStore for FlakyStore {
    async fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        if self.switches.fail_gets.load(Ordering::SeqCst) {
            return Err(ModelError::Storage("connection refused".into()));
        }
        let found = self.inner.get_model(id).await;
        self.pause_if(&self.switches.hold_next_get).await;
        found
    }

    async fn save_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        self.pause_if(&self.switches.hold_next_save).await;
        if self.switches.fail_saves.load(Ordering::SeqCst) {
            return Err(ModelError::Storage("connection reset".into()));
        }
        self.inner.save_model(model).await
    }
}

pub fn controller(store: &FlakyStore) -> StoreController<FlakyStore> {
    StoreController::new(store.clone(), Session::for_merchant(MERCHANT))
}
