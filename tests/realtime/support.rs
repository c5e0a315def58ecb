//! Shared wiring: one bus, one publishing model store, many editors.

use std::sync::Arc;
use std::time::Duration;

use storefront_engine::{
    EngineConfig, InMemoryBus, InMemoryModelStore, RefreshPolicyKind, Session, StoreController,
};

pub const MERCHANT: &str = "merchant-1";

pub struct Backend {
    pub bus: InMemoryBus,
    pub models: InMemoryModelStore,
}

impl Backend {
    pub fn new() -> Self {
        let bus = InMemoryBus::new();
        let models = InMemoryModelStore::with_publisher(Arc::new(bus.clone()));
        Self { bus, models }
    }

    pub fn editor(&self, merchant_id: &str) -> StoreController<InMemoryModelStore> {
        StoreController::new(self.models.clone(), Session::for_merchant(merchant_id))
    }

    pub fn editor_with(
        &self,
        merchant_id: &str,
        config: EngineConfig,
    ) -> StoreController<InMemoryModelStore> {
        StoreController::with_config(
            self.models.clone(),
            Session::for_merchant(merchant_id),
            config,
        )
    }

    pub fn keep_dirty_editor(&self, merchant_id: &str) -> StoreController<InMemoryModelStore> {
        self.editor_with(
            merchant_id,
            EngineConfig {
                refresh_policy: RefreshPolicyKind::KeepDirty,
                ..EngineConfig::default()
            },
        )
    }
}

/// Poll `check` until it holds, yielding to spawned tasks in between.
pub async fn eventually<F>(what: &str, check: F)
where
    F: Fn() -> bool,
{
    for _ in 0..400 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {}", what);
}
