//! Fetch and save: states, failures and hydration of stored records.

use serde_json::json;
use storefront_engine::{
    starter_preset, BlockKind, ControllerStatus, EngineError, ModelsExt, Session, StoreController,
    StorePatch, StoreRecord, ThemePatch, ThemeSettings,
};

use crate::support::{controller, seed_record, FlakyStore, MERCHANT};

#[tokio::test]
async fn new_merchant_starts_from_first_preset() {
    let store = FlakyStore::new();
    let ctl = controller(&store);

    let fetched = ctl.fetch().await.unwrap();

    assert_eq!(fetched.id, None);
    assert_eq!(fetched.merchant_id(), MERCHANT);
    assert_eq!(fetched.layout, starter_preset().layout);
    assert_eq!(fetched.theme_config, starter_preset().theme);
    assert_eq!(ctl.status(), ControllerStatus::Ready { dirty: false });
    // Nothing is written until an explicit save.
    assert!(store.inner.is_empty());
}

#[tokio::test]
async fn unauthenticated_session_is_refused() {
    let store = FlakyStore::new();
    let ctl = StoreController::new(store.clone(), Session::new());

    assert!(matches!(ctl.fetch().await, Err(EngineError::NotAuthenticated)));
    assert!(matches!(
        ctl.save(StorePatch::default()).await,
        Err(EngineError::NotAuthenticated)
    ));
    assert_eq!(ctl.status(), ControllerStatus::Uninitialized);
}

#[tokio::test]
async fn save_then_fetch_round_trips() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    ctl.fetch().await.unwrap();
    let first = ctl.save(StorePatch::default()).await.unwrap();

    // Fresh editor session over the persisted record.
    let reopened = controller(&store);
    let fetched = reopened.fetch().await.unwrap();
    assert_eq!(fetched, first);

    let before = store.inner.models::<StoreRecord>().get(MERCHANT).await.unwrap().unwrap();
    let resaved = reopened.save(StorePatch::default()).await.unwrap();
    let after = store.inner.models::<StoreRecord>().get(MERCHANT).await.unwrap().unwrap();

    assert_eq!(resaved, fetched);
    assert_eq!(after.data, before.data);
    assert_eq!(after.version, before.version + 1);
    assert_eq!(reopened.fetch().await.unwrap(), fetched);
}

#[tokio::test]
async fn upsert_keeps_one_record_per_merchant() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    ctl.fetch().await.unwrap();

    ctl.save(StorePatch::default()).await.unwrap();
    ctl.save(StorePatch {
        template_id: Some("rental_showroom".into()),
        ..StorePatch::default()
    })
    .await
    .unwrap();

    assert_eq!(store.inner.len(), 1);
}

#[tokio::test]
async fn failed_save_keeps_edits() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    ctl.fetch().await.unwrap();
    ctl.update_theme(ThemePatch {
        primary_color: Some("#222222".into()),
        ..ThemePatch::default()
    })
    .unwrap();
    let edited = ctl.store().unwrap();

    store.fail_saves(true);
    let err = ctl
        .save(StorePatch {
            template_id: Some("service_studio".into()),
            ..StorePatch::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Persistence(_)));
    assert!(err.is_retryable());
    assert_eq!(ctl.store().unwrap(), edited);
    assert!(ctl.is_dirty());
    assert!(matches!(
        ctl.status(),
        ControllerStatus::Error { retryable: true, .. }
    ));
    assert!(store.inner.is_empty());

    store.fail_saves(false);
    let saved = ctl.save(StorePatch::default()).await.unwrap();
    assert_eq!(saved.theme_config.primary_color, "#222222");
    assert_eq!(ctl.status(), ControllerStatus::Ready { dirty: false });
}

#[tokio::test]
async fn failed_fetch_reports_retryable_error() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    store.fail_gets(true);

    let err = ctl.fetch().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(ctl.store().is_none());
    assert!(matches!(
        ctl.status(),
        ControllerStatus::Error { retryable: true, .. }
    ));

    store.fail_gets(false);
    ctl.fetch().await.unwrap();
    assert_eq!(ctl.status(), ControllerStatus::Ready { dirty: false });
}

#[tokio::test]
async fn partial_stored_theme_is_merged_over_defaults() {
    let store = FlakyStore::new();
    seed_record(&store, json!({ "themeConfig": { "accentColor": "#123456" } })).await;

    let fetched = controller(&store).fetch().await.unwrap();
    assert_eq!(
        fetched.theme_config,
        ThemeSettings {
            accent_color: "#123456".into(),
            ..ThemeSettings::default()
        }
    );
}

#[tokio::test]
async fn legacy_layout_degrades_per_block() {
    let store = FlakyStore::new();
    let layout = json!([
        { "id": "a", "type": "marquee", "settings": {} },
        { "id": "b", "type": "hero", "settings": { "headline": "Hi", "overlayOpacity": "dark" } },
        { "id": "c", "type": "footer", "enabled": false },
    ]);
    seed_record(
        &store,
        json!({
            "id": "store-1",
            "templateId": "boutique",
            "moduleType": "sale",
            // Some backends return documents as encoded strings.
            "layout": layout.to_string(),
            "socialLinks": { "instagram": "@shop", "facebook": 42 },
            "themeConfig": null,
        }),
    )
    .await;

    let fetched = controller(&store).fetch().await.unwrap();

    assert_eq!(fetched.id.as_deref(), Some("store-1"));
    assert_eq!(fetched.layout.ids(), vec!["b", "c"]);
    let hero = fetched.layout.get("b").unwrap();
    assert_eq!(hero.kind(), BlockKind::Hero);
    let settings = hero.settings.to_value().unwrap();
    assert_eq!(settings["headline"], "Hi");
    assert_eq!(settings["overlayOpacity"], json!(0.4f32));
    assert!(!fetched.layout.get("c").unwrap().enabled);
    assert_eq!(fetched.social_links.get("instagram"), Some("@shop"));
    assert_eq!(fetched.social_links.get("facebook"), None);
    assert_eq!(fetched.theme_config, ThemeSettings::default());
}

#[tokio::test]
async fn edits_during_save_keep_controller_dirty() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    let fetched = ctl.fetch().await.unwrap();
    let first_block = fetched.layout.blocks()[0].id.clone();

    store.hold_next_save();
    let saving = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.save(StorePatch::default()).await }
    });
    store.held().await;
    assert_eq!(ctl.status(), ControllerStatus::Saving);

    assert!(ctl.remove_section(&first_block).unwrap());
    store.release();
    let saved = saving.await.unwrap().unwrap();

    assert!(saved.layout.get(&first_block).is_some());
    let current = ctl.store().unwrap();
    assert!(current.layout.get(&first_block).is_none());
    assert_eq!(current.id, saved.id);
    assert_eq!(ctl.status(), ControllerStatus::Ready { dirty: true });
}

#[tokio::test]
async fn stale_fetch_result_is_dropped() {
    let store = FlakyStore::new();
    let ctl = controller(&store);

    // First fetch reads "no record" and then stalls.
    store.hold_next_get();
    let slow = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.fetch().await }
    });
    store.held().await;

    // Meanwhile another editor saves, and a newer fetch sees it.
    let other = controller(&store);
    other.fetch().await.unwrap();
    let saved = other
        .save(StorePatch {
            template_id: Some("service_studio".into()),
            ..StorePatch::default()
        })
        .await
        .unwrap();
    let fresh = ctl.fetch().await.unwrap();
    assert_eq!(fresh, saved);

    store.release();
    let stale = slow.await.unwrap().unwrap();

    assert_eq!(stale, saved);
    assert_eq!(ctl.store().unwrap(), saved);
}

#[tokio::test]
async fn fetch_during_save_keeps_saving_status() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    ctl.fetch().await.unwrap();

    store.hold_next_save();
    let saving = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.save(StorePatch::default()).await }
    });
    store.held().await;

    ctl.fetch().await.unwrap();
    assert_eq!(ctl.status(), ControllerStatus::Saving);

    store.release();
    saving.await.unwrap().unwrap();
    assert!(matches!(ctl.status(), ControllerStatus::Ready { .. }));
}

#[tokio::test]
async fn save_during_fetch_keeps_loading_status() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    ctl.fetch().await.unwrap();

    store.hold_next_get();
    let loading = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.fetch().await }
    });
    store.held().await;

    ctl.save(StorePatch::default()).await.unwrap();
    assert_eq!(ctl.status(), ControllerStatus::Loading);

    store.release();
    loading.await.unwrap().unwrap();
    assert_eq!(ctl.status(), ControllerStatus::Ready { dirty: false });
}

#[tokio::test]
async fn abandoned_fetch_does_not_stick_in_loading() {
    let store = FlakyStore::new();
    let ctl = controller(&store);
    ctl.fetch().await.unwrap();

    store.hold_next_get();
    let loading = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.fetch().await }
    });
    store.held().await;
    assert_eq!(ctl.status(), ControllerStatus::Loading);

    loading.abort();
    assert!(loading.await.unwrap_err().is_cancelled());
    assert_eq!(ctl.status(), ControllerStatus::Ready { dirty: false });
}
