//! Starting, stopping and dropping a realtime subscription.

use std::time::Duration;

use storefront_engine::{
    EngineConfig, EngineError, Event, InMemoryBus, Publisher, RealtimeStats, Session,
    StoreController, StorePatch,
};

use crate::support::{eventually, Backend, MERCHANT};

/// Gives a spawned refresh task, if one were still listening, time to act.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Another editor of the same merchant saves a different template.
async fn remote_save(backend: &Backend) {
    let writer = backend.editor(MERCHANT);
    writer.fetch().await.unwrap();
    writer
        .save(StorePatch {
            template_id: Some("service_studio".into()),
            ..StorePatch::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn stop_returns_stats_and_unsubscribes() {
    let backend = Backend::new();
    let editor = backend.editor(MERCHANT);
    editor.fetch().await.unwrap();

    let handle = editor.start_realtime(&backend.bus).unwrap();
    assert_eq!(handle.topic(), "stores:merchant-1");
    assert!(handle.is_running());

    remote_save(&backend).await;
    eventually("refresh", || handle.stats().refreshes == 1).await;

    let stats = handle.stop().await;
    assert_eq!(
        stats,
        RealtimeStats {
            received: 1,
            refreshes: 1,
            skipped: 0,
            failed: 0,
        }
    );

    // Unsaved edits now survive later remote saves.
    let first = editor.store().unwrap().layout.blocks()[0].id.clone();
    assert!(editor.remove_section(&first).unwrap());
    remote_save(&backend).await;
    settle().await;
    assert!(editor.is_dirty());
    assert!(editor.store().unwrap().layout.get(&first).is_none());
}

#[tokio::test]
async fn dropping_handle_unsubscribes() {
    let backend = Backend::new();
    let editor = backend.editor(MERCHANT);
    editor.fetch().await.unwrap();

    let handle = editor.start_realtime(&backend.bus).unwrap();
    drop(handle);

    let first = editor.store().unwrap().layout.blocks()[0].id.clone();
    assert!(editor.toggle_section(&first, false).unwrap());
    remote_save(&backend).await;
    settle().await;
    assert!(editor.is_dirty());
    assert!(!editor.store().unwrap().layout.get(&first).unwrap().enabled);
}

#[tokio::test]
async fn mount_follows_realtime_setting() {
    let backend = Backend::new();

    let (store, handle) = backend.editor(MERCHANT).mount(&backend.bus).await.unwrap();
    assert_eq!(store.merchant_id(), MERCHANT);
    assert!(handle.is_none());

    let live = backend.editor_with(
        MERCHANT,
        EngineConfig {
            realtime: true,
            ..EngineConfig::default()
        },
    );
    let (_, handle) = live.mount(&backend.bus).await.unwrap();
    let handle = handle.unwrap();

    remote_save(&backend).await;
    eventually("refresh", || handle.stats().refreshes == 1).await;
    assert_eq!(live.store().unwrap().template_id, "service_studio");
}

#[tokio::test]
async fn realtime_requires_a_merchant() {
    let backend = Backend::new();
    let anonymous = StoreController::new(backend.models.clone(), Session::new());

    let err = anonymous.start_realtime(&backend.bus).unwrap_err();
    assert!(matches!(err, EngineError::NotAuthenticated));
}

#[tokio::test]
async fn lagging_subscription_still_refreshes() {
    let backend = Backend::new();
    let bus = InMemoryBus::with_capacity(1);
    let editor = backend.editor(MERCHANT);
    editor.fetch().await.unwrap();
    let handle = editor.start_realtime(&bus).unwrap();

    // Published before the task first runs, so the oldest two are dropped.
    for i in 0..3 {
        bus.publish(Event::new(
            format!("evt-{}", i),
            "model.saved",
            "stores:merchant-1",
            Vec::new(),
        ))
        .unwrap();
    }

    eventually("refreshes", || handle.stats().refreshes == 2).await;
    assert_eq!(handle.stats().received, 2);
}
