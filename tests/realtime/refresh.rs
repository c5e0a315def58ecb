//! What an editor does with a change notification.

use storefront_engine::StorePatch;

use crate::support::{eventually, Backend, MERCHANT};

#[tokio::test]
async fn save_in_one_editor_refreshes_another() {
    let backend = Backend::new();
    let watcher = backend.editor(MERCHANT);
    watcher.fetch().await.unwrap();
    let handle = watcher.start_realtime(&backend.bus).unwrap();

    let writer = backend.editor(MERCHANT);
    writer.fetch().await.unwrap();
    writer.apply_template("service_studio").unwrap();
    let saved = writer.save(StorePatch::default()).await.unwrap();

    eventually("refresh", || handle.stats().refreshes == 1).await;
    assert_eq!(watcher.store().unwrap(), saved);
    assert!(!watcher.is_dirty());
}

#[tokio::test]
async fn last_write_wins_discards_unsaved_edits() {
    let backend = Backend::new();
    let watcher = backend.editor(MERCHANT);
    let fetched = watcher.fetch().await.unwrap();
    let handle = watcher.start_realtime(&backend.bus).unwrap();

    let hidden = fetched.layout.blocks()[0].id.clone();
    watcher.toggle_section(&hidden, false).unwrap();
    assert!(watcher.is_dirty());

    let writer = backend.editor(MERCHANT);
    writer.fetch().await.unwrap();
    let saved = writer.save(StorePatch::default()).await.unwrap();

    eventually("refresh", || handle.stats().refreshes == 1).await;
    let current = watcher.store().unwrap();
    assert_eq!(current, saved);
    assert!(current.layout.get(&hidden).unwrap().enabled);
    assert!(!watcher.is_dirty());
}

#[tokio::test]
async fn keep_dirty_policy_holds_back_refresh() {
    let backend = Backend::new();
    let watcher = backend.keep_dirty_editor(MERCHANT);
    let fetched = watcher.fetch().await.unwrap();
    let handle = watcher.start_realtime(&backend.bus).unwrap();

    let hidden = fetched.layout.blocks()[0].id.clone();
    watcher.toggle_section(&hidden, false).unwrap();

    let writer = backend.editor(MERCHANT);
    writer.fetch().await.unwrap();
    let saved = writer.save(StorePatch::default()).await.unwrap();

    eventually("skip", || handle.stats().skipped == 1).await;
    assert_eq!(handle.stats().refreshes, 0);
    assert!(watcher.is_dirty());
    assert!(watcher.has_remote_change());
    assert!(!watcher.store().unwrap().layout.get(&hidden).unwrap().enabled);

    // An explicit fetch takes the remote version.
    assert_eq!(watcher.fetch().await.unwrap(), saved);
    assert!(!watcher.has_remote_change());
}

#[tokio::test]
async fn keep_dirty_policy_refreshes_clean_editor() {
    let backend = Backend::new();
    let watcher = backend.keep_dirty_editor(MERCHANT);
    watcher.fetch().await.unwrap();
    let handle = watcher.start_realtime(&backend.bus).unwrap();

    let writer = backend.editor(MERCHANT);
    writer.fetch().await.unwrap();
    let saved = writer.save(StorePatch::default()).await.unwrap();

    eventually("refresh", || handle.stats().refreshes == 1).await;
    assert_eq!(watcher.store().unwrap(), saved);
    assert!(!watcher.has_remote_change());
}

#[tokio::test]
async fn other_merchants_changes_are_ignored() {
    let backend = Backend::new();
    let watcher = backend.editor(MERCHANT);
    watcher.fetch().await.unwrap();
    let handle = watcher.start_realtime(&backend.bus).unwrap();

    let stranger = backend.editor("merchant-2");
    stranger.fetch().await.unwrap();
    stranger.save(StorePatch::default()).await.unwrap();

    let writer = backend.editor(MERCHANT);
    writer.fetch().await.unwrap();
    writer.save(StorePatch::default()).await.unwrap();

    eventually("refresh", || handle.stats().refreshes == 1).await;
    assert_eq!(handle.stats().received, 1);
    assert_eq!(watcher.store().unwrap().merchant_id(), MERCHANT);
}

#[tokio::test]
async fn own_save_echo_leaves_editor_clean() {
    let backend = Backend::new();
    let editor = backend.editor(MERCHANT);
    editor.fetch().await.unwrap();
    let handle = editor.start_realtime(&backend.bus).unwrap();

    let saved = editor.save(StorePatch::default()).await.unwrap();

    eventually("refresh", || handle.stats().refreshes == 1).await;
    assert_eq!(editor.store().unwrap(), saved);
    assert!(!editor.is_dirty());
}
