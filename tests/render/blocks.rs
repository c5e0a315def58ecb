//! Layout-level rendering: ordering, exclusion and the empty state.

use serde_json::json;
use storefront_engine::{
    render, render_store, BlockKind, EngineConfig, InMemoryCatalog, RenderContext, RenderNode,
    StoreData,
};

use crate::support::{catalog_of, every_kind, DownCatalog, MERCHANT};

#[tokio::test]
async fn fresh_blocks_of_every_kind_render_in_order() {
    let layout = every_kind();
    let catalog = catalog_of(3);
    let ctx = RenderContext::new(MERCHANT, &catalog);

    let nodes = render(&layout, &ctx).await;

    let rendered: Vec<Option<&str>> = nodes.iter().map(RenderNode::block_id).collect();
    let expected: Vec<Option<&str>> = layout.ids().into_iter().map(Some).collect();
    assert_eq!(rendered, expected);

    for node in &nodes {
        match node {
            RenderNode::Hero { headline, cta, .. } => {
                assert!(!headline.is_empty());
                assert!(cta.is_some());
            }
            RenderNode::Features { items, .. } => assert!(!items.is_empty()),
            RenderNode::Testimonials { items, .. } => assert!(!items.is_empty()),
            RenderNode::Gallery { images, .. } => assert!(!images.is_empty()),
            RenderNode::Contact { channels, .. } => assert!(!channels.is_empty()),
            RenderNode::ProductGrid { products, .. } => assert_eq!(products.len(), 3),
            RenderNode::Announcement { text, .. } => assert!(!text.is_empty()),
            RenderNode::Footer { copyright, .. } => assert!(!copyright.is_empty()),
            RenderNode::EmptyState { .. } => panic!("unexpected empty state"),
        }
    }
}

#[tokio::test]
async fn disabled_blocks_never_render() {
    let catalog = catalog_of(3);
    let ctx = RenderContext::new(MERCHANT, &catalog);

    for kind in BlockKind::ALL {
        let mut layout = every_kind();
        let hidden = layout
            .iter()
            .find(|block| block.kind() == kind)
            .map(|block| block.id.clone())
            .unwrap();
        layout.get_mut(&hidden).unwrap().enabled = false;

        let nodes = render(&layout, &ctx).await;
        assert_eq!(nodes.len(), BlockKind::ALL.len() - 1, "{}", kind);
        assert!(nodes.iter().all(|node| node.block_id() != Some(hidden.as_str())));
    }
}

#[tokio::test]
async fn all_disabled_renders_single_empty_state() {
    let catalog = InMemoryCatalog::new();
    let config = EngineConfig::default();
    let ctx = RenderContext::new(MERCHANT, &catalog).with_config(&config);

    let mut layout = every_kind();
    let ids: Vec<String> = layout.ids().into_iter().map(String::from).collect();
    for id in &ids {
        layout.get_mut(id).unwrap().enabled = false;
    }

    let nodes = render(&layout, &ctx).await;
    assert_eq!(
        nodes,
        vec![RenderNode::EmptyState {
            message: config.empty_state_message.clone()
        }]
    );
}

#[tokio::test]
async fn catalog_outage_only_degrades_the_grid() {
    let ctx = RenderContext::new(MERCHANT, &DownCatalog);

    let nodes = render(&every_kind(), &ctx).await;

    assert_eq!(nodes.len(), BlockKind::ALL.len());
    let grid = nodes
        .iter()
        .find(|node| matches!(node, RenderNode::ProductGrid { .. }))
        .unwrap();
    assert!(matches!(
        grid,
        RenderNode::ProductGrid { products, unavailable: true, .. } if products.is_empty()
    ));
}

#[tokio::test]
async fn store_page_carries_theme_and_tagged_nodes() {
    let store = StoreData::starter(MERCHANT);
    let catalog = catalog_of(1);
    let ctx = RenderContext::new(MERCHANT, &catalog);

    let page = render_store(&store, &ctx).await;
    assert_eq!(page.theme, store.theme_config);

    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["theme"]["accentColor"], json!(store.theme_config.accent_color));
    let kinds: Vec<&str> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["node"].as_str().unwrap())
        .collect();
    let expected: Vec<&str> = store.layout.iter().map(|block| block.kind().as_str()).collect();
    assert_eq!(kinds, expected);
}
