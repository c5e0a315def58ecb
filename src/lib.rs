//! Storefront composition engine.
//!
//! A merchant's public storefront is an ordered [`Layout`] of typed
//! [`Block`]s plus a theme and social links, held in one [`StoreData`] per
//! merchant. [`StoreController`] loads, edits and saves it; [`render()`] turns
//! a layout into display-ready [`RenderNode`]s.
//!
//! Persistence, change notification, the product catalog and the current
//! identity are all boundaries passed in by the caller: [`ModelStore`],
//! [`Subscribable`], [`CatalogSource`] and [`Session`]. In-memory
//! implementations of each ship with the crate.

extern crate self as storefront_engine;

pub mod block;
pub mod bus;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod hydrate;
pub mod model;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod template;
pub mod theme;

pub use block::{Block, BlockKind, BlockSettings, Layout};
pub use bus::{Event, InMemoryBus, PublishError, Publisher, Subscribable, Subscription};
pub use catalog::{CatalogError, CatalogSource, InMemoryCatalog, Product, ProductQuery};
pub use config::{EngineConfig, RefreshPolicyKind, MAX_GRID_ROWS};
pub use controller::{
    ControllerStatus, KeepDirtyEdits, LastWriteWins, RealtimeHandle, RealtimeStats,
    RefreshDecision, RefreshPolicy, StoreController,
};
pub use error::{EngineError, Result};
pub use model::{
    InMemoryModelStore, Model, ModelError, ModelRepository, ModelStore, ModelsExt, Versioned,
};
pub use registry::{create_block, create_block_named, lookup_meta, BlockCategory, BlockMeta};
pub use render::{render, render_store, RenderContext, RenderNode, RenderedPage};
pub use session::Session;
pub use store::{StoreData, StorePatch, StoreRecord};
pub use telemetry::init_tracing;
pub use template::{
    apply_template, find_preset, presets, presets_for, starter_preset, ModuleType, TemplatePreset,
};
pub use theme::{SocialLinks, ThemePatch, ThemeSettings};

// Derive macro for `Model`; shares the trait's name like serde's derives do.
pub use storefront_engine_macros::Model;
