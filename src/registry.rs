//! Block Registry - per-kind metadata and the block factory.

use serde::Serialize;

use crate::block::{id, Block, BlockKind, BlockSettings};
use crate::error::Result;

/// Editor grouping for a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    Identity,
    Hero,
    Listings,
    Trust,
    Conversion,
}

/// Static, catalog-wide description of a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockMeta {
    pub kind: BlockKind,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: BlockCategory,
}

static CATALOG: [BlockMeta; 8] = [
    BlockMeta {
        kind: BlockKind::Hero,
        label: "Hero banner",
        description: "Full-width banner with headline and call to action",
        icon: "image",
        category: BlockCategory::Hero,
    },
    BlockMeta {
        kind: BlockKind::Announcement,
        label: "Announcement bar",
        description: "Thin bar for promotions and notices",
        icon: "megaphone",
        category: BlockCategory::Conversion,
    },
    BlockMeta {
        kind: BlockKind::Features,
        label: "Feature columns",
        description: "Short selling points side by side",
        icon: "columns",
        category: BlockCategory::Trust,
    },
    BlockMeta {
        kind: BlockKind::ProductGrid,
        label: "Product grid",
        description: "Products from your catalog",
        icon: "grid",
        category: BlockCategory::Listings,
    },
    BlockMeta {
        kind: BlockKind::Testimonials,
        label: "Testimonials",
        description: "Quotes from your customers",
        icon: "quote",
        category: BlockCategory::Trust,
    },
    BlockMeta {
        kind: BlockKind::Gallery,
        label: "Gallery",
        description: "A set of images",
        icon: "images",
        category: BlockCategory::Listings,
    },
    BlockMeta {
        kind: BlockKind::Contact,
        label: "Contact panel",
        description: "How customers can reach you",
        icon: "phone",
        category: BlockCategory::Conversion,
    },
    BlockMeta {
        kind: BlockKind::Footer,
        label: "Footer",
        description: "Tagline, social links and copyright",
        icon: "footer",
        category: BlockCategory::Identity,
    },
];

/// Metadata for `kind`.
pub fn lookup_meta(kind: BlockKind) -> &'static BlockMeta {
    let index = match kind {
        BlockKind::Hero => 0,
        BlockKind::Announcement => 1,
        BlockKind::Features => 2,
        BlockKind::ProductGrid => 3,
        BlockKind::Testimonials => 4,
        BlockKind::Gallery => 5,
        BlockKind::Contact => 6,
        BlockKind::Footer => 7,
    };
    &CATALOG[index]
}

/// Every entry, in catalog order.
pub fn all_meta() -> &'static [BlockMeta] {
    &CATALOG
}

/// Metadata entries in one editor category.
pub fn meta_in(category: BlockCategory) -> impl Iterator<Item = &'static BlockMeta> {
    CATALOG.iter().filter(move |meta| meta.category == category)
}

/// A new enabled block of `kind` with a fresh id and default settings.
pub fn create_block(kind: BlockKind) -> Block {
    Block::new(id::block_id(), BlockSettings::default_for(kind))
}

/// Like [`create_block`], for a kind given by its wire name.
///
/// Fails with `UnknownBlockType` for names outside the catalog.
pub fn create_block_named(kind: &str) -> Result<Block> {
    Ok(create_block(kind.parse()?))
}
