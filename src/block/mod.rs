//! Block Variant Catalog.
//!
//! The closed set of block kinds, the settings payload each kind carries, and
//! the ordered [`Layout`] of blocks that makes up a storefront page.
//!
//! [`BlockSettings`] is a sum type with one arm per kind, so a block's kind is
//! always read off its settings and can never disagree with them. Changing a
//! block's kind replaces its settings with that kind's defaults.

pub mod id;
mod settings;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};
use crate::hydrate;

pub use settings::{
    Alignment, AnnouncementSettings, ContactSettings, FeatureItem, FeaturesSettings,
    FooterSettings, GallerySettings, GalleryStyle, HeroSettings, ProductGridSettings,
    Testimonial, TestimonialsSettings, PLACEHOLDER_IMAGE,
};

/// Identifier of a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Hero,
    Announcement,
    Features,
    ProductGrid,
    Testimonials,
    Gallery,
    Contact,
    Footer,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Hero,
        BlockKind::Announcement,
        BlockKind::Features,
        BlockKind::ProductGrid,
        BlockKind::Testimonials,
        BlockKind::Gallery,
        BlockKind::Contact,
        BlockKind::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Announcement => "announcement",
            BlockKind::Features => "features",
            BlockKind::ProductGrid => "product_grid",
            BlockKind::Testimonials => "testimonials",
            BlockKind::Gallery => "gallery",
            BlockKind::Contact => "contact",
            BlockKind::Footer => "footer",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownBlockType(s.to_string()))
    }
}

/// Settings payload of a block; the arm determines the block's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSettings {
    Hero(HeroSettings),
    Announcement(AnnouncementSettings),
    Features(FeaturesSettings),
    ProductGrid(ProductGridSettings),
    Testimonials(TestimonialsSettings),
    Gallery(GallerySettings),
    Contact(ContactSettings),
    Footer(FooterSettings),
}

impl BlockSettings {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockSettings::Hero(_) => BlockKind::Hero,
            BlockSettings::Announcement(_) => BlockKind::Announcement,
            BlockSettings::Features(_) => BlockKind::Features,
            BlockSettings::ProductGrid(_) => BlockKind::ProductGrid,
            BlockSettings::Testimonials(_) => BlockKind::Testimonials,
            BlockSettings::Gallery(_) => BlockKind::Gallery,
            BlockSettings::Contact(_) => BlockKind::Contact,
            BlockSettings::Footer(_) => BlockKind::Footer,
        }
    }

    /// The fully populated payload a new block of `kind` starts with.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Hero => BlockSettings::Hero(HeroSettings::default()),
            BlockKind::Announcement => {
                BlockSettings::Announcement(AnnouncementSettings::default())
            }
            BlockKind::Features => BlockSettings::Features(FeaturesSettings::default()),
            BlockKind::ProductGrid => BlockSettings::ProductGrid(ProductGridSettings::default()),
            BlockKind::Testimonials => {
                BlockSettings::Testimonials(TestimonialsSettings::default())
            }
            BlockKind::Gallery => BlockSettings::Gallery(GallerySettings::default()),
            BlockKind::Contact => BlockSettings::Contact(ContactSettings::default()),
            BlockKind::Footer => BlockSettings::Footer(FooterSettings::default()),
        }
    }

    /// Parse a payload for `kind`, failing on any shape mismatch.
    pub fn from_value(kind: BlockKind, value: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            BlockKind::Hero => BlockSettings::Hero(serde_json::from_value(value)?),
            BlockKind::Announcement => BlockSettings::Announcement(serde_json::from_value(value)?),
            BlockKind::Features => BlockSettings::Features(serde_json::from_value(value)?),
            BlockKind::ProductGrid => BlockSettings::ProductGrid(serde_json::from_value(value)?),
            BlockKind::Testimonials => BlockSettings::Testimonials(serde_json::from_value(value)?),
            BlockKind::Gallery => BlockSettings::Gallery(serde_json::from_value(value)?),
            BlockKind::Contact => BlockSettings::Contact(serde_json::from_value(value)?),
            BlockKind::Footer => BlockSettings::Footer(serde_json::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            BlockSettings::Hero(s) => serde_json::to_value(s),
            BlockSettings::Announcement(s) => serde_json::to_value(s),
            BlockSettings::Features(s) => serde_json::to_value(s),
            BlockSettings::ProductGrid(s) => serde_json::to_value(s),
            BlockSettings::Testimonials(s) => serde_json::to_value(s),
            BlockSettings::Gallery(s) => serde_json::to_value(s),
            BlockSettings::Contact(s) => serde_json::to_value(s),
            BlockSettings::Footer(s) => serde_json::to_value(s),
        }
    }

    /// Shallow-merge `patch` over the current payload. Returns whether the
    /// settings changed.
    ///
    /// Every patch key must name a field of this kind, and the merged object
    /// must still parse as this kind's settings; otherwise `self` is left
    /// untouched and `InvalidSettings` is returned.
    pub fn merge(&mut self, patch: &Map<String, Value>) -> Result<bool> {
        let kind = self.kind();
        let invalid = |err: serde_json::Error| EngineError::InvalidSettings {
            kind,
            message: err.to_string(),
        };

        let mut current = match self.to_value().map_err(invalid)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Some(unknown) = patch.keys().find(|key| !current.contains_key(key.as_str())) {
            return Err(EngineError::InvalidSettings {
                kind,
                message: format!("unknown field `{}`", unknown),
            });
        }
        for (key, value) in patch {
            current.insert(key.clone(), value.clone());
        }

        let merged = BlockSettings::from_value(kind, Value::Object(current)).map_err(invalid)?;
        if merged == *self {
            return Ok(false);
        }
        *self = merged;
        Ok(true)
    }
}

/// One typed, positioned, independently toggleable unit of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredBlock", into = "StoredBlock")]
pub struct Block {
    pub id: String,
    pub enabled: bool,
    pub settings: BlockSettings,
}

impl Block {
    pub fn new(id: impl Into<String>, settings: BlockSettings) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            settings,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.settings.kind()
    }
}

/// Wire shape of a block inside a stored layout document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    settings: Value,
}

fn enabled_by_default() -> bool {
    true
}

impl TryFrom<StoredBlock> for Block {
    type Error = EngineError;

    fn try_from(stored: StoredBlock) -> Result<Self> {
        let kind: BlockKind = stored.kind.parse()?;
        Ok(Block {
            id: stored.id,
            enabled: stored.enabled,
            settings: hydrate::block_settings(kind, &stored.settings),
        })
    }
}

impl From<Block> for StoredBlock {
    fn from(block: Block) -> Self {
        StoredBlock {
            kind: block.kind().as_str().to_string(),
            settings: block.settings.to_value().unwrap_or(Value::Null),
            id: block.id,
            enabled: block.enabled,
        }
    }
}

/// Ordered sequence of blocks; order is rendering order.
///
/// Duplicate kinds are allowed; blocks are addressed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(Vec<Block>);

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|block| block.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.0.iter().find(|block| block.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.0.iter_mut().find(|block| block.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|block| block.id == id)
    }

    pub fn push(&mut self, block: Block) {
        self.0.push(block);
    }

    /// Remove the block with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Block> {
        let index = self.position(id)?;
        Some(self.0.remove(index))
    }

    /// Move the block at `from` to `to`, shifting the blocks in between.
    ///
    /// Returns `false` and leaves the layout unchanged when either index is
    /// out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.0.len() || to >= self.0.len() {
            return false;
        }
        let block = self.0.remove(from);
        self.0.insert(to, block);
        true
    }

    /// Blocks that take part in rendering.
    pub fn enabled(&self) -> impl Iterator<Item = &Block> {
        self.0.iter().filter(|block| block.enabled)
    }
}

impl From<Vec<Block>> for Layout {
    fn from(blocks: Vec<Block>) -> Self {
        Layout(blocks)
    }
}

impl FromIterator<Block> for Layout {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Layout(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
