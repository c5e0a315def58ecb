//! Defensive hydration of stored documents.
//!
//! Layout, theme and social links are persisted as schemaless JSON documents
//! that may predate the current shapes. Everything read back from storage goes
//! through this module: known fields are merged one by one over hard-coded
//! defaults, and whatever does not fit is dropped with a warning. Nothing here
//! fails.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::block::{
    AnnouncementSettings, Block, BlockKind, BlockSettings, ContactSettings, FeaturesSettings,
    FooterSettings, GallerySettings, HeroSettings, Layout, ProductGridSettings,
    TestimonialsSettings,
};
use crate::theme::{SocialLinks, ThemeSettings};

pub fn theme(stored: &Value) -> ThemeSettings {
    merge_over_defaults(ThemeSettings::default(), stored, "theme")
}

pub fn social_links(stored: &Value) -> SocialLinks {
    let document = unwrap_document(stored);
    let Value::Object(map) = document.as_ref() else {
        if !document.is_null() {
            warn!(shape = %shape_of(&document), "stored social links are not an object; using none");
        }
        return SocialLinks::default();
    };

    map.iter()
        .filter_map(|(platform, handle)| match handle.as_str() {
            Some(handle) => Some((platform.clone(), handle.to_string())),
            None => {
                warn!(%platform, "dropping non-string social link");
                None
            }
        })
        .collect()
}

/// Parse a stored layout, skipping blocks of unknown type or without an id.
pub fn layout(stored: &Value) -> Layout {
    let document = unwrap_document(stored);
    let Value::Array(items) = document.as_ref() else {
        if !document.is_null() {
            warn!(shape = %shape_of(&document), "stored layout is not an array; using empty layout");
        }
        return Layout::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(
            |(position, item)| match serde_json::from_value::<Block>(item.clone()) {
                Ok(block) => Some(block),
                Err(err) => {
                    warn!(position, error = %err, "skipping unreadable stored block");
                    None
                }
            },
        )
        .collect()
}

/// Settings for a stored block of `kind`, merged over that kind's defaults.
pub fn block_settings(kind: BlockKind, stored: &Value) -> BlockSettings {
    let what = kind.as_str();
    match kind {
        BlockKind::Hero => {
            BlockSettings::Hero(merge_over_defaults(HeroSettings::default(), stored, what))
        }
        BlockKind::Announcement => BlockSettings::Announcement(merge_over_defaults(
            AnnouncementSettings::default(),
            stored,
            what,
        )),
        BlockKind::Features => BlockSettings::Features(merge_over_defaults(
            FeaturesSettings::default(),
            stored,
            what,
        )),
        BlockKind::ProductGrid => BlockSettings::ProductGrid(merge_over_defaults(
            ProductGridSettings::default(),
            stored,
            what,
        )),
        BlockKind::Testimonials => BlockSettings::Testimonials(merge_over_defaults(
            TestimonialsSettings::default(),
            stored,
            what,
        )),
        BlockKind::Gallery => BlockSettings::Gallery(merge_over_defaults(
            GallerySettings::default(),
            stored,
            what,
        )),
        BlockKind::Contact => BlockSettings::Contact(merge_over_defaults(
            ContactSettings::default(),
            stored,
            what,
        )),
        BlockKind::Footer => BlockSettings::Footer(merge_over_defaults(
            FooterSettings::default(),
            stored,
            what,
        )),
    }
}

/// Overlay each field of `stored` on `defaults`, keeping only the fields
/// that still parse as `T`.
pub fn merge_over_defaults<T>(defaults: T, stored: &Value, what: &str) -> T
where
    T: Serialize + DeserializeOwned,
{
    let document = unwrap_document(stored);
    let Value::Object(fields) = document.as_ref() else {
        if !document.is_null() {
            warn!(what, shape = %shape_of(&document), "stored document is not an object; using defaults");
        }
        return defaults;
    };

    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(map)) => map,
        _ => return defaults,
    };

    for (key, value) in fields {
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value.clone());
        match serde_json::from_value::<T>(Value::Object(candidate.clone())) {
            Ok(_) => merged = candidate,
            Err(err) => warn!(what, field = %key, error = %err, "dropping malformed stored field"),
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
}

/// Some backends hand documents back double-encoded as a JSON string.
fn unwrap_document(stored: &Value) -> Cow<'_, Value> {
    if let Value::String(raw) = stored {
        if let Ok(parsed) = serde_json::from_str::<Value>(raw) {
            return Cow::Owned(parsed);
        }
    }
    Cow::Borrowed(stored)
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
