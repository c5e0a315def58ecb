//! Store-wide style tokens and social handles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#000000";
pub const DEFAULT_SECONDARY_COLOR: &str = "#ffffff";
pub const DEFAULT_ACCENT_COLOR: &str = "#10b981";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_BORDER_RADIUS: &str = "large";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub border_radius: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            border_radius: DEFAULT_BORDER_RADIUS.to_string(),
        }
    }
}

impl ThemeSettings {
    /// Overwrite every field the patch sets; leave the others alone.
    pub fn apply(&mut self, patch: ThemePatch) {
        let ThemePatch {
            primary_color,
            secondary_color,
            accent_color,
            font_family,
            border_radius,
        } = patch;

        if let Some(value) = primary_color {
            self.primary_color = value;
        }
        if let Some(value) = secondary_color {
            self.secondary_color = value;
        }
        if let Some(value) = accent_color {
            self.accent_color = value;
        }
        if let Some(value) = font_family {
            self.font_family = value;
        }
        if let Some(value) = border_radius {
            self.border_radius = value;
        }
    }
}

/// Partial theme update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

/// Platform name (instagram, facebook, tiktok, ...) to handle or URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialLinks(BTreeMap<String, String>);

impl SocialLinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, platform: &str) -> Option<&str> {
        self.0.get(platform).map(String::as_str)
    }

    pub fn set(&mut self, platform: impl Into<String>, handle: impl Into<String>) {
        self.0.insert(platform.into(), handle.into());
    }

    pub fn with(mut self, platform: impl Into<String>, handle: impl Into<String>) -> Self {
        self.set(platform, handle);
        self
    }

    pub fn remove(&mut self, platform: &str) -> Option<String> {
        self.0.remove(platform)
    }

    /// Shallow merge: every entry of `other` overwrites the same platform here.
    pub fn merge(&mut self, other: SocialLinks) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SocialLinks {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        SocialLinks(iter.into_iter().collect())
    }
}
