//! The storefront aggregate and its persisted row.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::block::Layout;
use crate::hydrate;
use crate::model::ModelError;
use crate::template::{starter_preset, ModuleType, TemplatePreset};
use crate::theme::{SocialLinks, ThemeSettings};
use crate::Model;

/// One merchant's storefront configuration.
///
/// `id` is `None` until the store has been saved once. The owning merchant is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub id: Option<String>,
    merchant_id: String,
    pub template_id: String,
    pub module_type: ModuleType,
    pub layout: Layout,
    pub social_links: SocialLinks,
    pub theme_config: ThemeSettings,
}

impl StoreData {
    /// An unsaved store copied from `preset`.
    pub fn from_preset(merchant_id: impl Into<String>, preset: &TemplatePreset) -> Self {
        Self {
            id: None,
            merchant_id: merchant_id.into(),
            template_id: preset.id.clone(),
            module_type: preset.module_type,
            layout: preset.layout.clone(),
            social_links: preset.social_links.clone(),
            theme_config: preset.theme.clone(),
        }
    }

    /// An unsaved store copied from the first preset.
    pub fn starter(merchant_id: impl Into<String>) -> Self {
        Self::from_preset(merchant_id, starter_preset())
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Take template id, module type, layout and theme from `preset`.
    /// Social links are left as they are.
    pub fn apply_preset(&mut self, preset: &TemplatePreset) {
        self.template_id = preset.id.clone();
        self.module_type = preset.module_type;
        self.layout = preset.layout.clone();
        self.theme_config = preset.theme.clone();
    }

    /// Replace every field the patch sets.
    pub fn apply(&mut self, patch: StorePatch) {
        let StorePatch {
            template_id,
            module_type,
            layout,
            social_links,
            theme_config,
        } = patch;

        if let Some(template_id) = template_id {
            self.template_id = template_id;
        }
        if let Some(module_type) = module_type {
            self.module_type = module_type;
        }
        if let Some(layout) = layout {
            self.layout = layout;
        }
        if let Some(social_links) = social_links {
            self.social_links = social_links;
        }
        if let Some(theme_config) = theme_config {
            self.theme_config = theme_config;
        }
    }
}

/// Partial update merged into a store before saving.
///
/// The owning merchant and store id are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_type: Option<ModuleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_config: Option<ThemeSettings>,
}

impl StorePatch {
    pub fn is_empty(&self) -> bool {
        *self == StorePatch::default()
    }
}

/// Persisted row: one per merchant, keyed on `merchant_id`.
///
/// Layout, social links and theme are schemaless documents and are only
/// turned back into typed values through [`crate::hydrate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Model)]
#[model(collection = "stores")]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[model(id)]
    pub merchant_id: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub module_type: Option<String>,
    #[serde(default)]
    pub layout: Value,
    #[serde(default)]
    pub social_links: Value,
    #[serde(default)]
    pub theme_config: Value,
}

impl StoreRecord {
    pub fn from_store(store: &StoreData) -> Result<Self, ModelError> {
        let to_document =
            |value: serde_json::Result<Value>| value.map_err(|e| ModelError::Serde(e.to_string()));

        Ok(Self {
            id: store.id.clone(),
            merchant_id: store.merchant_id.clone(),
            template_id: Some(store.template_id.clone()),
            module_type: Some(store.module_type.to_string()),
            layout: to_document(serde_json::to_value(&store.layout))?,
            social_links: to_document(serde_json::to_value(&store.social_links))?,
            theme_config: to_document(serde_json::to_value(&store.theme_config))?,
        })
    }

    /// Rebuild the aggregate, recovering from any malformed document.
    pub fn into_store(self) -> StoreData {
        let module_type = match self.module_type.as_deref() {
            None => ModuleType::default(),
            Some(raw) => serde_json::from_value(Value::String(raw.to_string())).unwrap_or_else(|_| {
                warn!(merchant_id = %self.merchant_id, module_type = raw, "unknown stored module type");
                ModuleType::default()
            }),
        };

        StoreData {
            layout: hydrate::layout(&self.layout),
            social_links: hydrate::social_links(&self.social_links),
            theme_config: hydrate::theme(&self.theme_config),
            template_id: self
                .template_id
                .unwrap_or_else(|| starter_preset().id.clone()),
            module_type,
            id: self.id,
            merchant_id: self.merchant_id,
        }
    }
}
