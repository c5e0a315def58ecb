//! Template Preset Table.
//!
//! Ship-time bundles of layout, theme and social links, one family per
//! business model. The first preset seeds every new store.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::{
    AnnouncementSettings, Block, BlockKind, BlockSettings, ContactSettings, FeatureItem,
    FeaturesSettings, FooterSettings, GallerySettings, GalleryStyle, HeroSettings, Layout,
    ProductGridSettings, TestimonialsSettings,
};
use crate::store::StoreData;
use crate::theme::{SocialLinks, ThemeSettings};

/// The merchant's business model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    #[default]
    Sale,
    Rental,
    Service,
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModuleType::Sale => "sale",
            ModuleType::Rental => "rental",
            ModuleType::Service => "service",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreset {
    pub id: String,
    pub name: String,
    pub module_type: ModuleType,
    pub layout: Layout,
    pub theme: ThemeSettings,
    pub social_links: SocialLinks,
}

/// All presets in table order.
pub fn presets() -> &'static [TemplatePreset] {
    static TABLE: OnceLock<Vec<TemplatePreset>> = OnceLock::new();
    TABLE.get_or_init(build_presets)
}

/// The preset new stores start from.
pub fn starter_preset() -> &'static TemplatePreset {
    &presets()[0]
}

pub fn find_preset(id: &str) -> Option<&'static TemplatePreset> {
    presets().iter().find(|preset| preset.id == id)
}

/// Presets targeting `module_type`, in table order.
pub fn presets_for(module_type: ModuleType) -> impl Iterator<Item = &'static TemplatePreset> {
    presets()
        .iter()
        .filter(move |preset| preset.module_type == module_type)
}

/// Overwrite template id, module type, layout and theme with the preset's.
///
/// Social links are merchant identity and survive a re-skin. An unknown
/// `preset_id` returns the store unchanged.
pub fn apply_template(mut store: StoreData, preset_id: &str) -> StoreData {
    match find_preset(preset_id) {
        Some(preset) => store.apply_preset(preset),
        None => debug!(preset_id, "ignoring unknown template preset"),
    }
    store
}

fn block(preset: &str, kind: BlockKind, settings: BlockSettings) -> Block {
    debug_assert_eq!(settings.kind(), kind);
    Block::new(format!("{}_{}", preset, kind), settings)
}

fn build_presets() -> Vec<TemplatePreset> {
    vec![boutique(), rental_showroom(), service_studio()]
}

fn boutique() -> TemplatePreset {
    let id = "boutique";
    let layout = Layout::from(vec![
        block(
            id,
            BlockKind::Announcement,
            BlockSettings::Announcement(AnnouncementSettings::default()),
        ),
        block(
            id,
            BlockKind::Hero,
            BlockSettings::Hero(HeroSettings {
                headline: "New collection is here".to_string(),
                subheadline: "Pieces picked for the season".to_string(),
                ..HeroSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Features,
            BlockSettings::Features(FeaturesSettings::default()),
        ),
        block(
            id,
            BlockKind::ProductGrid,
            BlockSettings::ProductGrid(ProductGridSettings {
                title: "Best sellers".to_string(),
                ..ProductGridSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Testimonials,
            BlockSettings::Testimonials(TestimonialsSettings::default()),
        ),
        block(
            id,
            BlockKind::Contact,
            BlockSettings::Contact(ContactSettings::default()),
        ),
        block(
            id,
            BlockKind::Footer,
            BlockSettings::Footer(FooterSettings::default()),
        ),
    ]);

    TemplatePreset {
        id: id.to_string(),
        name: "Boutique".to_string(),
        module_type: ModuleType::Sale,
        layout,
        theme: ThemeSettings::default(),
        social_links: SocialLinks::new().with("instagram", "@yourstore"),
    }
}

fn rental_showroom() -> TemplatePreset {
    let id = "rental_showroom";
    let layout = Layout::from(vec![
        block(
            id,
            BlockKind::Hero,
            BlockSettings::Hero(HeroSettings {
                headline: "Rent what you need, when you need it".to_string(),
                cta_text: "Browse rentals".to_string(),
                overlay_opacity: 0.5,
                ..HeroSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Features,
            BlockSettings::Features(FeaturesSettings {
                title: "How renting works".to_string(),
                items: vec![
                    FeatureItem {
                        icon: "calendar".to_string(),
                        title: "Pick your dates".to_string(),
                        description: "Daily, weekly or monthly".to_string(),
                    },
                    FeatureItem {
                        icon: "key".to_string(),
                        title: "Pick up".to_string(),
                        description: "Collect in store or get it delivered".to_string(),
                    },
                    FeatureItem {
                        icon: "refresh".to_string(),
                        title: "Return".to_string(),
                        description: "Drop it off when you are done".to_string(),
                    },
                ],
            }),
        ),
        block(
            id,
            BlockKind::ProductGrid,
            BlockSettings::ProductGrid(ProductGridSettings {
                title: "Available for rent".to_string(),
                columns: 2,
                ..ProductGridSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Gallery,
            BlockSettings::Gallery(GallerySettings {
                style: GalleryStyle::Carousel,
                ..GallerySettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Contact,
            BlockSettings::Contact(ContactSettings {
                show_map: true,
                ..ContactSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Footer,
            BlockSettings::Footer(FooterSettings::default()),
        ),
    ]);

    TemplatePreset {
        id: id.to_string(),
        name: "Rental showroom".to_string(),
        module_type: ModuleType::Rental,
        layout,
        theme: ThemeSettings {
            primary_color: "#1e293b".to_string(),
            secondary_color: "#f8fafc".to_string(),
            accent_color: "#f59e0b".to_string(),
            font_family: "Poppins".to_string(),
            border_radius: "medium".to_string(),
        },
        social_links: SocialLinks::new().with("facebook", "yourrentals"),
    }
}

fn service_studio() -> TemplatePreset {
    let id = "service_studio";
    let layout = Layout::from(vec![
        block(
            id,
            BlockKind::Hero,
            BlockSettings::Hero(HeroSettings {
                headline: "Book your next appointment".to_string(),
                cta_text: "Book now".to_string(),
                cta_link: "#contact".to_string(),
                ..HeroSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Features,
            BlockSettings::Features(FeaturesSettings {
                title: "Our services".to_string(),
                ..FeaturesSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Testimonials,
            BlockSettings::Testimonials(TestimonialsSettings::default()),
        ),
        block(
            id,
            BlockKind::Gallery,
            BlockSettings::Gallery(GallerySettings {
                title: "Our work".to_string(),
                style: GalleryStyle::Masonry,
                ..GallerySettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Contact,
            BlockSettings::Contact(ContactSettings {
                whatsapp: Some("+1 555 0100".to_string()),
                ..ContactSettings::default()
            }),
        ),
        block(
            id,
            BlockKind::Footer,
            BlockSettings::Footer(FooterSettings::default()),
        ),
    ]);

    TemplatePreset {
        id: id.to_string(),
        name: "Service studio".to_string(),
        module_type: ModuleType::Service,
        layout,
        theme: ThemeSettings {
            primary_color: "#0f172a".to_string(),
            secondary_color: "#ffffff".to_string(),
            accent_color: "#6366f1".to_string(),
            font_family: "DM Sans".to_string(),
            border_radius: "small".to_string(),
        },
        social_links: SocialLinks::new().with("instagram", "@yourstudio"),
    }
}
