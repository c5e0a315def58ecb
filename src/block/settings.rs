//! Settings payloads, one struct per block kind.
//!
//! Every struct is `#[serde(default)]` and its `Default` impl is the payload a
//! freshly created block carries, so a stored payload that lacks a field
//! picks the field up from the defaults.

use serde::{Deserialize, Serialize};

use crate::theme::SocialLinks;

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/1600x900?text=Your+Store";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroSettings {
    pub background_image: String,
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_link: String,
    /// Overlay darkness over the background image, `0.0..=1.0`.
    pub overlay_opacity: f32,
    pub alignment: Alignment,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            background_image: PLACEHOLDER_IMAGE.to_string(),
            headline: "Welcome to our store".to_string(),
            subheadline: "Discover what we have prepared for you".to_string(),
            cta_text: "Shop now".to_string(),
            cta_link: "#products".to_string(),
            overlay_opacity: 0.4,
            alignment: Alignment::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncementSettings {
    pub text: String,
    pub link: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub dismissible: bool,
}

impl Default for AnnouncementSettings {
    fn default() -> Self {
        Self {
            text: "Free shipping on orders over $50".to_string(),
            link: None,
            background_color: "#000000".to_string(),
            text_color: "#ffffff".to_string(),
            dismissible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Default for FeatureItem {
    fn default() -> Self {
        Self {
            icon: "star".to_string(),
            title: "Feature".to_string(),
            description: "Describe what makes you different".to_string(),
        }
    }
}

impl FeatureItem {
    fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturesSettings {
    pub title: String,
    pub items: Vec<FeatureItem>,
}

impl Default for FeaturesSettings {
    fn default() -> Self {
        Self {
            title: "Why choose us".to_string(),
            items: vec![
                FeatureItem::new("truck", "Fast delivery", "Orders ship within 48 hours"),
                FeatureItem::new("shield", "Secure payment", "Your data is always protected"),
                FeatureItem::new("heart", "Made with care", "Every order is checked by hand"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductGridSettings {
    pub title: String,
    /// Explicit selection, rendered in this order. Empty means "latest
    /// active products".
    pub product_ids: Vec<String>,
    pub columns: u8,
    pub show_prices: bool,
}

impl Default for ProductGridSettings {
    fn default() -> Self {
        Self {
            title: "Featured products".to_string(),
            product_ids: Vec::new(),
            columns: 3,
            show_prices: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    /// 1 to 5.
    pub rating: u8,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            author: "Happy customer".to_string(),
            quote: "Great service, I will be back!".to_string(),
            rating: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialsSettings {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl Default for TestimonialsSettings {
    fn default() -> Self {
        Self {
            title: "What our customers say".to_string(),
            items: vec![
                Testimonial::default(),
                Testimonial {
                    author: "Returning buyer".to_string(),
                    quote: "Quality products and quick answers.".to_string(),
                    rating: 5,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GalleryStyle {
    #[default]
    Grid,
    Masonry,
    Carousel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GallerySettings {
    pub title: String,
    pub images: Vec<String>,
    pub style: GalleryStyle,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            images: vec![PLACEHOLDER_IMAGE.to_string(); 4],
            style: GalleryStyle::Grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSettings {
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub whatsapp: Option<String>,
    pub show_map: bool,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            title: "Get in touch".to_string(),
            email: "hello@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "123 Main Street".to_string(),
            whatsapp: None,
            show_map: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterSettings {
    pub tagline: String,
    pub social_links: SocialLinks,
    pub copyright: String,
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            tagline: "Thanks for visiting".to_string(),
            social_links: SocialLinks::default(),
            copyright: "All rights reserved.".to_string(),
        }
    }
}
