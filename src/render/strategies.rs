//! One pure rendering function per settings-only block kind.

use crate::block::{
    AnnouncementSettings, ContactSettings, FeaturesSettings, FooterSettings, GallerySettings,
    HeroSettings, TestimonialsSettings,
};
use crate::theme::SocialLinks;

use super::{ContactChannel, Link, RenderNode, SocialLink};

pub(super) fn hero(block_id: &str, s: &HeroSettings) -> RenderNode {
    RenderNode::Hero {
        block_id: block_id.to_string(),
        background_image: s.background_image.clone(),
        headline: s.headline.clone(),
        subheadline: non_empty(&s.subheadline),
        cta: link(&s.cta_text, &s.cta_link),
        overlay_opacity: s.overlay_opacity.clamp(0.0, 1.0),
        alignment: s.alignment,
    }
}

pub(super) fn announcement(block_id: &str, s: &AnnouncementSettings) -> RenderNode {
    RenderNode::Announcement {
        block_id: block_id.to_string(),
        text: s.text.clone(),
        link: s.link.as_deref().and_then(non_empty),
        background_color: s.background_color.clone(),
        text_color: s.text_color.clone(),
        dismissible: s.dismissible,
    }
}

pub(super) fn features(block_id: &str, s: &FeaturesSettings) -> RenderNode {
    RenderNode::Features {
        block_id: block_id.to_string(),
        title: s.title.clone(),
        items: s
            .items
            .iter()
            .filter(|item| !item.title.trim().is_empty())
            .cloned()
            .collect(),
    }
}

pub(super) fn testimonials(block_id: &str, s: &TestimonialsSettings) -> RenderNode {
    RenderNode::Testimonials {
        block_id: block_id.to_string(),
        title: s.title.clone(),
        items: s
            .items
            .iter()
            .filter(|item| !item.quote.trim().is_empty())
            .map(|item| {
                let mut item = item.clone();
                item.rating = item.rating.clamp(1, 5);
                item
            })
            .collect(),
    }
}

pub(super) fn gallery(block_id: &str, s: &GallerySettings) -> RenderNode {
    RenderNode::Gallery {
        block_id: block_id.to_string(),
        title: s.title.clone(),
        images: s
            .images
            .iter()
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .collect(),
        style: s.style,
    }
}

pub(super) fn contact(block_id: &str, s: &ContactSettings) -> RenderNode {
    let mut channels = Vec::new();
    if let Some(email) = non_empty(&s.email) {
        channels.push(ContactChannel {
            kind: "email".to_string(),
            href: format!("mailto:{}", email),
            label: email,
        });
    }
    if let Some(phone) = non_empty(&s.phone) {
        channels.push(ContactChannel {
            kind: "phone".to_string(),
            href: format!("tel:{}", digits(&phone, true)),
            label: phone,
        });
    }
    if let Some(whatsapp) = s.whatsapp.as_deref().and_then(non_empty) {
        channels.push(ContactChannel {
            kind: "whatsapp".to_string(),
            href: format!("https://wa.me/{}", digits(&whatsapp, false)),
            label: whatsapp,
        });
    }

    RenderNode::Contact {
        block_id: block_id.to_string(),
        title: s.title.clone(),
        channels,
        address: non_empty(&s.address),
        show_map: s.show_map,
    }
}

pub(super) fn footer(block_id: &str, s: &FooterSettings) -> RenderNode {
    RenderNode::Footer {
        block_id: block_id.to_string(),
        tagline: s.tagline.clone(),
        social_links: social_links(&s.social_links),
        copyright: s.copyright.clone(),
    }
}

/// Resolve handles to profile URLs; full URLs pass through unchanged.
pub(super) fn social_links(links: &SocialLinks) -> Vec<SocialLink> {
    links
        .iter()
        .filter_map(|(platform, handle)| {
            let handle = handle.trim();
            if handle.is_empty() {
                return None;
            }
            Some(SocialLink {
                platform: platform.to_string(),
                url: profile_url(platform, handle),
            })
        })
        .collect()
}

fn profile_url(platform: &str, handle: &str) -> String {
    if handle.starts_with("http://") || handle.starts_with("https://") {
        return handle.to_string();
    }
    let name = handle.trim_start_matches('@');
    match platform {
        "instagram" => format!("https://instagram.com/{}", name),
        "facebook" => format!("https://facebook.com/{}", name),
        "tiktok" => format!("https://www.tiktok.com/@{}", name),
        "twitter" | "x" => format!("https://x.com/{}", name),
        "youtube" => format!("https://youtube.com/@{}", name),
        _ => handle.to_string(),
    }
}

fn link(text: &str, href: &str) -> Option<Link> {
    let text = non_empty(text)?;
    Some(Link {
        text,
        href: non_empty(href).unwrap_or_else(|| "#".to_string()),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn digits(value: &str, keep_plus: bool) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || (keep_plus && *c == '+'))
        .collect()
}
