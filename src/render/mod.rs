//! Turns a layout into display-ready nodes.
//!
//! ```text
//! Layout --(enabled blocks)--> match BlockSettings --> RenderNode
//!                                     |
//!                              ProductGrid --> CatalogSource
//! ```
//!
//! Every kind except the product grid is rendered by a pure function of its
//! settings (see `strategies`). The product grid is the only block that
//! performs I/O, and a catalog failure degrades that one node instead of
//! failing the page.

mod strategies;

use serde::Serialize;
use tracing::{debug, warn};

use crate::block::{
    Alignment, Block, BlockSettings, FeatureItem, GalleryStyle, Layout, ProductGridSettings,
    Testimonial,
};
use crate::catalog::{CatalogSource, Product, ProductQuery};
use crate::config::{EngineConfig, DEFAULT_EMPTY_STATE_MESSAGE, DEFAULT_GRID_ROWS};
use crate::store::StoreData;
use crate::theme::ThemeSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactChannel {
    /// `email`, `phone` or `whatsapp`.
    pub kind: String,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    /// `None` when the grid hides prices.
    pub price_cents: Option<u64>,
    pub image: Option<String>,
}

impl ProductCard {
    fn from_product(product: Product, show_prices: bool) -> Self {
        Self {
            image: product.images.into_iter().next(),
            price_cents: show_prices.then_some(product.price_cents),
            id: product.id,
            name: product.name,
        }
    }
}

/// One rendered section of the page, in layout order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderNode {
    Hero {
        block_id: String,
        background_image: String,
        headline: String,
        subheadline: Option<String>,
        cta: Option<Link>,
        overlay_opacity: f32,
        alignment: Alignment,
    },
    Announcement {
        block_id: String,
        text: String,
        link: Option<String>,
        background_color: String,
        text_color: String,
        dismissible: bool,
    },
    Features {
        block_id: String,
        title: String,
        items: Vec<FeatureItem>,
    },
    ProductGrid {
        block_id: String,
        title: String,
        columns: u8,
        products: Vec<ProductCard>,
        /// Set when the catalog could not be read; `products` is then empty.
        unavailable: bool,
    },
    Testimonials {
        block_id: String,
        title: String,
        items: Vec<Testimonial>,
    },
    Gallery {
        block_id: String,
        title: String,
        images: Vec<String>,
        style: GalleryStyle,
    },
    Contact {
        block_id: String,
        title: String,
        channels: Vec<ContactChannel>,
        address: Option<String>,
        show_map: bool,
    },
    Footer {
        block_id: String,
        tagline: String,
        social_links: Vec<SocialLink>,
        copyright: String,
    },
    /// Stands in for a layout with nothing to show.
    EmptyState { message: String },
}

impl RenderNode {
    /// Id of the block this node was rendered from.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            RenderNode::Hero { block_id, .. }
            | RenderNode::Announcement { block_id, .. }
            | RenderNode::Features { block_id, .. }
            | RenderNode::ProductGrid { block_id, .. }
            | RenderNode::Testimonials { block_id, .. }
            | RenderNode::Gallery { block_id, .. }
            | RenderNode::Contact { block_id, .. }
            | RenderNode::Footer { block_id, .. } => Some(block_id),
            RenderNode::EmptyState { .. } => None,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, RenderNode::EmptyState { .. })
    }
}

/// A whole page: the theme tokens plus its nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub theme: ThemeSettings,
    pub nodes: Vec<RenderNode>,
}

/// What rendering may read besides the layout.
pub struct RenderContext<'a> {
    pub merchant_id: &'a str,
    pub catalog: &'a dyn CatalogSource,
    pub grid_rows: usize,
    pub empty_state_message: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(merchant_id: &'a str, catalog: &'a dyn CatalogSource) -> Self {
        Self {
            merchant_id,
            catalog,
            grid_rows: DEFAULT_GRID_ROWS,
            empty_state_message: DEFAULT_EMPTY_STATE_MESSAGE,
        }
    }

    pub fn with_config(mut self, config: &'a EngineConfig) -> Self {
        self.grid_rows = config.grid_rows.max(1);
        self.empty_state_message = &config.empty_state_message;
        self
    }
}

/// Render every enabled block in order.
///
/// Disabled blocks produce nothing. A layout with no enabled blocks renders
/// as a single [`RenderNode::EmptyState`].
pub async fn render(layout: &Layout, ctx: &RenderContext<'_>) -> Vec<RenderNode> {
    let mut nodes = Vec::with_capacity(layout.len());
    for block in layout.enabled() {
        nodes.push(render_block(block, ctx).await);
    }

    if nodes.is_empty() {
        debug!(merchant_id = %ctx.merchant_id, "rendering empty state");
        nodes.push(RenderNode::EmptyState {
            message: ctx.empty_state_message.to_string(),
        });
    }
    nodes
}

/// Render a store's layout together with its theme.
pub async fn render_store(store: &StoreData, ctx: &RenderContext<'_>) -> RenderedPage {
    RenderedPage {
        theme: store.theme_config.clone(),
        nodes: render(&store.layout, ctx).await,
    }
}

async fn render_block(block: &Block, ctx: &RenderContext<'_>) -> RenderNode {
    let id = block.id.as_str();
    match &block.settings {
        BlockSettings::Hero(s) => strategies::hero(id, s),
        BlockSettings::Announcement(s) => strategies::announcement(id, s),
        BlockSettings::Features(s) => strategies::features(id, s),
        BlockSettings::ProductGrid(s) => product_grid(id, s, ctx).await,
        BlockSettings::Testimonials(s) => strategies::testimonials(id, s),
        BlockSettings::Gallery(s) => strategies::gallery(id, s),
        BlockSettings::Contact(s) => strategies::contact(id, s),
        BlockSettings::Footer(s) => strategies::footer(id, s),
    }
}

async fn product_grid(
    block_id: &str,
    settings: &ProductGridSettings,
    ctx: &RenderContext<'_>,
) -> RenderNode {
    let query = grid_query(settings, ctx.grid_rows);

    let (products, unavailable) = match ctx
        .catalog
        .list_active_products(ctx.merchant_id, &query)
        .await
    {
        Ok(found) => (arrange(found, &query), false),
        Err(e) => {
            warn!(
                merchant_id = %ctx.merchant_id,
                block_id = %block_id,
                error = %e,
                "catalog unavailable, rendering product grid without products"
            );
            (Vec::new(), true)
        }
    };

    RenderNode::ProductGrid {
        block_id: block_id.to_string(),
        title: settings.title.clone(),
        columns: settings.columns.max(1),
        products: products
            .into_iter()
            .map(|p| ProductCard::from_product(p, settings.show_prices))
            .collect(),
        unavailable,
    }
}

fn grid_query(settings: &ProductGridSettings, grid_rows: usize) -> ProductQuery {
    let mut ids: Vec<String> = Vec::with_capacity(settings.product_ids.len());
    for id in &settings.product_ids {
        if !id.trim().is_empty() && !ids.contains(id) {
            ids.push(id.clone());
        }
    }

    if ids.is_empty() {
        let slice = usize::from(settings.columns.max(1)).saturating_mul(grid_rows.max(1));
        ProductQuery::latest(slice)
    } else {
        ProductQuery::ids(ids)
    }
}

/// Put an explicit selection back into the order it was asked for, dropping
/// anything the catalog returned that was not asked for.
fn arrange(found: Vec<Product>, query: &ProductQuery) -> Vec<Product> {
    let Some(ids) = &query.ids else {
        return found.into_iter().take(query.limit).collect();
    };

    let mut found = found;
    ids.iter()
        .filter_map(|id| {
            let index = found.iter().position(|p| &p.id == id)?;
            Some(found.swap_remove(index))
        })
        .collect()
}
