//! Catalog boundary, read by the product grid block.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub merchant_id: String,
    pub name: String,
    /// Price in minor currency units.
    pub price_cents: u64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

/// What the product grid asks the catalog for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Exact selection. `None` means "any active products".
    pub ids: Option<Vec<String>>,
    pub limit: usize,
}

impl ProductQuery {
    pub fn ids(ids: Vec<String>) -> Self {
        let limit = ids.len();
        Self {
            ids: Some(ids),
            limit,
        }
    }

    pub fn latest(limit: usize) -> Self {
        Self { ids: None, limit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to a merchant's catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Active products of `merchant_id` matching `query`, at most
    /// `query.limit` of them. Order is up to the implementation.
    async fn list_active_products(
        &self,
        merchant_id: &str,
        query: &ProductQuery,
    ) -> Result<Vec<Product>, CatalogError>;
}

/// Vec-backed catalog for tests and previews. Listing order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    pub fn insert(&self, product: Product) -> Result<(), CatalogError> {
        self.products
            .write()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".into()))?
            .push(product);
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list_active_products(
        &self,
        merchant_id: &str,
        query: &ProductQuery,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self
            .products
            .read()
            .map_err(|_| CatalogError::Unavailable("lock poisoned".into()))?;

        Ok(products
            .iter()
            .filter(|p| p.merchant_id == merchant_id && p.active)
            .filter(|p| match &query.ids {
                Some(ids) => ids.contains(&p.id),
                None => true,
            })
            .take(query.limit)
            .cloned()
            .collect())
    }
}
