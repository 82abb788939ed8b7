//! Catalog store
//!
//! Items and categories come from a [`CatalogProvider`] at startup and
//! are immutable for the lifetime of the process. Listing endpoints run
//! the query engine over the in-memory collection; transactions embed
//! snapshots of item fields, so a future provider swap (database,
//! upstream service) can never rewrite recorded history.

mod seed;

pub use seed::SeedCatalog;

use crate::query::Queryable;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use shared::{CatalogItem, Category, SortKey};
use std::collections::HashMap;

/// Source of catalog data
///
/// The store only ever calls `load` once at startup; providers are
/// free to hit disk or network.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> anyhow::Result<(Vec<CatalogItem>, Vec<Category>)>;
}

/// In-memory catalog loaded once at startup
pub struct CatalogStore {
    items: Vec<CatalogItem>,
    by_id: HashMap<String, usize>,
    categories: Vec<Category>,
}

impl CatalogStore {
    pub async fn load(provider: &dyn CatalogProvider) -> anyhow::Result<Self> {
        let (items, categories) = provider.load().await?;
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();

        tracing::info!(
            items = items.len(),
            categories = categories.len(),
            "Catalog loaded"
        );
        Ok(Self {
            items,
            by_id,
            categories,
        })
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Queryable for CatalogItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.seller_name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "seller" => Some(self.seller_id.clone()),
            _ => None,
        }
    }

    fn numeric(&self, key: &str) -> Option<Decimal> {
        match key {
            "price" => Some(self.price),
            "rating" => Decimal::from_f64(self.rating),
            _ => None,
        }
    }

    fn sort_value(&self, key: SortKey) -> Option<Decimal> {
        match key {
            SortKey::PriceAsc | SortKey::PriceDesc => Some(self.price),
            SortKey::RatingDesc => Decimal::from_f64(self.rating),
            SortKey::PopularityDesc => Some(Decimal::from(self.popularity)),
            SortKey::DiscountDesc => Some(self.discount_percent().unwrap_or(Decimal::ZERO)),
            SortKey::Newest => Some(Decimal::from(self.listed_at.timestamp())),
        }
    }
}
