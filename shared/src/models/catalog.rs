//! Catalog Item and Category Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sellable catalog item
///
/// Immutable for the lifetime of a session once loaded from the
/// catalog provider. Transactions embed snapshots of these fields, so
/// a later catalog reload never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable unique identifier
    pub id: String,
    pub name: String,
    /// Unit price, minor-unit precision
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Price before markdown, if the item is discounted
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,
    /// Average review rating, 0.0 to 5.0
    pub rating: f64,
    /// Explicit popularity score supplied by the provider.
    /// Used as a sort key; never synthesized at query time.
    pub popularity: u32,
    pub seller_id: String,
    pub seller_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the item was listed (drives the "newest" sort)
    pub listed_at: chrono::DateTime<chrono::Utc>,
}

impl CatalogItem {
    /// Markdown percentage relative to the original price.
    ///
    /// Returns `None` when the item carries no markdown or the
    /// original price is not positive.
    pub fn discount_percent(&self) -> Option<Decimal> {
        let original = self.original_price?;
        if original <= Decimal::ZERO || self.price >= original {
            return None;
        }
        Some((original - self.price) / original * Decimal::ONE_HUNDRED)
    }
}

/// Catalog category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}
