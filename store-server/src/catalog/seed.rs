//! Deterministic demo catalog
//!
//! Backs the storefront until a real provider exists. Data is fixed so
//! tests and local runs always see the same listings.

use super::CatalogProvider;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{CatalogItem, Category};

/// Built-in catalog provider with fixed demo data
pub struct SeedCatalog;

#[async_trait]
impl CatalogProvider for SeedCatalog {
    async fn load(&self) -> anyhow::Result<(Vec<CatalogItem>, Vec<Category>)> {
        Ok((items(), categories()))
    }
}

fn categories() -> Vec<Category> {
    [
        ("electronics", "Electronics"),
        ("home", "Home & Kitchen"),
        ("outdoors", "Outdoors"),
        ("office", "Office"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    price: &str,
    original_price: Option<&str>,
    rating: f64,
    popularity: u32,
    seller: (&str, &str),
    category: &str,
    description: &str,
    listed: (i32, u32, u32),
) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        price: parse_price(price),
        original_price: original_price.map(parse_price),
        rating,
        popularity,
        seller_id: seller.0.to_string(),
        seller_name: seller.1.to_string(),
        category_id: Some(category.to_string()),
        description: Some(description.to_string()),
        listed_at: Utc
            .with_ymd_and_hms(listed.0, listed.1, listed.2, 12, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

fn parse_price(value: &str) -> Decimal {
    // Seed literals are compile-time constants; a typo shows up on
    // first load in every environment.
    value.parse().unwrap_or_default()
}

fn items() -> Vec<CatalogItem> {
    const VOLT: (&str, &str) = ("seller-volt", "Volt Supply");
    const NORTHWIND: (&str, &str) = ("seller-northwind", "Northwind Goods");
    const CEDAR: (&str, &str) = ("seller-cedar", "Cedar & Co");

    vec![
        item(
            "item-keyboard",
            "Mechanical Keyboard",
            "89.99",
            Some("119.99"),
            4.7,
            940,
            VOLT,
            "electronics",
            "Hot-swappable mechanical keyboard with PBT keycaps",
            (2024, 1, 12),
        ),
        item(
            "item-mouse",
            "Wireless Mouse",
            "39.99",
            None,
            4.4,
            1280,
            VOLT,
            "electronics",
            "Low-latency wireless mouse with six programmable buttons",
            (2024, 2, 3),
        ),
        item(
            "item-earbuds",
            "Noise Cancelling Earbuds",
            "129.00",
            Some("159.00"),
            4.2,
            2100,
            VOLT,
            "electronics",
            "In-ear active noise cancelling with 30 hour battery case",
            (2024, 3, 18),
        ),
        item(
            "item-charger",
            "65W USB-C Charger",
            "24.50",
            None,
            4.8,
            3300,
            VOLT,
            "electronics",
            "Compact GaN fast charger with folding plug",
            (2023, 11, 8),
        ),
        item(
            "item-frenchpress",
            "French Press",
            "28.00",
            Some("35.00"),
            4.6,
            760,
            NORTHWIND,
            "home",
            "Borosilicate glass french press, 1 litre",
            (2023, 9, 21),
        ),
        item(
            "item-kettle",
            "Gooseneck Kettle",
            "54.00",
            None,
            4.5,
            540,
            NORTHWIND,
            "home",
            "Temperature controlled gooseneck kettle for pour-over",
            (2024, 4, 2),
        ),
        item(
            "item-skillet",
            "Cast Iron Skillet",
            "42.75",
            Some("49.00"),
            4.9,
            1890,
            NORTHWIND,
            "home",
            "Pre-seasoned 12 inch cast iron skillet",
            (2023, 7, 14),
        ),
        item(
            "item-tent",
            "Two Person Tent",
            "149.00",
            Some("189.00"),
            4.3,
            410,
            CEDAR,
            "outdoors",
            "Three season backpacking tent, 1.9 kg packed",
            (2024, 5, 9),
        ),
        item(
            "item-bottle",
            "Insulated Bottle",
            "31.00",
            None,
            4.7,
            2650,
            CEDAR,
            "outdoors",
            "Vacuum insulated steel bottle, keeps cold 24 hours",
            (2024, 1, 30),
        ),
        item(
            "item-headlamp",
            "Rechargeable Headlamp",
            "21.99",
            Some("27.99"),
            4.1,
            880,
            CEDAR,
            "outdoors",
            "400 lumen USB-C rechargeable headlamp",
            (2023, 12, 5),
        ),
        item(
            "item-desk",
            "Standing Desk Converter",
            "179.00",
            None,
            4.0,
            320,
            CEDAR,
            "office",
            "Height adjustable desk riser for dual monitors",
            (2024, 2, 20),
        ),
        item(
            "item-lamp",
            "LED Desk Lamp",
            "34.99",
            Some("44.99"),
            4.5,
            1150,
            NORTHWIND,
            "office",
            "Dimmable LED desk lamp with wireless charging base",
            (2024, 3, 1),
        ),
    ]
}
