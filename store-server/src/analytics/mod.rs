//! Aggregation engine
//!
//! Pure functions over a ledger snapshot. Every figure in one
//! dashboard response derives from a single snapshot, so concurrent
//! writes can never mix pre- and post-write data within one
//! computation.
//!
//! Status inclusion is the caller's choice: the folds here sum every
//! transaction they are handed. Admin views that want settled money
//! only pass a `completed`-filtered slice (pending money has not
//! settled, failed money never arrived, refunded money went back).

mod refresh;

pub use refresh::{DashboardCache, DashboardSnapshot, compute_snapshot, run_dashboard_refresh};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{Transaction, TransactionStatus};
use std::collections::HashMap;

/// Revenue and volume for one seller
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellerStats {
    pub seller_id: String,
    pub seller_name: String,
    /// Sum of this seller's own line totals across the folded transactions
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub units_sold: u64,
    /// Folded transactions containing at least one of this seller's items
    pub transaction_count: u64,
}

/// Sales volume for one catalog item
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub catalog_item_id: String,
    pub name: String,
    pub units_sold: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Purchase history rollup for one customer
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub user_id: String,
    /// Name and email from the customer's most recent transaction
    pub user_name: String,
    pub user_email: String,
    /// All recorded transactions, any status
    pub transaction_count: u64,
    /// Completed spend only
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    pub last_purchase: DateTime<Utc>,
}

/// Headline dashboard figures
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub transaction_count: u64,
    pub completed_count: u64,
    pub unique_customers: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_order_value: Decimal,
}

/// Sum of transaction amounts, optionally restricted to one status.
///
/// With no status given, every transaction counts; the admin views
/// pass `Some(Completed)` explicitly.
pub fn total_revenue(transactions: &[Transaction], status: Option<TransactionStatus>) -> Decimal {
    transactions
        .iter()
        .filter(|tx| status.is_none_or(|s| tx.status == s))
        .map(|tx| tx.amount)
        .sum()
}

/// Per-seller revenue keyed by seller id.
///
/// A transaction spanning several sellers contributes to each of them,
/// but only that seller's own line totals count toward its revenue.
/// Every supplied transaction is folded; callers filter by status.
pub fn seller_revenue(transactions: &[Transaction]) -> HashMap<String, SellerStats> {
    let mut stats: HashMap<String, SellerStats> = HashMap::new();

    for tx in transactions {
        let mut sellers_in_tx: Vec<&str> = Vec::new();
        for item in &tx.items {
            let entry = stats
                .entry(item.seller_id.clone())
                .or_insert_with(|| SellerStats {
                    seller_id: item.seller_id.clone(),
                    seller_name: item.seller_name.clone(),
                    revenue: Decimal::ZERO,
                    units_sold: 0,
                    transaction_count: 0,
                });
            entry.revenue += item.line_total();
            entry.units_sold += item.quantity as u64;
            if !sellers_in_tx.contains(&item.seller_id.as_str()) {
                entry.transaction_count += 1;
                sellers_in_tx.push(&item.seller_id);
            }
        }
    }

    stats
}

/// Every seller's aggregate, ranked by revenue highest first; ties
/// break on seller id
pub fn seller_rows(transactions: &[Transaction]) -> Vec<SellerStats> {
    let mut ranked: Vec<SellerStats> = seller_revenue(transactions).into_values().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.seller_id.cmp(&b.seller_id))
    });
    ranked
}

/// The first `limit` seller rows
pub fn top_sellers(transactions: &[Transaction], limit: usize) -> Vec<SellerStats> {
    let mut ranked = seller_rows(transactions);
    ranked.truncate(limit);
    ranked
}

/// Per-item sales volume keyed by catalog item id; folds every
/// supplied transaction
pub fn product_sales(transactions: &[Transaction]) -> HashMap<String, ProductStats> {
    let mut stats: HashMap<String, ProductStats> = HashMap::new();

    for tx in transactions {
        for item in &tx.items {
            let entry = stats
                .entry(item.catalog_item_id.clone())
                .or_insert_with(|| ProductStats {
                    catalog_item_id: item.catalog_item_id.clone(),
                    name: item.name.clone(),
                    units_sold: 0,
                    revenue: Decimal::ZERO,
                });
            entry.units_sold += item.quantity as u64;
            entry.revenue += item.line_total();
        }
    }

    stats
}

/// Items ranked by units sold, highest first; ties break on item id
pub fn top_products(transactions: &[Transaction], limit: usize) -> Vec<ProductStats> {
    let mut ranked: Vec<ProductStats> = product_sales(transactions).into_values().collect();
    ranked.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| a.catalog_item_id.cmp(&b.catalog_item_id))
    });
    ranked.truncate(limit);
    ranked
}

/// Distinct customers across all recorded transactions
pub fn unique_customer_count(transactions: &[Transaction]) -> u64 {
    let mut seen: Vec<&str> = transactions.iter().map(|tx| tx.user_id.as_str()).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len() as u64
}

/// One profile per customer, ordered by most recent purchase first
pub fn customer_profiles(transactions: &[Transaction]) -> Vec<CustomerProfile> {
    let mut profiles: HashMap<&str, CustomerProfile> = HashMap::new();

    for tx in transactions {
        let entry = profiles
            .entry(tx.user_id.as_str())
            .or_insert_with(|| CustomerProfile {
                user_id: tx.user_id.clone(),
                user_name: tx.user_name.clone(),
                user_email: tx.user_email.clone(),
                transaction_count: 0,
                total_spent: Decimal::ZERO,
                last_purchase: tx.date,
            });
        entry.transaction_count += 1;
        if tx.status == TransactionStatus::Completed {
            entry.total_spent += tx.amount;
        }
        if tx.date >= entry.last_purchase {
            entry.last_purchase = tx.date;
            entry.user_name = tx.user_name.clone();
            entry.user_email = tx.user_email.clone();
        }
    }

    let mut rows: Vec<CustomerProfile> = profiles.into_values().collect();
    rows.sort_by(|a, b| {
        b.last_purchase
            .cmp(&a.last_purchase)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    rows
}

/// Profile for one customer, if they have any recorded transaction
pub fn customer_profile(transactions: &[Transaction], user_id: &str) -> Option<CustomerProfile> {
    customer_profiles(transactions)
        .into_iter()
        .find(|p| p.user_id == user_id)
}

/// Headline figures from one snapshot.
///
/// The top line sums every status; average order value is over
/// settled (completed) money only.
pub fn overview(transactions: &[Transaction]) -> Overview {
    let total_revenue = total_revenue(transactions, None);
    let completed_revenue = self::total_revenue(transactions, Some(TransactionStatus::Completed));
    let completed_count = transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Completed)
        .count() as u64;
    let average_order_value = if completed_count > 0 {
        crate::checkout::money::round_money(completed_revenue / Decimal::from(completed_count))
    } else {
        Decimal::ZERO
    };

    Overview {
        total_revenue,
        transaction_count: transactions.len() as u64,
        completed_count,
        unique_customers: unique_customer_count(transactions),
        average_order_value,
    }
}

impl crate::query::Queryable for SellerStats {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.seller_id, &self.seller_name]
    }

    fn numeric(&self, key: &str) -> Option<Decimal> {
        match key {
            "revenue" => Some(self.revenue),
            "units_sold" => Some(Decimal::from(self.units_sold)),
            _ => None,
        }
    }
}

impl crate::query::Queryable for CustomerProfile {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.user_id, &self.user_name, &self.user_email]
    }

    fn numeric(&self, key: &str) -> Option<Decimal> {
        match key {
            "total_spent" => Some(self.total_spent),
            _ => None,
        }
    }

    fn sort_value(&self, key: shared::SortKey) -> Option<Decimal> {
        match key {
            shared::SortKey::Newest => Some(Decimal::from(self.last_purchase.timestamp())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
