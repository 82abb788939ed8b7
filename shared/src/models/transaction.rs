//! Transaction and Line Item Models

use super::{PaymentMethod, ShippingAddress};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction lifecycle status
///
/// Transitions are forward-only:
///
/// ```text
/// pending ──> completed ──> refunded
///    └──────> failed
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    /// Whether the forward-only transition table permits `self -> next`
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Completed)
                | (TransactionStatus::Pending, TransactionStatus::Failed)
                | (TransactionStatus::Completed, TransactionStatus::Refunded)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of one purchased catalog item
///
/// Name and unit price are copied at purchase time and never track
/// later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub catalog_item_id: String,
    /// Name snapshot at time of purchase
    pub name: String,
    /// Unit price snapshot at time of purchase
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Positive quantity
    pub quantity: i32,
    pub seller_id: String,
    pub seller_name: String,
}

impl LineItem {
    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Recorded payment transaction
///
/// Created exactly once per accepted checkout attempt. After creation
/// only `status` may change, via the forward-only transition table;
/// `amount` and `items` are constant, which lets aggregation treat
/// them as stable when summing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    /// Line totals + shipping + tax at time of purchase
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Non-empty, ordered as purchased
    pub items: Vec<LineItem>,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
}

impl Transaction {
    /// Whether at least one line item belongs to the given seller
    pub fn involves_seller(&self, seller_id: &str) -> bool {
        self.items.iter().any(|item| item.seller_id == seller_id)
    }
}

/// Payload for recording a new transaction
///
/// The ledger assigns the id, timestamp, and initial `pending` status
/// at acceptance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub items: Vec<LineItem>,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
}
