//! Shared types for the storefront core
//!
//! Domain models and value objects used by both the server crate and
//! any in-process consumers: catalog entities, the transaction record
//! shape, payment method types, and the query-spec value object that
//! drives every listing and admin table.

pub mod models;
pub mod query;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    CatalogItem, Category, LineItem, PaymentMethod, PaymentMethodKind, ShippingAddress,
    Transaction, TransactionDraft, TransactionStatus,
};
pub use query::{QueryPage, QuerySpec, RangeFilter, SortKey};
