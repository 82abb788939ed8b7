//! Domain models

mod address;
mod catalog;
mod payment;
mod transaction;

pub use address::ShippingAddress;
pub use catalog::{CatalogItem, Category};
pub use payment::{PaymentMethod, PaymentMethodKind};
pub use transaction::{LineItem, Transaction, TransactionDraft, TransactionStatus};
