//! Store Server - storefront transaction and analytics core
//!
//! # Architecture
//!
//! The server keeps a session-scoped in-memory state: an immutable
//! product catalog and an append-only transaction ledger. Everything a
//! dashboard shows is derived from the ledger on read; nothing derived
//! is ever persisted.
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── catalog/       # catalog provider boundary and store
//! ├── ledger/        # append-only transaction ledger
//! ├── analytics/     # revenue/ranking aggregation, dashboard refresh
//! ├── query/         # search + filter + sort + pagination engine
//! ├── checkout/      # card validation, pricing, gateway, orchestrator
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, validation helpers
//! ```

pub mod analytics;
pub mod api;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod ledger;
pub mod query;
pub mod utils;

// Re-export common types
pub use catalog::{CatalogProvider, CatalogStore, SeedCatalog};
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutRequest, CheckoutService};
pub use core::{Config, Server, ServerState};
pub use ledger::{LedgerError, TransactionFilter, TransactionLedger};
pub use query::{Queryable, evaluate};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
