//! API route modules
//!
//! # Structure
//!
//! - [`catalog`] - storefront listings and categories
//! - [`checkout`] - checkout submission and cart quotes
//! - [`transactions`] - admin transaction table
//! - [`statistics`] - revenue dashboard and rankings
//! - [`customers`] - customer rows and profiles

pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod statistics;
pub mod transactions;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use crate::core::ServerState;
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Compose the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(catalog::router())
        .merge(checkout::router())
        .merge(transactions::router())
        .merge(statistics::router())
        .merge(customers::router())
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
