//! Statistics API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/statistics", statistics_routes())
}

fn statistics_routes() -> Router<ServerState> {
    Router::new()
        .route("/overview", get(handler::overview))
        .route("/top-sellers", get(handler::top_sellers))
        .route("/top-products", get(handler::top_products))
        .route("/sellers", get(handler::sellers))
        .route("/sellers/{id}", get(handler::seller_by_id))
        .route("/sales-report", get(handler::sales_report))
}
