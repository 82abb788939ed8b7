//! Catalog API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog", catalog_routes())
}

fn catalog_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/query", post(handler::query))
        .route("/categories", get(handler::list_categories))
        .route("/{id}", get(handler::get_by_id))
}
