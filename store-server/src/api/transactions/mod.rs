//! Transaction API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/transactions", transaction_routes())
}

fn transaction_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/export", get(handler::export))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::set_status))
}
