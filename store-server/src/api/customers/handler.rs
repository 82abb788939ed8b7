//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{QueryPage, QuerySpec};

use crate::analytics::{self, CustomerProfile};
use crate::core::ServerState;
use crate::query::evaluate;
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Substring over customer id, name, email
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/customers - customer rollups, most recent purchase first
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<AppResponse<QueryPage<CustomerProfile>>>> {
    let transactions = state.ledger.snapshot();
    let rows = analytics::customer_profiles(&transactions);

    // Rows arrive pre-ranked; only search and pagination apply here
    let mut spec = QuerySpec::new(params.page_size.unwrap_or(state.config.page_size));
    spec.page = params.page.unwrap_or(1).max(1);
    spec.search = params.search;

    Ok(ok(evaluate(&rows, &spec)))
}

/// GET /api/customers/{id} - one customer's purchase rollup
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<CustomerProfile>>> {
    let transactions = state.ledger.snapshot();
    let profile = analytics::customer_profile(&transactions, &id)
        .ok_or_else(|| AppError::not_found(format!("Customer {}", id)))?;
    Ok(ok(profile))
}
