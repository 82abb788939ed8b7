//! Transaction API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{
    PaymentMethodKind, QueryPage, QuerySpec, SortKey, Transaction, TransactionStatus,
};

use crate::core::ServerState;
use crate::ledger::TransactionFilter;
use crate::query::evaluate;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Admin transaction table parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<TransactionStatus>,
    pub method: Option<PaymentMethodKind>,
    /// Inclusive lower bound on the transaction date
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the transaction date
    pub until: Option<DateTime<Utc>>,
    /// Substring over id, customer name, customer email
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListParams {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            status: self.status,
            from: self.from,
            until: self.until,
            method: self.method,
            needle: self.search.clone(),
        }
    }
}

/// GET /api/transactions - filtered, paginated transaction table
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<AppResponse<QueryPage<Transaction>>>> {
    let matched = state.ledger.list(&params.filter());

    let mut spec = QuerySpec::new(params.page_size.unwrap_or(state.config.page_size));
    spec.page = params.page.unwrap_or(1).max(1);
    spec.sort = params.sort;

    Ok(ok(evaluate(&matched, &spec)))
}

/// GET /api/transactions/export - the full filtered list, unpaginated
pub async fn export(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<AppResponse<Vec<Transaction>>>> {
    Ok(ok(state.ledger.list(&params.filter())))
}

/// GET /api/transactions/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Transaction>>> {
    let tx = state
        .ledger
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Transaction {}", id)))?;
    Ok(ok(tx))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: TransactionStatus,
}

/// PATCH /api/transactions/{id}/status - advance along the forward-only table
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> AppResult<Json<AppResponse<Transaction>>> {
    let tx = state.ledger.set_status(&id, update.status)?;
    Ok(ok(tx))
}
