//! Statistics API Handlers
//!
//! The overview serves the cached dashboard snapshot when one exists;
//! rankings and the sales report always compute from a fresh ledger
//! snapshot since they back interactive admin views.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{QueryPage, QuerySpec, SortKey, Transaction, TransactionStatus};

use crate::analytics::{self, DashboardSnapshot, ProductStats, SellerStats};
use crate::core::ServerState;
use crate::ledger::TransactionFilter;
use crate::query::evaluate;
use crate::utils::{AppError, AppResponse, AppResult, ok};

fn completed_filter() -> TransactionFilter {
    TransactionFilter::any().with_status(TransactionStatus::Completed)
}

const DEFAULT_RANKING_LIMIT: usize = 10;

/// GET /api/statistics/overview - latest dashboard snapshot
///
/// Falls back to a fresh computation when the refresh task has not
/// published yet (immediately after startup).
pub async fn overview(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<DashboardSnapshot>>> {
    let snapshot = match state.dashboard.latest() {
        Some(cached) => (*cached).clone(),
        None => analytics::compute_snapshot(&state.ledger),
    };
    Ok(ok(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct RankingParams {
    pub limit: Option<usize>,
}

/// GET /api/statistics/top-sellers - settled money only
pub async fn top_sellers(
    State(state): State<ServerState>,
    Query(params): Query<RankingParams>,
) -> AppResult<Json<AppResponse<Vec<SellerStats>>>> {
    let completed = state.ledger.list(&completed_filter());
    let limit = params.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    Ok(ok(analytics::top_sellers(&completed, limit)))
}

/// GET /api/statistics/top-products - settled money only
pub async fn top_products(
    State(state): State<ServerState>,
    Query(params): Query<RankingParams>,
) -> AppResult<Json<AppResponse<Vec<ProductStats>>>> {
    let completed = state.ledger.list(&completed_filter());
    let limit = params.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    Ok(ok(analytics::top_products(&completed, limit)))
}

#[derive(Debug, Deserialize)]
pub struct SellerRowParams {
    /// Substring over seller id and display name
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/statistics/sellers - every seller's aggregate row
pub async fn sellers(
    State(state): State<ServerState>,
    Query(params): Query<SellerRowParams>,
) -> AppResult<Json<AppResponse<QueryPage<SellerStats>>>> {
    let completed = state.ledger.list(&completed_filter());
    let rows = analytics::seller_rows(&completed);

    // Rows arrive revenue-ranked; only search and pagination apply here
    let mut spec = QuerySpec::new(params.page_size.unwrap_or(state.config.page_size));
    spec.page = params.page.unwrap_or(1).max(1);
    spec.search = params.search;

    Ok(ok(evaluate(&rows, &spec)))
}

/// GET /api/statistics/sellers/{id} - one seller's aggregate
pub async fn seller_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<SellerStats>>> {
    let own: Vec<Transaction> = state
        .ledger
        .list_for_seller(&id)
        .into_iter()
        .filter(|tx| tx.status == TransactionStatus::Completed)
        .collect();
    let stats = analytics::seller_revenue(&own)
        .remove(&id)
        .ok_or_else(|| AppError::not_found(format!("Seller {}", id)))?;
    Ok(ok(stats))
}

#[derive(Debug, Deserialize)]
pub struct SalesReportParams {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /api/statistics/sales-report - completed transactions, newest first
pub async fn sales_report(
    State(state): State<ServerState>,
    Query(params): Query<SalesReportParams>,
) -> AppResult<Json<AppResponse<QueryPage<Transaction>>>> {
    let mut filter = TransactionFilter::any().with_status(TransactionStatus::Completed);
    filter.needle = params.search;
    let matched = state.ledger.list(&filter);

    let mut spec = QuerySpec::new(params.page_size.unwrap_or(state.config.page_size));
    spec.page = params.page.unwrap_or(1).max(1);
    spec.sort = Some(SortKey::Newest);

    Ok(ok(evaluate(&matched, &spec)))
}
