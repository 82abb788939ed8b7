//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::{CatalogItem, Category, QueryPage, QuerySpec};

use crate::core::ServerState;
use crate::query::evaluate;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/catalog - first page of the full catalog
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<QueryPage<CatalogItem>>>> {
    let spec = QuerySpec::new(state.config.page_size);
    Ok(ok(evaluate(state.catalog.items(), &spec)))
}

/// POST /api/catalog/query - search, filter, sort, paginate
///
/// The body is a full query spec; the storefront sends its current UI
/// state verbatim.
pub async fn query(
    State(state): State<ServerState>,
    Json(spec): Json<QuerySpec>,
) -> AppResult<Json<AppResponse<QueryPage<CatalogItem>>>> {
    Ok(ok(evaluate(state.catalog.items(), &spec)))
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

/// GET /api/catalog/categories
pub async fn list_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<CategoryList>>> {
    Ok(ok(CategoryList {
        categories: state.catalog.categories().to_vec(),
    }))
}

/// GET /api/catalog/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<CatalogItem>>> {
    let item = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("Catalog item {}", id)))?;
    Ok(ok(item))
}
