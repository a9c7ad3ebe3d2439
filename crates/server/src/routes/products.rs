//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use relace_core::ProductId;

use crate::db::ProductRepository;
use crate::db::products::ProductFilter;
use crate::error::{ApiError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub brand: Option<String>,
    pub category: Option<String>,
    /// Substring match on the product name.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Product listing with optional filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = ProductFilter {
        brand: query.brand,
        category: query.category,
        query: query.q,
        limit: query.limit,
        offset: query.offset,
    };

    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// Distinct brand names, for the storefront filter bar.
#[instrument(skip(state))]
pub async fn brands(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let brands = ProductRepository::new(state.pool()).brands().await?;
    Ok(Json(brands))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;

    Ok(Json(product))
}
