//! Admin stock adjustment.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use relace_core::ProductId;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Stock adjustment body: a signed delta (+ receives, - removes).
#[derive(Debug, Deserialize)]
pub struct AdjustStockBody {
    pub delta: i32,
}

/// Adjust a product's stock by a signed delta, clamped at zero.
#[instrument(skip(state, admin))]
pub async fn adjust(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<AdjustStockBody>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .adjust_stock(id, body.delta)
        .await?;

    tracing::info!(
        product_id = %id,
        delta = body.delta,
        stock = product.stock,
        admin = %admin.email,
        "Stock adjusted"
    );

    Ok(Json(product))
}
