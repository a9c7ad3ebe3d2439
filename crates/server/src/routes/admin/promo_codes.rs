//! Admin promo code management.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use relace_core::PromoKind;

use crate::db::PromoCodeRepository;
use crate::db::promo_codes::NewPromoCode;
use crate::error::{ApiError, Result};
use crate::middleware::RequireAdmin;
use crate::models::PromoCode;
use crate::state::AppState;

/// Promo code creation body.
#[derive(Debug, Deserialize)]
pub struct CreatePromoCodeBody {
    pub code: String,
    /// One of `percentage`, `fixed`, `free_shipping`.
    pub kind: String,
    pub value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub min_subtotal: Option<Decimal>,
}

/// All promo codes with usage counts, newest first.
#[instrument(skip(_admin, state))]
pub async fn index(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<PromoCode>>> {
    let codes = PromoCodeRepository::new(state.pool()).list().await?;
    Ok(Json(codes))
}

/// Create a promo code.
#[instrument(skip(state, admin, body))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreatePromoCodeBody>,
) -> Result<(StatusCode, Json<PromoCode>)> {
    if body.code.trim().is_empty() {
        return Err(ApiError::BadRequest("code cannot be empty".to_string()));
    }

    let kind: PromoKind = body.kind.parse().map_err(ApiError::BadRequest)?;

    if kind == PromoKind::Percentage
        && !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&body.value)
    {
        return Err(ApiError::BadRequest(
            "percentage value must be between 0 and 100".to_string(),
        ));
    }
    if body.value < Decimal::ZERO {
        return Err(ApiError::BadRequest("value cannot be negative".to_string()));
    }

    let promo = PromoCodeRepository::new(state.pool())
        .create(&NewPromoCode {
            code: body.code,
            kind,
            value: body.value,
            starts_at: body.starts_at,
            ends_at: body.ends_at,
            max_uses: body.max_uses,
            min_subtotal: body.min_subtotal,
        })
        .await?;

    tracing::info!(code = %promo.code, admin = %admin.email, "Promo code created");

    Ok((StatusCode::CREATED, Json(promo)))
}
