//! Promo code validation endpoint.
//!
//! Returns a verdict, not an error: an invalid or refused code is a normal
//! `200` response with `valid: false` and a human-readable reason, so the
//! storefront can show it inline without special-casing error statuses.

use axum::{Json, extract::State};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use relace_core::{PromoKind, round2};

use crate::db::PromoCodeRepository;
use crate::error::Result;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Validation request body.
#[derive(Debug, Deserialize)]
pub struct ValidateBody {
    pub code: String,
}

/// Validation verdict.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PromoKind>,
    /// Discount the code would grant on the current cart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    pub free_shipping: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidateResponse {
    fn rejected(reason: String) -> Self {
        Self {
            valid: false,
            code: None,
            kind: None,
            discount: None,
            free_shipping: false,
            reason: Some(reason),
        }
    }
}

/// Check a promo code against the current session cart.
#[instrument(skip(state, session))]
pub async fn validate(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<ValidateBody>,
) -> Result<Json<ValidateResponse>> {
    let cart = load_cart(&session).await?;
    let subtotal = round2(cart.subtotal());

    let Some(promo) = PromoCodeRepository::new(state.pool())
        .get_by_code(&body.code)
        .await?
    else {
        return Ok(Json(ValidateResponse::rejected(
            "invalid promo code".to_string(),
        )));
    };

    let terms = promo.terms();
    if let Err(rejection) = terms.validate(subtotal, Utc::now()) {
        return Ok(Json(ValidateResponse::rejected(rejection.to_string())));
    }

    Ok(Json(ValidateResponse {
        valid: true,
        code: Some(promo.code),
        kind: Some(promo.kind),
        discount: Some(terms.discount(subtotal)),
        free_shipping: terms.grants_free_shipping(),
        reason: None,
    }))
}
