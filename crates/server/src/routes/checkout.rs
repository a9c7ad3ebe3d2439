//! Checkout route handlers: quoting and order creation.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use relace_core::cart::Cart;
use relace_core::pricing::Quote;
use relace_core::shipping;

use crate::error::{ApiError, Result};
use crate::middleware::RequireAuth;
use crate::models::OrderWithItems;
use crate::routes::cart::{load_cart, save_cart};
use crate::services::CheckoutService;
use crate::services::checkout::CheckoutRequest;
use crate::state::AppState;

/// Quote query parameters.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    /// Destination country; defaults to the home market.
    pub country: Option<String>,
    /// Optional promo code to apply.
    pub code: Option<String>,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    pub shipping_address: String,
    pub country: String,
    pub payment_method: String,
    pub promo_code: Option<String>,
}

/// Price the session cart for a destination.
#[instrument(skip(state, session))]
pub async fn quote(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<Quote>> {
    let cart = load_cart(&session).await?;
    let country = query.country.as_deref().unwrap_or(shipping::HOME_COUNTRY);

    let (quote, _) = CheckoutService::new(state.pool())
        .quote(&cart, country, query.code.as_deref())
        .await?;

    Ok(Json(quote))
}

/// Place an order for the session cart.
///
/// Returns 201 with the created order (status "En attente") and clears the
/// cart. The order, its items, the promo usage increment, and the client
/// counters are written in one transaction.
#[instrument(skip(state, session, body))]
pub async fn place_order(
    RequireAuth(client): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CheckoutBody>,
) -> Result<(StatusCode, Json<OrderWithItems>)> {
    if body.shipping_address.trim().is_empty() {
        return Err(ApiError::BadRequest("shipping address is required".to_string()));
    }
    if body.country.trim().is_empty() {
        return Err(ApiError::BadRequest("country is required".to_string()));
    }

    let cart = load_cart(&session).await?;

    let order = CheckoutService::new(state.pool())
        .place_order(
            client.id,
            &cart,
            CheckoutRequest {
                shipping_address: body.shipping_address.trim(),
                country: body.country.trim(),
                payment_method: body.payment_method.trim(),
                promo_code: body.promo_code.as_deref(),
            },
        )
        .await?;

    // The cart is spent once the order exists.
    save_cart(&session, &Cart::default()).await?;

    Ok((StatusCode::CREATED, Json(order)))
}
