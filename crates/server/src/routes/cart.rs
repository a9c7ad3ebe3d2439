//! Cart route handlers.
//!
//! The cart lives in the server-side session (keyed under
//! [`session_keys::CART`]) and is rehydrated wholesale on every request.
//! The reducer itself is pure ([`relace_core::cart::Cart`]); these handlers
//! only validate against the catalog, apply one operation, and persist.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use relace_core::cart::{Cart, CartLine};
use relace_core::{ProductId, round2};

use crate::db::ProductRepository;
use crate::error::{ApiError, Result};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to an empty one.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the cart to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemBody {
    pub product_id: ProductId,
    pub size: String,
    pub quantity: Option<u32>,
}

/// Set-quantity request body. A quantity of zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub product_id: ProductId,
    pub size: String,
    pub quantity: i64,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveItemBody {
    pub product_id: ProductId,
    pub size: String,
}

/// Cart response shape.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub item_count: u32,
    pub subtotal: Decimal,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            item_count: cart.item_count(),
            subtotal: round2(cart.subtotal()),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Current session cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Add a product/size line to the cart.
///
/// Validates the product against the catalog and denormalizes its name,
/// brand, price, and cover image into the line. Quantities merge when the
/// `(product, size)` key is already in the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddItemBody>,
) -> Result<Json<CartResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(body.product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {} not found", body.product_id)))?;

    if !product.offers_size(&body.size) {
        return Err(ApiError::BadRequest(format!(
            "size {} is not offered for this product",
            body.size
        )));
    }
    if product.stock <= 0 {
        return Err(ApiError::BadRequest("product is out of stock".to_string()));
    }

    let mut cart = load_cart(&session).await?;
    cart.add(CartLine {
        product_id: product.id,
        size: body.size,
        quantity: body.quantity.unwrap_or(1),
        unit_price: product.price,
        product_name: product.name.clone(),
        brand: product.brand.clone(),
        image: product.cover_image().map(ToOwned::to_owned),
    });
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Set a line's quantity; zero or negative removes it.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(body): Json<UpdateItemBody>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.set_quantity(body.product_id, &body.size, body.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveItemBody>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(body.product_id, &body.size);
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartResponse>> {
    let cart = Cart::default();
    save_cart(&session, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}
