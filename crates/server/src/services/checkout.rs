//! Checkout service.
//!
//! Bridges the session cart and the pure pricing pipeline to the order
//! repository: resolve the promo code, price the cart, create the order.

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;

use relace_core::ClientId;
use relace_core::cart::Cart;
use relace_core::pricing::{self, PromoRejection, Quote};

use crate::db::orders::NewOrder;
use crate::db::{OrderRepository, PromoCodeRepository, RepositoryError};
use crate::models::{OrderWithItems, PromoCode};

/// Errors from quoting or placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The submitted promo code does not exist.
    #[error("invalid promo code")]
    UnknownPromoCode,

    /// The promo code exists but was refused.
    #[error("{0}")]
    PromoRejected(#[from] PromoRejection),

    /// Database failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout form data, already deserialized by the handler.
#[derive(Debug, Clone)]
pub struct CheckoutRequest<'a> {
    pub shipping_address: &'a str,
    pub country: &'a str,
    pub payment_method: &'a str,
    pub promo_code: Option<&'a str>,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Price a cart for a destination, resolving an optional promo code.
    ///
    /// Returns the quote together with the resolved promo code (if one was
    /// submitted), so callers can reuse it without a second lookup.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart,
    /// `CheckoutError::UnknownPromoCode` for a code that does not exist, or
    /// `CheckoutError::PromoRejected` when the code's terms refuse the cart.
    pub async fn quote(
        &self,
        cart: &Cart,
        country: &str,
        promo_code: Option<&str>,
    ) -> Result<(Quote, Option<PromoCode>), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let promo = match promo_code {
            Some(code) if !code.trim().is_empty() => Some(
                PromoCodeRepository::new(self.pool)
                    .get_by_code(code)
                    .await?
                    .ok_or(CheckoutError::UnknownPromoCode)?,
            ),
            _ => None,
        };

        let terms = promo.as_ref().map(PromoCode::terms);
        let quote = pricing::quote(cart.lines(), country, terms.as_ref(), Utc::now())?;

        Ok((quote, promo))
    }

    /// Place an order for a client's cart.
    ///
    /// Prices the cart, then creates the order, its items, the promo usage
    /// increment, and the client counter update in one transaction.
    ///
    /// # Errors
    ///
    /// Same as [`Self::quote`], plus `CheckoutError::Repository` when the
    /// transaction fails.
    pub async fn place_order(
        &self,
        client_id: ClientId,
        cart: &Cart,
        request: CheckoutRequest<'_>,
    ) -> Result<OrderWithItems, CheckoutError> {
        let (quote, promo) = self.quote(cart, request.country, request.promo_code).await?;

        let order = OrderRepository::new(self.pool)
            .create(NewOrder {
                client_id,
                quote: &quote,
                lines: cart.lines(),
                shipping_address: request.shipping_address,
                shipping_country: request.country,
                payment_method: request.payment_method,
                promo_code: promo.as_ref().map(|p| p.code.as_str()),
            })
            .await?;

        tracing::info!(
            order_number = %order.order.order_number,
            total = %order.order.total,
            "Order placed"
        );

        Ok(order)
    }
}
