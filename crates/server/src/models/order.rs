//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use relace_core::{ClientId, OrderId, OrderItemId, OrderStatus, ProductId};

/// An order (domain type).
///
/// The money invariant `total = round2(subtotal + shipping_cost - discount)`
/// is established at creation time by the checkout service and never
/// recomputed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Public order number (`ORD-XXXXXXXX`), used for tracking lookups.
    pub order_number: String,
    /// The client who placed the order.
    pub client_id: ClientId,
    /// Current lifecycle status (French wire value).
    pub status: OrderStatus,
    /// Sum of line totals in EUR.
    pub subtotal: Decimal,
    /// Shipping cost in EUR at creation time.
    pub shipping_cost: Decimal,
    /// Promo discount in EUR, never more than the subtotal.
    pub discount: Decimal,
    /// Amount charged in EUR.
    pub total: Decimal,
    /// Flat shipping address string.
    pub shipping_address: String,
    /// Destination country, as submitted at checkout.
    pub shipping_country: String,
    /// Payment method label (e.g., "card", "paypal").
    pub payment_method: String,
    /// Promo code applied at checkout, if any.
    pub promo_code: Option<String>,
    /// Whether stock has already been deducted for this order.
    pub stock_deducted: bool,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One line of an order.
///
/// Product name, brand, and image are denormalized at creation time so the
/// order reflects what was bought even if the catalog changes. Immutable
/// after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    /// Unique order item ID.
    pub id: OrderItemId,
    /// The order this line belongs to.
    pub order_id: OrderId,
    /// The product that was bought.
    pub product_id: ProductId,
    /// Product name at purchase time.
    pub product_name: String,
    /// Brand at purchase time.
    pub brand: String,
    /// Size bought.
    pub size: String,
    /// Units bought.
    pub quantity: i32,
    /// Unit price in EUR at purchase time.
    pub unit_price: Decimal,
    /// Line total in EUR (unit price times quantity).
    pub total_price: Decimal,
    /// Cover image at purchase time.
    pub image: Option<String>,
}

/// An order together with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
