//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use relace_core::ProductId;

/// A catalog product.
///
/// Decodes straight from a `shop.product` row: every column maps to a type
/// sqlx handles natively.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Model name (e.g., "Air Max 90").
    pub name: String,
    /// Brand name (e.g., "Nike").
    pub brand: String,
    /// Category (e.g., "running", "basketball").
    pub category: String,
    /// Unit price in EUR.
    pub price: Decimal,
    /// Sizes offered for this model.
    pub sizes: Vec<String>,
    /// Units in stock across all sizes.
    pub stock: i32,
    /// Image URLs, first one is the cover.
    pub images: Vec<String>,
    /// When the product was added.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// True when the product is offered in the given size.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// The cover image, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
