//! Promo code domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use relace_core::pricing::PromoTerms;
use relace_core::{PromoCodeId, PromoKind};

/// A stored promo code.
#[derive(Debug, Clone, Serialize)]
pub struct PromoCode {
    /// Unique promo code ID.
    pub id: PromoCodeId,
    /// The code itself, stored uppercased.
    pub code: String,
    /// What the code grants.
    pub kind: PromoKind,
    /// Percentage (0-100) or fixed EUR amount, depending on `kind`.
    pub value: Decimal,
    /// Start of the validity window, if bounded.
    pub starts_at: Option<DateTime<Utc>>,
    /// End of the validity window, if bounded.
    pub ends_at: Option<DateTime<Utc>>,
    /// Usage cap, if any.
    pub max_uses: Option<i32>,
    /// Times the code has been applied at checkout.
    pub used_count: i32,
    /// Minimum cart subtotal required, if any.
    pub min_subtotal: Option<Decimal>,
    /// Deactivated codes are refused regardless of window.
    pub active: bool,
    /// When the code was created.
    pub created_at: DateTime<Utc>,
}

impl PromoCode {
    /// Project into the pure validation/discount terms.
    #[must_use]
    pub fn terms(&self) -> PromoTerms {
        PromoTerms {
            kind: self.kind,
            value: self.value,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            max_uses: self.max_uses,
            used_count: self.used_count,
            min_subtotal: self.min_subtotal,
            active: self.active,
        }
    }
}
