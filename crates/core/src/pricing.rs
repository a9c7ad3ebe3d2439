//! Promo-code validation and checkout quote computation.
//!
//! The whole pipeline is pure: cart lines + destination country + optional
//! promo terms + a clock instant in, a [`Quote`] out. Validation failures are
//! values ([`PromoRejection`]) with human-readable reasons, never panics —
//! handlers turn them into 400 responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartLine;
use crate::shipping;
use crate::types::{PromoKind, round2};

/// The terms of a promo code, as needed for validation and discounting.
///
/// This is the pure-domain view of a stored promo code; the server's database
/// model carries the id and audit columns and projects into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoTerms {
    pub kind: PromoKind,
    /// Percentage (0-100) or fixed EUR amount, depending on `kind`.
    pub value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub min_subtotal: Option<Decimal>,
    pub active: bool,
}

/// Why a promo code was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromoRejection {
    /// The code has been deactivated.
    #[error("this promo code is no longer active")]
    Inactive,
    /// The validity window has not opened yet.
    #[error("this promo code is not valid yet")]
    NotStarted,
    /// The validity window has closed.
    #[error("this promo code has expired")]
    Expired,
    /// The usage cap has been reached.
    #[error("this promo code has reached its usage limit")]
    UsageExhausted,
    /// The cart subtotal is below the code's minimum.
    #[error("a minimum order of {min} € is required for this promo code")]
    BelowMinimum {
        /// Required minimum subtotal.
        min: Decimal,
    },
}

impl PromoTerms {
    /// Check the terms against a subtotal at a given instant.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`PromoRejection`], checked in the order:
    /// active flag, window start, window end, usage cap, minimum subtotal.
    pub fn validate(&self, subtotal: Decimal, now: DateTime<Utc>) -> Result<(), PromoRejection> {
        if !self.active {
            return Err(PromoRejection::Inactive);
        }
        if self.starts_at.is_some_and(|start| now < start) {
            return Err(PromoRejection::NotStarted);
        }
        if self.ends_at.is_some_and(|end| now > end) {
            return Err(PromoRejection::Expired);
        }
        if self.max_uses.is_some_and(|max| self.used_count >= max) {
            return Err(PromoRejection::UsageExhausted);
        }
        if let Some(min) = self.min_subtotal
            && subtotal < min
        {
            return Err(PromoRejection::BelowMinimum { min });
        }
        Ok(())
    }

    /// The discount these terms grant on a subtotal.
    ///
    /// Percentage codes take their share of the subtotal; fixed codes are
    /// capped at the subtotal so the discount can never exceed it. A
    /// free-shipping code grants no discount — it zeroes shipping instead.
    #[must_use]
    pub fn discount(&self, subtotal: Decimal) -> Decimal {
        match self.kind {
            PromoKind::Percentage => {
                round2(subtotal * self.value / Decimal::ONE_HUNDRED).min(subtotal)
            }
            PromoKind::Fixed => self.value.min(subtotal),
            PromoKind::FreeShipping => Decimal::ZERO,
        }
    }

    /// True when these terms zero the shipping cost.
    #[must_use]
    pub const fn grants_free_shipping(&self) -> bool {
        matches!(self.kind, PromoKind::FreeShipping)
    }
}

/// A priced checkout: subtotal, shipping, discount, and total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    /// Whether shipping was zeroed (threshold or promo).
    pub free_shipping: bool,
}

/// Price a cart for a destination, applying already-validated promo terms.
///
/// # Errors
///
/// Returns a [`PromoRejection`] when the promo terms fail validation against
/// this cart's subtotal at `now`.
pub fn quote(
    lines: &[CartLine],
    country: &str,
    promo: Option<&PromoTerms>,
    now: DateTime<Utc>,
) -> Result<Quote, PromoRejection> {
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
    let subtotal = round2(subtotal);

    if let Some(terms) = promo {
        terms.validate(subtotal, now)?;
    }

    let promo_free_shipping = promo.is_some_and(PromoTerms::grants_free_shipping);
    let shipping_cost = if promo_free_shipping {
        Decimal::ZERO
    } else {
        shipping::shipping_cost(country, subtotal)
    };

    let discount = promo.map_or(Decimal::ZERO, |terms| terms.discount(subtotal));
    let total = round2(subtotal + shipping_cost - discount);

    Ok(Quote {
        subtotal,
        shipping_cost,
        discount,
        total,
        free_shipping: shipping_cost.is_zero() && !subtotal.is_zero(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::types::ProductId;

    fn line(price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(1),
            size: "42".to_owned(),
            quantity,
            unit_price: price,
            product_name: "Air Max 90".to_owned(),
            brand: "Nike".to_owned(),
            image: None,
        }
    }

    fn percentage(value: i64) -> PromoTerms {
        PromoTerms {
            kind: PromoKind::Percentage,
            value: Decimal::new(value, 0),
            starts_at: None,
            ends_at: None,
            max_uses: None,
            used_count: 0,
            min_subtotal: None,
            active: true,
        }
    }

    #[test]
    fn france_below_threshold_without_promo() {
        // one item, price 50, qty 2, size 42 -> subtotal 100, shipping 9.99
        let lines = vec![line(Decimal::new(50, 0), 2)];
        let q = quote(&lines, "France", None, Utc::now()).expect("no promo to reject");

        assert_eq!(q.subtotal, Decimal::new(100, 0));
        assert_eq!(q.shipping_cost, Decimal::new(999, 2));
        assert_eq!(q.discount, Decimal::ZERO);
        assert_eq!(q.total, Decimal::new(10_999, 2));
        assert!(!q.free_shipping);
    }

    #[test]
    fn france_at_threshold_ships_free() {
        // price 65, qty 2 -> subtotal 130, shipping 0, total 130.00
        let lines = vec![line(Decimal::new(65, 0), 2)];
        let q = quote(&lines, "France", None, Utc::now()).expect("no promo to reject");

        assert_eq!(q.subtotal, Decimal::new(130, 0));
        assert_eq!(q.shipping_cost, Decimal::ZERO);
        assert_eq!(q.total, Decimal::new(130, 0));
        assert!(q.free_shipping);
    }

    #[test]
    fn percentage_discount_is_a_share_of_the_subtotal() {
        let lines = vec![line(Decimal::new(50, 0), 2)];
        let q = quote(&lines, "France", Some(&percentage(10)), Utc::now()).expect("valid promo");

        assert_eq!(q.discount, Decimal::new(10, 0));
        assert_eq!(q.total, Decimal::new(9999, 2));
    }

    #[test]
    fn percentage_discount_never_exceeds_the_subtotal() {
        let lines = vec![line(Decimal::new(50, 0), 2)];
        let terms = percentage(150);
        assert_eq!(terms.discount(Decimal::new(100, 0)), Decimal::new(100, 0));
        let q = quote(&lines, "France", Some(&terms), Utc::now()).expect("valid promo");
        assert!(q.discount <= q.subtotal);
    }

    #[test]
    fn fixed_discount_is_capped_at_the_subtotal() {
        let terms = PromoTerms {
            kind: PromoKind::Fixed,
            value: Decimal::new(500, 0),
            ..percentage(0)
        };
        assert_eq!(terms.discount(Decimal::new(80, 0)), Decimal::new(80, 0));
    }

    #[test]
    fn free_shipping_code_zeroes_shipping_anywhere() {
        let terms = PromoTerms {
            kind: PromoKind::FreeShipping,
            ..percentage(0)
        };
        let lines = vec![line(Decimal::new(30, 0), 1)];
        let q = quote(&lines, "Suisse", Some(&terms), Utc::now()).expect("valid promo");

        assert_eq!(q.shipping_cost, Decimal::ZERO);
        assert_eq!(q.discount, Decimal::ZERO);
        assert_eq!(q.total, Decimal::new(30, 0));
        assert!(q.free_shipping);
    }

    #[test]
    fn expired_code_is_rejected_with_a_reason() {
        let terms = PromoTerms {
            ends_at: Some(Utc::now() - Duration::days(1)),
            ..percentage(10)
        };
        let err = terms
            .validate(Decimal::new(100, 0), Utc::now())
            .expect_err("should be expired");
        assert_eq!(err, PromoRejection::Expired);
        assert_eq!(err.to_string(), "this promo code has expired");
    }

    #[test]
    fn not_started_and_exhausted_and_minimum_are_rejected() {
        let now = Utc::now();

        let not_started = PromoTerms {
            starts_at: Some(now + Duration::days(1)),
            ..percentage(10)
        };
        assert_eq!(
            not_started.validate(Decimal::new(100, 0), now),
            Err(PromoRejection::NotStarted)
        );

        let exhausted = PromoTerms {
            max_uses: Some(5),
            used_count: 5,
            ..percentage(10)
        };
        assert_eq!(
            exhausted.validate(Decimal::new(100, 0), now),
            Err(PromoRejection::UsageExhausted)
        );

        let minimum = PromoTerms {
            min_subtotal: Some(Decimal::new(150, 0)),
            ..percentage(10)
        };
        assert_eq!(
            minimum.validate(Decimal::new(100, 0), now),
            Err(PromoRejection::BelowMinimum {
                min: Decimal::new(150, 0)
            })
        );
    }

    #[test]
    fn inactive_code_is_rejected_before_anything_else() {
        let terms = PromoTerms {
            active: false,
            ends_at: Some(Utc::now() - Duration::days(1)),
            ..percentage(10)
        };
        assert_eq!(
            terms.validate(Decimal::new(100, 0), Utc::now()),
            Err(PromoRejection::Inactive)
        );
    }

    #[test]
    fn total_is_subtotal_plus_shipping_minus_discount_rounded() {
        let lines = vec![line(Decimal::new(3333, 2), 3)]; // 99.99
        let q = quote(&lines, "France", Some(&percentage(7)), Utc::now()).expect("valid promo");

        assert_eq!(q.subtotal, Decimal::new(9999, 2));
        // 7% of 99.99 = 6.9993 -> 7.00
        assert_eq!(q.discount, Decimal::new(700, 2));
        assert_eq!(q.total, round2(q.subtotal + q.shipping_cost - q.discount));
    }
}
