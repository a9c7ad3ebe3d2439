//! Money helpers.
//!
//! All amounts in Relace are EUR and carried as [`rust_decimal::Decimal`].
//! Floats never touch a price.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to 2 decimal places (cents), away from zero on midpoints.
///
/// Every persisted or returned amount goes through this exactly once, at the
/// edge of a computation. Intermediate arithmetic stays unrounded.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(Decimal::new(109_994, 3)), Decimal::new(10_999, 2));
        assert_eq!(round2(Decimal::new(109_995, 3)), Decimal::new(11_000, 2));
        assert_eq!(round2(Decimal::new(130, 0)), Decimal::new(130, 0));
    }
}
