//! Shipping cost table.
//!
//! Costs are fixed per destination country. France is the home market and
//! ships free above a subtotal threshold; a free-shipping promo zeroes the
//! cost regardless (handled in [`crate::pricing`]).

use rust_decimal::Decimal;

/// The home market country name, as submitted at checkout.
pub const HOME_COUNTRY: &str = "France";

/// Subtotal at or above which home-market orders ship free (EUR).
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(125, 0)
}

/// Flat shipping rate for a destination country (EUR).
///
/// Country names are matched case-insensitively. Anything not in the table
/// gets the rest-of-world rate.
#[must_use]
pub fn country_rate(country: &str) -> Decimal {
    let country = country.trim();
    if country.eq_ignore_ascii_case("France") || country.eq_ignore_ascii_case("Monaco") {
        Decimal::new(999, 2)
    } else if country.eq_ignore_ascii_case("Belgique")
        || country.eq_ignore_ascii_case("Luxembourg")
    {
        Decimal::new(1299, 2)
    } else if country.eq_ignore_ascii_case("Suisse") {
        Decimal::new(1999, 2)
    } else {
        Decimal::new(2499, 2)
    }
}

/// Shipping cost for a destination and subtotal.
///
/// Returns zero for home-market orders at or above the free-shipping
/// threshold; otherwise the flat per-country rate.
#[must_use]
pub fn shipping_cost(country: &str, subtotal: Decimal) -> Decimal {
    if country.trim().eq_ignore_ascii_case(HOME_COUNTRY) && subtotal >= free_shipping_threshold() {
        return Decimal::ZERO;
    }
    country_rate(country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn france_below_threshold_pays_the_table_rate() {
        assert_eq!(
            shipping_cost("France", Decimal::new(100, 0)),
            Decimal::new(999, 2)
        );
    }

    #[test]
    fn france_at_threshold_ships_free() {
        assert_eq!(shipping_cost("France", Decimal::new(125, 0)), Decimal::ZERO);
        assert_eq!(shipping_cost("france", Decimal::new(200, 0)), Decimal::ZERO);
    }

    #[test]
    fn threshold_does_not_apply_outside_the_home_market() {
        assert_eq!(
            shipping_cost("Belgique", Decimal::new(500, 0)),
            Decimal::new(1299, 2)
        );
    }

    #[test]
    fn unknown_countries_get_the_rest_of_world_rate() {
        assert_eq!(
            shipping_cost("Japon", Decimal::new(80, 0)),
            Decimal::new(2499, 2)
        );
    }
}
