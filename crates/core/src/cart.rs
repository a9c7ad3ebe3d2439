//! Cart reducer.
//!
//! A cart is an ordered list of line items keyed by `(product_id, size)`.
//! All operations are pure state transitions; persistence (the session) is
//! the caller's concern. The cart serializes with serde so the server can
//! stash it in the session store and rehydrate it wholesale on each request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One line of a cart: a product in a given size.
///
/// Name, brand, image, and unit price are denormalized from the product row
/// at the moment the line is added, so the cart (and later the order items)
/// reflect what the client saw, not later catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub size: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub product_name: String,
    pub brand: String,
    pub image: Option<String>,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of [`CartLine`]s, keyed by `(product_id, size)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add a line to the cart.
    ///
    /// If a line with the same `(product_id, size)` key already exists, the
    /// quantities are merged and the existing line's denormalized fields are
    /// kept. A zero-quantity add is a no-op.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        match self.find_mut(line.product_id, &line.size) {
            Some(existing) => existing.quantity += line.quantity,
            None => self.lines.push(line),
        }
    }

    /// Remove the line keyed by `(product_id, size)`, if present.
    pub fn remove(&mut self, product_id: ProductId, size: &str) {
        self.lines
            .retain(|l| !(l.product_id == product_id && l.size == size));
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Setting a quantity on a
    /// key that is not in the cart does nothing.
    pub fn set_quantity(&mut self, product_id: ProductId, size: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id, size);
            return;
        }
        if let Some(line) = self.find_mut(product_id, size) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all line totals, unrounded.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn find_mut(&mut self, product_id: ProductId, size: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.size == size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: i32, size: &str, quantity: u32, price: Decimal) -> CartLine {
        CartLine {
            product_id: ProductId::new(product),
            size: size.to_owned(),
            quantity,
            unit_price: price,
            product_name: format!("Sneaker {product}"),
            brand: "Nike".to_owned(),
            image: None,
        }
    }

    #[test]
    fn add_merges_quantities_on_same_key() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 2, Decimal::new(5000, 2)));
        cart.add(line(1, "42", 3, Decimal::new(5000, 2)));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn add_appends_on_different_size() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 1, Decimal::new(5000, 2)));
        cart.add(line(1, "43", 1, Decimal::new(5000, 2)));

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 2, Decimal::new(5000, 2)));
        cart.set_quantity(ProductId::new(1), "42", 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn set_negative_quantity_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 2, Decimal::new(5000, 2)));
        cart.set_quantity(ProductId::new(1), "42", -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_replaces_existing_quantity() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 2, Decimal::new(5000, 2)));
        cart.set_quantity(ProductId::new(1), "42", 7);

        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn remove_filters_only_the_matching_key() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 1, Decimal::new(5000, 2)));
        cart.add(line(2, "42", 1, Decimal::new(9000, 2)));
        cart.remove(ProductId::new(1), "42");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, ProductId::new(2));
    }

    #[test]
    fn subtotal_and_item_count_sum_lines() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 2, Decimal::new(5000, 2)));
        cart.add(line(2, "44", 1, Decimal::new(12_000, 2)));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(22_000, 2));
    }

    #[test]
    fn cart_round_trips_through_json() {
        let mut cart = Cart::default();
        cart.add(line(1, "42", 2, Decimal::new(5000, 2)));

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
