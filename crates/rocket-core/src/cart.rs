//! # Cart
//!
//! The ordered, id-unique list of product lines, and the pure transforms the
//! cart manager commits.
//!
//! ## Transforms Never Mutate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transforms                                      │
//! │                                                                         │
//! │  Manager Operation          Transform               Result              │
//! │  ─────────────────          ─────────               ──────              │
//! │                                                                         │
//! │  add (new product) ───────► with_line(p) ─────────► [..old, p]          │
//! │                                                                         │
//! │  add (in cart) ───────────► with_amount(id, n+1) ─► same order, n+1     │
//! │                                                                         │
//! │  update_product_amount ───► with_amount(id, n) ───► same order, n       │
//! │                                                                         │
//! │  remove_product ──────────► without(id) ──────────► [..old - id]        │
//! │                                                                         │
//! │  Every transform takes &self and returns a NEW Cart. The snapshot the  │
//! │  manager holds stays valid until the store write has succeeded.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

/// The shopper's cart.
///
/// ## Invariants
/// - Lines are unique by `id`
/// - Every line has `amount ≥ 1`
/// - Insertion order is preserved across edits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from lines as-is. Callers reading untrusted data should
    /// go through [`crate::validation::validate_cart`].
    pub fn from_lines(lines: Vec<Product>) -> Self {
        Cart { lines }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    /// Consumes the cart, returning its lines.
    pub fn into_lines(self) -> Vec<Product> {
        self.lines
    }

    /// Finds the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.lines.iter().find(|p| p.id == id)
    }

    /// True when the product has a line.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns a new cart with `line` appended.
    ///
    /// If a line with the same id already exists it is replaced in place, so
    /// the id-uniqueness invariant holds even for careless callers.
    pub fn with_line(&self, line: Product) -> Cart {
        if self.contains(line.id) {
            let lines = self
                .lines
                .iter()
                .map(|p| if p.id == line.id { line.clone() } else { p.clone() })
                .collect();
            return Cart { lines };
        }

        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        lines.extend(self.lines.iter().cloned());
        lines.push(line);
        Cart { lines }
    }

    /// Returns a new cart where the matching line carries `amount`.
    ///
    /// An unmatched id yields an identical cart.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Cart {
        let lines = self
            .lines
            .iter()
            .map(|p| if p.id == id { p.with_amount(amount) } else { p.clone() })
            .collect();
        Cart { lines }
    }

    /// Returns a new cart without the product's line.
    pub fn without(&self, id: ProductId) -> Cart {
        let lines = self.lines.iter().filter(|p| p.id != id).cloned().collect();
        Cart { lines }
    }

    /// Total units across all lines.
    pub fn total_amount(&self) -> u64 {
        self.lines.iter().map(|p| u64::from(p.amount)).sum()
    }

    /// Sum of `price × amount` over lines with a numeric price.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .filter_map(|p| {
                p.details
                    .price()
                    .and_then(Money::from_major_f64)
                    .map(|unit| unit.multiply_quantity(p.amount))
            })
            .fold(Money::zero(), |acc, line| acc + line)
    }

    /// Derived read-only view for rendering.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Cart totals summary for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Number of distinct products.
    #[ts(type = "number")]
    pub line_count: usize,
    /// Units across all lines.
    #[ts(type = "number")]
    pub total_amount: u64,
    /// Price total before shipping.
    pub subtotal: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            line_count: cart.len(),
            total_amount: cart.total_amount(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductDetails;

    fn line(id: u64, amount: u32, price: f64) -> Product {
        Product::new(
            ProductId::new(id),
            ProductDetails::default()
                .with("title", format!("Tênis {}", id))
                .with("price", price),
        )
        .with_amount(amount)
    }

    fn ids(cart: &Cart) -> Vec<u64> {
        cart.lines().iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_with_line_appends_in_order() {
        let cart = Cart::new()
            .with_line(line(3, 1, 10.0))
            .with_line(line(1, 1, 10.0))
            .with_line(line(2, 1, 10.0));

        assert_eq!(ids(&cart), vec![3, 1, 2]);
    }

    #[test]
    fn test_with_line_replaces_existing_id() {
        let cart = Cart::new()
            .with_line(line(1, 1, 10.0))
            .with_line(line(2, 1, 10.0))
            .with_line(line(1, 4, 10.0));

        assert_eq!(ids(&cart), vec![1, 2]);
        assert_eq!(cart.get(ProductId::new(1)).map(|p| p.amount), Some(4));
    }

    #[test]
    fn test_transforms_leave_original_untouched() {
        let original = Cart::new().with_line(line(7, 1, 10.0));

        let updated = original.with_amount(ProductId::new(7), 3);
        let removed = original.without(ProductId::new(7));

        assert_eq!(original.get(ProductId::new(7)).map(|p| p.amount), Some(1));
        assert_eq!(updated.get(ProductId::new(7)).map(|p| p.amount), Some(3));
        assert!(removed.is_empty());
    }

    #[test]
    fn test_with_amount_preserves_order_and_ignores_unknown_id() {
        let cart = Cart::new()
            .with_line(line(1, 1, 10.0))
            .with_line(line(2, 1, 10.0))
            .with_line(line(3, 1, 10.0));

        let updated = cart.with_amount(ProductId::new(2), 5);
        assert_eq!(ids(&updated), vec![1, 2, 3]);

        let untouched = cart.with_amount(ProductId::new(999), 5);
        assert_eq!(untouched, cart);
    }

    #[test]
    fn test_summary() {
        let cart = Cart::new()
            .with_line(line(1, 2, 179.9))
            .with_line(line(2, 1, 139.9));

        let summary = cart.summary();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_amount, 3);
        assert_eq!(summary.subtotal.cents(), 2 * 17990 + 13990);
    }

    #[test]
    fn test_subtotal_skips_lines_without_price() {
        let no_price = Product::new(ProductId::new(9), ProductDetails::default()).with_amount(2);
        let cart = Cart::new().with_line(no_price).with_line(line(1, 1, 10.0));

        assert_eq!(cart.subtotal().cents(), 1000);
    }

    #[test]
    fn test_cart_serializes_as_array() {
        let cart = Cart::new().with_line(line(42, 1, 179.9));
        let text = serde_json::to_string(&cart).unwrap();
        assert!(text.starts_with('['));

        let back: Cart = serde_json::from_str(&text).unwrap();
        assert_eq!(back, cart);
    }
}
