//! # Domain Types
//!
//! Core domain types shared by the cart manager, the persistence layer and
//! the HTTP client.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   StockInfo     │   │     Notice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  id (u64)       │   │  AddFailed      │       │
//! │  │  amount (≥ 1)   │   │  amount (≥ 0)   │   │  StockExceeded  │       │
//! │  │  ...details     │   │                 │   │  RemoveFailed   │       │
//! │  └─────────────────┘   └─────────────────┘   │  UpdateFailed   │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ ProductDetails  │   │    Outcome      │                             │
//! │  │  title, price,  │   │  Committed      │                             │
//! │  │  image, ...     │   │  Unchanged      │                             │
//! │  │  (opaque JSON)  │   │  Rejected/Failed│                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! A cart line is stored flat, display fields next to `id` and `amount`:
//! ```json
//! {"id":42,"title":"Tênis de Caminhada","price":179.9,"image":"https://…","amount":2}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::INITIAL_LINE_AMOUNT;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product; the unique key of a cart line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] u64);

impl ProductId {
    /// Wraps a raw catalog id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    /// Returns the raw catalog id.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ProductId)
    }
}

// =============================================================================
// Product Details
// =============================================================================

/// Display fields of a product as served by the catalog.
///
/// The cart never interprets these beyond the read-only accessors below; they
/// are carried verbatim from the catalog into the persisted cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductDetails(Map<String, Value>);

/// Keys owned by the cart line itself, never by the display fields.
const RESERVED_KEYS: [&str; 2] = ["id", "amount"];

impl ProductDetails {
    /// Wraps a catalog JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        ProductDetails(fields)
    }

    /// Sets a single display field (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns a raw display field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Product title, if the catalog sent one.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Unit price in major currency units, if the catalog sent a numeric one.
    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }

    /// Image URL, if the catalog sent one.
    pub fn image(&self) -> Option<&str> {
        self.0.get("image").and_then(Value::as_str)
    }

    /// Number of display fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the catalog sent no display fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn strip_reserved(mut self) -> Self {
        for key in RESERVED_KEYS {
            self.0.remove(key);
        }
        self
    }
}

// =============================================================================
// Product (cart line)
// =============================================================================

/// One cart line: a product plus the quantity selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id, unique within a cart.
    pub id: ProductId,

    /// Display fields, flattened next to `id` and `amount` when persisted.
    #[serde(flatten)]
    pub details: ProductDetails,

    /// Selected quantity, always ≥ 1.
    pub amount: u32,
}

impl Product {
    /// Creates a fresh cart line with the initial amount of 1.
    ///
    /// Any `id`/`amount` keys inside `details` are dropped so the line's own
    /// fields are the only source of truth.
    pub fn new(id: ProductId, details: ProductDetails) -> Self {
        Product {
            id,
            details: details.strip_reserved(),
            amount: INITIAL_LINE_AMOUNT,
        }
    }

    /// Returns a copy of this line with a different amount.
    pub fn with_amount(&self, amount: u32) -> Self {
        Product {
            amount,
            ..self.clone()
        }
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Maximum quantity currently fulfillable for a product.
///
/// Fetched on demand for every mutating call; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockInfo {
    /// Product the stock record belongs to.
    pub id: ProductId,

    /// Units available (0 means sold out).
    pub amount: u32,
}

impl StockInfo {
    /// True when `requested` units can be fulfilled.
    #[inline]
    pub fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }

    /// True when nothing is left.
    #[inline]
    pub fn is_sold_out(&self) -> bool {
        self.amount == 0
    }
}

// =============================================================================
// Notices
// =============================================================================

/// User-facing error notification emitted by the cart manager.
///
/// `Display` yields the exact text handed to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Notice {
    /// Adding a product failed (stock or catalog lookup, or the store write).
    AddFailed,
    /// The requested quantity is above the available stock.
    StockExceeded,
    /// The product is not in the cart, or removing it failed.
    RemoveFailed,
    /// Changing a line's quantity failed.
    UpdateFailed,
}

impl Notice {
    /// The message shown to the shopper.
    pub const fn message(&self) -> &'static str {
        match self {
            Notice::AddFailed => "product addition failed",
            Notice::StockExceeded => "requested quantity out of stock",
            Notice::RemoveFailed => "error removing product",
            Notice::UpdateFailed => "error changing product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// =============================================================================
// Operation Outcome
// =============================================================================

/// Terminal state of one cart operation.
///
/// ```text
/// Idle ──► Validating (stock lookup) ──┬──► Committed
///                                      ├──► Rejected(notice)
///                                      ├──► Failed(notice)
///                                      └──► Unchanged (silent no-op)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "status", content = "notice", rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    /// New cart persisted and published.
    Committed,
    /// Nothing happened and nothing was reported.
    Unchanged,
    /// Business-rule rejection; cart untouched.
    Rejected(Notice),
    /// Collaborator failure; cart untouched.
    Failed(Notice),
}

impl Outcome {
    /// True for [`Outcome::Committed`].
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed)
    }

    /// The notice the sink received, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Outcome::Rejected(n) | Outcome::Failed(n) => Some(*n),
            Outcome::Committed | Outcome::Unchanged => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_id_parse_and_display() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_product_serializes_flat() {
        let details = ProductDetails::default()
            .with("title", "Tênis de Caminhada")
            .with("price", 179.9);
        let product = Product::new(ProductId::new(42), details);

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({"id": 42, "title": "Tênis de Caminhada", "price": 179.9, "amount": 1})
        );
    }

    #[test]
    fn test_product_deserializes_unknown_fields_into_details() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "title": "Tênis VR Caminhada",
            "image": "https://example.com/7.jpg",
            "amount": 3
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.amount, 3);
        assert_eq!(product.details.title(), Some("Tênis VR Caminhada"));
        assert_eq!(product.details.image(), Some("https://example.com/7.jpg"));
        assert_eq!(product.details.len(), 2);
    }

    #[test]
    fn test_new_product_drops_catalog_id_and_amount() {
        let details = ProductDetails::default()
            .with("id", 99)
            .with("amount", 12)
            .with("title", "Tênis");
        let product = Product::new(ProductId::new(42), details);

        assert_eq!(product.amount, INITIAL_LINE_AMOUNT);
        assert!(product.details.get("id").is_none());
        assert!(product.details.get("amount").is_none());

        let text = serde_json::to_string(&product).unwrap();
        assert_eq!(text.matches("\"id\"").count(), 1);
    }

    #[test]
    fn test_stock_info_bounds() {
        let stock = StockInfo {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
        assert!(!stock.is_sold_out());

        let empty = StockInfo {
            id: ProductId::new(1),
            amount: 0,
        };
        assert!(empty.is_sold_out());
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::AddFailed.to_string(), "product addition failed");
        assert_eq!(
            Notice::StockExceeded.to_string(),
            "requested quantity out of stock"
        );
        assert_eq!(Notice::RemoveFailed.to_string(), "error removing product");
        assert_eq!(
            Notice::UpdateFailed.to_string(),
            "error changing product quantity"
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let value = serde_json::to_value(Outcome::Rejected(Notice::StockExceeded)).unwrap();
        assert_eq!(value, json!({"status": "rejected", "notice": "stock_exceeded"}));

        let value = serde_json::to_value(Outcome::Committed).unwrap();
        assert_eq!(value, json!({"status": "committed"}));
        assert_eq!(Outcome::Committed.notice(), None);
    }

    #[test]
    fn test_outcome_binding_matches_wire_shape() {
        let decl = Outcome::decl();
        assert!(decl.contains("Outcome"));
        assert!(decl.contains("status"));
        assert!(decl.contains("notice"));
        assert!(decl.contains("Notice"));
    }
}
