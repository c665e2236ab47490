//! # Error Types
//!
//! Domain-specific error types for rocket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocket-core errors (this file)                                        │
//! │  ├── CartError        - Cart rule violations and collaborator failures  │
//! │  ├── LookupError      - Stock / catalog query could not be satisfied    │
//! │  └── ValidationError  - Malformed input or stored data                  │
//! │                                                                         │
//! │  rocket-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistence failures                            │
//! │                                                                         │
//! │  Flow: LookupError/StoreError → CartError → Notice → Notification sink │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these reach the caller of a cart operation: the manager logs them
//! and collapses them into a [`Notice`](crate::Notice).

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart business logic errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity is above the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart line: 42 × 1
    ///      │
    ///      ▼
    /// add_product(42) → stock(42) = 1
    ///      │
    ///      ▼
    /// StockExceeded { product_id: 42, available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// Toast: "requested quantity out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    StockExceeded {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// A stock or catalog lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Persisting the cart failed.
    #[error("Cart store failed: {0}")]
    Store(String),

    /// The cart owner task is gone.
    #[error("Cart manager has stopped")]
    ManagerStopped,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Lookup Error
// =============================================================================

/// A stock or catalog query could not be satisfied.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The remote source could not be reached (connect error, timeout).
    #[error("Source unreachable: {0}")]
    Unreachable(String),

    /// The remote source has no record for the id.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: ProductId },

    /// The remote source answered with an unexpected HTTP status.
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    /// Creates a NotFound error for a resource kind and product id.
    pub fn not_found(resource: impl Into<String>, id: ProductId) -> Self {
        LookupError::NotFound {
            resource: resource.into(),
            id,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input or stored-data validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g. two cart lines for the same product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Data could not be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
