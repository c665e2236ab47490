//! # Validation Module
//!
//! Checks applied to carts read back from storage and to quantities coming
//! from the storefront.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape: array of objects with numeric `id` and `amount`            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Unique ids                                                        │
//! │  └── amount ≥ 1                                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartManager                                                  │
//! │  └── Stock bounds, fetched per operation                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocket_core::validation::validate_stock_bound;
//! use rocket_core::{ProductId, StockInfo};
//!
//! let stock = StockInfo { id: ProductId::new(1), amount: 3 };
//! assert!(validate_stock_bound(&stock, 3).is_ok());
//! assert!(validate_stock_bound(&stock, 4).is_err());
//! ```

use std::collections::HashSet;

use crate::cart::Cart;
use crate::error::{CartError, ValidationError};
use crate::types::StockInfo;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a cart that came from outside the manager (storage, fixtures).
///
/// ## Rules
/// - No two lines share an `id`
/// - Every line has `amount ≥ 1`
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(cart.len());

    for line in cart {
        if !seen.insert(line.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: line.id.to_string(),
            });
        }

        validate_amount(line.amount)?;
    }

    Ok(())
}

/// Validates a line quantity.
pub fn validate_amount(amount: u32) -> ValidationResult<()> {
    if amount == 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Parses a storefront quantity (CLI argument, form field).
pub fn parse_amount(raw: &str) -> ValidationResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Stock Validators
// =============================================================================

/// Checks that `requested` units fit inside the stock record.
pub fn validate_stock_bound(stock: &StockInfo, requested: u32) -> Result<(), CartError> {
    if stock.covers(requested) {
        Ok(())
    } else {
        Err(CartError::StockExceeded {
            product_id: stock.id,
            available: stock.amount,
            requested,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
