//! # rocket-core: Pure Cart Logic for RocketShoes
//!
//! This crate holds the cart model and every rule the cart manager enforces,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RocketShoes Cart Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (renders the cart)                   │   │
//! │  │    Product grid ──► Cart page ──► Quantity buttons ──► Toasts   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartHandle                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rocket-cart (CartManager task)                  │   │
//! │  │    add_product, remove_product, update_product_amount           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rocket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │   money   │  │ validation│  │   │
//! │  │   │ ProductId │  │   Cart    │  │   Money   │  │  loaded   │  │   │
//! │  │   │ StockInfo │  │ transforms│  │  summary  │  │  carts    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, StockInfo, Notice)
//! - [`cart`] - The ordered, id-unique cart and its pure transforms
//! - [`money`] - Integer-cents money for the cart summary
//! - [`error`] - Domain error types
//! - [`validation`] - Checks applied to carts read back from storage
//!
//! ## Example Usage
//!
//! ```rust
//! use rocket_core::{Cart, Product, ProductDetails, ProductId};
//!
//! let cart = Cart::new();
//! let cart = cart.with_line(Product::new(ProductId::new(42), ProductDetails::default()));
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.get(ProductId::new(42)).map(|p| p.amount), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary};
pub use error::{CartError, CartResult, LookupError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Well-known key the cart snapshot is persisted under.
///
/// Every commit overwrites the value stored at this key wholesale.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Quantity a product line starts with when it is first added.
pub const INITIAL_LINE_AMOUNT: u32 = 1;
