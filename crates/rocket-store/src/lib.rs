//! # rocket-store: Persistence Layer for the RocketShoes Cart
//!
//! Stores the cart snapshot in a local SQLite database using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  CartManager commit (rocket-cart)                                      │
//! │       │                                                                 │
//! │       ▼  SqliteCartStore::save(&cart)                                   │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   rocket-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ CartRepository│    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  load / save  │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart_storage("@RocketShoes:cart") = "[{...},{...}]"                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocket_store::{Database, StoreConfig};
//!
//! let db = Database::new(StoreConfig::new("rocketshoes.db")).await?;
//! let cart = db.carts().load("@RocketShoes:cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, StoreConfig};
pub use repository::cart::CartRepository;
