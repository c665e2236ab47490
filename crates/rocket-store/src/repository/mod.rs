//! # Repository Module
//!
//! Database access behind a small typed API.
//!
//! ```text
//! CartManager ──► SqliteCartStore ──► CartRepository ──► cart_storage table
//!                                     ├── load(key)
//!                                     ├── save(key, &cart)
//!                                     ├── load_raw(key)
//!                                     └── delete(key)
//! ```
//!
//! ## Available Repositories
//!
//! - [`cart::CartRepository`] - Cart snapshot key/value storage

pub mod cart;
