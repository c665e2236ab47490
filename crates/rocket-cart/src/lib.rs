//! # rocket-cart: Cart Manager Service for RocketShoes
//!
//! Owns the shopper's cart, validates every change against live stock,
//! persists each accepted change before exposing it, and reports failures as
//! user-facing notices.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         rocket-cart                                     │
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐   │
//! │  │  handle     │  │  manager    │  │  ports      │  │  config     │   │
//! │  │ CartHandle  │─►│ CartManager │─►│ StockQuery  │  │ CartConfig  │   │
//! │  │ (actor)     │  │ (rules)     │  │ CatalogQuery│  │ (TOML+env)  │   │
//! │  └─────────────┘  └─────────────┘  │ Persistent..│  └─────────────┘   │
//! │                                    │ Notification│                     │
//! │                                    └──────┬──────┘                     │
//! │                     ┌─────────────────────┼─────────────────────┐      │
//! │               ┌─────▼─────┐         ┌─────▼─────┐         ┌─────▼────┐ │
//! │               │ api       │         │ store     │         │ notify   │ │
//! │               │ ApiClient │         │ Sqlite /  │         │ Tracing /│ │
//! │               │ (reqwest) │         │ Memory    │         │ Channel  │ │
//! │               └───────────┘         └───────────┘         └──────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let config = CartConfig::load(None)?;
//! let api = Arc::new(ApiClient::new(&config.api)?);
//! let db = Database::new(StoreConfig::new(config.storage.resolved_database_path())).await?;
//! let store = Arc::new(SqliteCartStore::with_key(&db, &config.storage.key));
//!
//! let handle = CartManager::load(api.clone(), api, store, Arc::new(TracingNotifier))
//!     .await
//!     .spawn(config.manager.channel_capacity);
//!
//! handle.add_product(ProductId::new(1)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod handle;
pub mod manager;
pub mod notify;
pub mod ports;
pub mod store;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::ApiClient;
pub use config::{ApiSettings, CartConfig, ManagerSettings, StorageSettings};
pub use error::{ConfigError, ConfigResult};
pub use handle::CartHandle;
pub use manager::CartManager;
pub use notify::{ChannelNotifier, NoOpNotifier, TracingNotifier};
pub use ports::{CatalogQuery, NotificationSink, PersistentStore, StockQuery};
pub use store::{MemoryStore, SqliteCartStore};
