//! # Collaborator Ports
//!
//! The four seams the cart manager talks through. Each is an object-safe
//! async trait so the manager holds them as `Arc<dyn …>` and tests swap in
//! `mockall` mocks or in-memory fakes.
//!
//! ```text
//! ┌─────────────────┬──────────────────────────┬──────────────────────────┐
//! │ Port            │ Production               │ Tests                    │
//! ├─────────────────┼──────────────────────────┼──────────────────────────┤
//! │ StockQuery      │ ApiClient  GET /stock/id │ MockStockQuery / fake    │
//! │ CatalogQuery    │ ApiClient  GET /products │ MockCatalogQuery / fake  │
//! │ PersistentStore │ SqliteCartStore          │ MemoryStore              │
//! │ NotificationSink│ TracingNotifier          │ ChannelNotifier          │
//! └─────────────────┴──────────────────────────┴──────────────────────────┘
//! ```

use async_trait::async_trait;
use mockall::automock;

use rocket_core::{Cart, LookupError, ProductDetails, ProductId, StockInfo};
use rocket_store::StoreError;

/// Answers "how many units of this product can be fulfilled right now".
#[automock]
#[async_trait]
pub trait StockQuery: Send + Sync {
    /// Fetches the current stock record for a product.
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, LookupError>;
}

/// Supplies display fields for a product being added for the first time.
#[automock]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Fetches the catalog record for a product.
    async fn get_product(&self, product_id: ProductId) -> Result<ProductDetails, LookupError>;
}

/// Durable home of the cart snapshot.
///
/// `save` must be atomic: after an error the previously stored value is
/// still intact.
#[automock]
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Reads the stored cart, `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<Cart>, StoreError>;

    /// Overwrites the stored cart.
    async fn save(&self, cart: &Cart) -> Result<(), StoreError>;
}

/// Fire-and-forget channel for user-facing error messages.
#[automock]
pub trait NotificationSink: Send + Sync {
    /// Shows `message` to the shopper.
    fn notify_error(&self, message: &str);
}
