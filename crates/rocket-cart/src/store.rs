//! # Cart Stores
//!
//! [`PersistentStore`] implementations.
//!
//! ```text
//! SqliteCartStore ──► rocket_store::CartRepository ──► cart_storage[key]
//! MemoryStore     ──► JSON string held in process
//! ```
//!
//! Both keep the snapshot as serialized JSON text, so "unchanged after a
//! failed write" can be checked byte-for-byte.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

use rocket_core::{Cart, CART_STORAGE_KEY};
use rocket_store::{CartRepository, Database, StoreError};

use crate::ports::PersistentStore;

// =============================================================================
// SQLite
// =============================================================================

/// Persists the cart in the local SQLite database under one key.
#[derive(Debug, Clone)]
pub struct SqliteCartStore {
    repo: CartRepository,
    key: String,
}

impl SqliteCartStore {
    /// Stores under the well-known key `@RocketShoes:cart`.
    pub fn new(db: &Database) -> Self {
        Self::with_key(db, CART_STORAGE_KEY)
    }

    /// Stores under a custom key (per-profile carts, tests).
    pub fn with_key(db: &Database, key: impl Into<String>) -> Self {
        SqliteCartStore {
            repo: db.carts(),
            key: key.into(),
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored text, byte-for-byte.
    pub async fn raw(&self) -> Result<Option<String>, StoreError> {
        self.repo.load_raw(&self.key).await
    }
}

#[async_trait]
impl PersistentStore for SqliteCartStore {
    async fn load(&self) -> Result<Option<Cart>, StoreError> {
        self.repo.load(&self.key).await
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.repo.save(&self.key, cart).await
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw text (which need not be a valid cart).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryStore {
            slot: Mutex::new(Some(raw.into())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Store pre-seeded with a serialized cart.
    pub fn with_cart(cart: &Cart) -> Result<Self, StoreError> {
        Ok(Self::with_raw(serde_json::to_string(cart)?))
    }

    /// The stored text, byte-for-byte.
    pub async fn raw(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }

    /// While set, every load and save fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn load(&self) -> Result<Option<Cart>, StoreError> {
        self.check_available()?;

        match self.slot.lock().await.as_deref() {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.check_available()?;

        let value = serde_json::to_string(cart)?;
        debug!(bytes = value.len(), "Saving cart to memory store");
        *self.slot.lock().await = Some(value);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
