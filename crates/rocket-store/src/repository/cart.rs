//! # Cart Repository
//!
//! Key/value storage for the serialized cart snapshot.
//!
//! ## Atomic Overwrite
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(key, &cart)                                                       │
//! │       │                                                                 │
//! │       ▼  serde_json::to_string(&cart)   (fails → nothing written)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO cart_storage (key, value, updated_at) VALUES (?, ?, ?)    │
//! │  ON CONFLICT(key) DO UPDATE SET value = ..., updated_at = ...          │
//! │                                                                         │
//! │  One statement: the stored value is either the old snapshot or the    │
//! │  new one, never a mix.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use rocket_core::Cart;

/// Repository for the cart snapshot.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads and parses the cart stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(None)` - Nothing stored yet
    /// * `Ok(Some(cart))` - Parsed snapshot (not yet validated)
    /// * `Err(StoreError::Corrupt)` - Stored text is not a cart
    pub async fn load(&self, key: &str) -> StoreResult<Option<Cart>> {
        let Some(raw) = self.load_raw(key).await? else {
            return Ok(None);
        };

        let cart = serde_json::from_str::<Cart>(&raw)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        debug!(key = %key, lines = cart.len(), "Loaded cart snapshot");
        Ok(Some(cart))
    }

    /// Returns the stored text under `key` byte-for-byte.
    pub async fn load_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM cart_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Serializes `cart` and overwrites the snapshot under `key`.
    pub async fn save(&self, key: &str, cart: &Cart) -> StoreResult<()> {
        let value = serde_json::to_string(cart)?;
        self.save_raw(key, &value).await
    }

    /// Overwrites the stored text under `key`.
    pub async fn save_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO cart_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Saved cart snapshot");
        Ok(())
    }

    /// Removes the snapshot under `key`. Returns true if a row was deleted.
    pub async fn delete(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM cart_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, StoreConfig, StoreError};
    use rocket_core::{Cart, Product, ProductDetails, ProductId, CART_STORAGE_KEY};

    async fn repo() -> super::CartRepository {
        Database::new(StoreConfig::in_memory()).await.unwrap().carts()
    }

    fn sample_cart() -> Cart {
        Cart::new()
            .with_line(Product::new(
                ProductId::new(1),
                ProductDetails::default()
                    .with("title", "Tênis de Caminhada Leve Confortável")
                    .with("price", 179.9),
            ))
            .with_amount(ProductId::new(1), 2)
    }

    #[tokio::test]
    async fn test_load_missing_key_is_none() {
        let repo = repo().await;
        assert!(repo.load(CART_STORAGE_KEY).await.unwrap().is_none());
        assert!(repo.load_raw(CART_STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = repo().await;
        let cart = sample_cart();

        repo.save(CART_STORAGE_KEY, &cart).await.unwrap();

        let loaded = repo.load(CART_STORAGE_KEY).await.unwrap();
        assert_eq!(loaded, Some(cart.clone()));

        let raw = repo.load_raw(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(raw, serde_json::to_string(&cart).unwrap());
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let repo = repo().await;

        repo.save(CART_STORAGE_KEY, &sample_cart()).await.unwrap();
        repo.save(CART_STORAGE_KEY, &Cart::new()).await.unwrap();

        let raw = repo.load_raw(CART_STORAGE_KEY).await.unwrap();
        assert_eq!(raw.as_deref(), Some("[]"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_storage")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let repo = repo().await;

        repo.save("a", &sample_cart()).await.unwrap();
        repo.save("b", &Cart::new()).await.unwrap();

        assert_eq!(repo.load("a").await.unwrap(), Some(sample_cart()));
        assert!(repo.delete("a").await.unwrap());
        assert!(!repo.delete("a").await.unwrap());
        assert_eq!(repo.load("b").await.unwrap(), Some(Cart::new()));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_reported() {
        let repo = repo().await;
        repo.save_raw(CART_STORAGE_KEY, "{not json").await.unwrap();

        let err = repo.load(CART_STORAGE_KEY).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
