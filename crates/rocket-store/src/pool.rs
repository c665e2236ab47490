//! # Cart Store Pool
//!
//! Opens the SQLite file that holds cart snapshots.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::new(path)  ← Configure pool settings                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await  ← Create pool + run migrations           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.carts()  ← CartRepository sharing the pool                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL is enabled so a reader (e.g. a second storefront tab inspecting the
//! cart) never blocks the single writer.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::cart::CartRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use rocket_store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/rocketshoes.db").max_connections(2);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool ceiling. Default: 4 (one writer, a few readers)
    pub max_connections: u32,

    /// Connections kept open while idle. Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection. Default: 30s
    pub connect_timeout: Duration,

    /// Apply embedded migrations when opening. Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration for the database file at `path`. The file is
    /// created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Overrides the pool ceiling.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Overrides the acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Skips or applies migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Throwaway database for tests.
    ///
    /// The pool is pinned to a single connection that is never reaped, since
    /// each in-memory connection is its own database.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// True for [`StoreConfig::in_memory`].
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open cart database; hands out repositories sharing one pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// Shared by every repository.
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database and applies migrations.
    ///
    /// File databases use WAL journaling with NORMAL synchronous.
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing cart store"
        );

        let base_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            // WAL has no meaning for an in-memory database
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };
        let connect_options = base_options.synchronous(SqliteSynchronous::Normal);

        let idle_timeout = if config.is_in_memory() {
            None
        } else {
            Some(Duration::from_secs(600))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(idle_timeout)
            .max_lifetime(idle_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Store pool created");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies all pending migrations.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the cart snapshot repository.
    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.pool.clone())
    }

    /// Closes the pool; repositories fail afterwards.
    pub async fn close(&self) {
        info!("Closing cart store");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert!(total >= 1);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.db");

        let db = Database::new(StoreConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        assert!(path.exists());

        db.close().await;
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/test.db")
            .max_connections(10)
            .connect_timeout(Duration::from_secs(1))
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(StoreConfig::in_memory().is_in_memory());
    }
}
