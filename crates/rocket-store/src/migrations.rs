//! # Cart Store Schema
//!
//! The SQL under `migrations/sqlite/` is compiled into the binary and applied
//! in filename order when a [`Database`](crate::Database) opens. Schema
//! changes go in a new numbered file; applied files are checksummed by sqlx
//! and must stay untouched.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Brings the schema up to date. Safe to call on an already current store.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    MIGRATOR.run(pool).await?;
    info!(count = MIGRATOR.migrations.len(), "Cart store schema up to date");
    Ok(())
}

/// `(embedded, applied)` migration counts. A store that was never migrated
/// reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let embedded = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((embedded, usize::try_from(applied).unwrap_or(0)))
}
