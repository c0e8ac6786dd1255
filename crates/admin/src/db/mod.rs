//! Database operations for admin `PostgreSQL`.
//!
//! ## Tables
//!
//! - `admin` - Admin accounts (`username` unique, `password` hash or legacy plaintext)
//! - `news` - News records managed by the panel
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! # Schema
//!
//! The schema is kept in `crates/admin/sql/schema.sql` and is safe to re-apply:
//! ```bash
//! psql "$ADMIN_DATABASE_URL" -f crates/admin/sql/schema.sql
//! ```

pub mod admin_accounts;
pub mod news;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_accounts::AdminAccountRepository;
pub use news::NewsRepository;

/// The idempotent schema for the admin database.
pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Advisory lock key held while the schema is applied.
const SCHEMA_LOCK_KEY: i64 = 0x6e65_7773_6465_736b;

/// Apply [`SCHEMA_SQL`] to the database.
///
/// Concurrent callers are serialized with a transaction-scoped advisory lock,
/// since parallel `CREATE TABLE IF NOT EXISTS` can race on the catalog.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::Executor::execute(&mut *tx, sqlx::raw_sql(SCHEMA_SQL)).await?;
    tx.commit().await?;
    Ok(())
}
