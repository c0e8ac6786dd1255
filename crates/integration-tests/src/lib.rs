//! Integration tests for Newsdesk.
//!
//! # Running Tests
//!
//! ```bash
//! # Database-only tests
//! ADMIN_DATABASE_URL=postgres://localhost/newsdesk_test \
//!     cargo test -p newsdesk-integration-tests -- --ignored
//!
//! # HTTP tests additionally need the admin server on ADMIN_BASE_URL,
//! # started against the same database
//! cargo run -p newsdesk-admin
//! ```
//!
//! # Test Categories
//!
//! - `news_repository` - Repository behaviour against `PostgreSQL`
//! - `admin_http` - Login, session and news flows against a running server
//!
//! Every test tags the rows it creates with a unique marker so runs do not
//! interfere with each other or with existing data.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use secrecy::SecretString;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use newsdesk_admin::db;
use newsdesk_core::AdminId;

/// Base URL of the running admin server.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

static SCHEMA_APPLIED: OnceCell<()> = OnceCell::const_new();

/// Connect to the test database without touching the schema.
pub async fn connect_test_database() -> PgPool {
    let url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("ADMIN_DATABASE_URL must be set for integration tests");

    db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database")
}

/// Connect to the test database and make sure the schema exists.
///
/// The schema is applied once per test binary.
pub async fn test_pool() -> PgPool {
    let pool = connect_test_database().await;
    SCHEMA_APPLIED
        .get_or_init(|| async {
            db::apply_schema(&pool)
                .await
                .expect("Failed to apply schema");
        })
        .await;
    pool
}

/// A marker unique to one test run, safe to embed in names and URLs.
#[must_use]
pub fn unique_marker() -> String {
    format!("it{}", uuid::Uuid::new_v4().simple())
}

/// Insert or replace an admin account with the given stored password value.
pub async fn seed_admin(pool: &PgPool, username: &str, stored_password: &str) -> AdminId {
    let id = sqlx::query_scalar::<_, i32>(
        r"
        INSERT INTO admin (username, password)
        VALUES ($1, $2)
        ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password
        RETURNING id
        ",
    )
    .bind(username)
    .bind(stored_password)
    .fetch_one(pool)
    .await
    .expect("Failed to seed admin");

    AdminId::new(id)
}

/// Remove an admin account created by a test.
pub async fn remove_admin(pool: &PgPool, username: &str) {
    sqlx::query("DELETE FROM admin WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await
        .expect("Failed to remove admin");
}

/// Remove every news row whose name contains `marker`.
pub async fn remove_news(pool: &PgPool, marker: &str) {
    sqlx::query("DELETE FROM news WHERE content_name LIKE '%' || $1 || '%'")
        .bind(marker)
        .execute(pool)
        .await
        .expect("Failed to remove news");
}
