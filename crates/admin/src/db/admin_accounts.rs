//! Admin account repository for database operations.

use sqlx::PgPool;
use tracing::instrument;

use newsdesk_core::{AdminId, StoredCredential};

use super::RepositoryError;
use crate::models::AdminAccount;

/// Internal row type for `PostgreSQL` admin queries.
#[derive(sqlx::FromRow)]
struct AdminRow {
    id: AdminId,
    username: String,
    password: String,
}

impl From<AdminRow> for AdminAccount {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            credential: StoredCredential::from_stored(row.password),
        }
    }
}

/// Repository for admin account database operations.
pub struct AdminAccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminAccountRepository<'a> {
    /// Create a new admin account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin account by exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, username, password
            FROM admin
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(AdminAccount::from))
    }

    /// List all admin accounts ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<AdminAccount>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, username, password
            FROM admin
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(AdminAccount::from).collect())
    }

    /// Create an admin account with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, password_hash))]
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminId, RepositoryError> {
        let id = sqlx::query_scalar::<_, AdminId>(
            r"
            INSERT INTO admin (username, password)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!("username '{username}' already exists"))
            }
            other => RepositoryError::Database(other),
        })?;

        Ok(id)
    }
}
