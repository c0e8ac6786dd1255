//! News repository for database operations.
//!
//! Every statement is parameterized. The optional search filter is passed as a
//! nullable `ILIKE` pattern so the same statement serves filtered and
//! unfiltered listings.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use newsdesk_core::{NewsDraft, NewsId, NewsType, SearchFilter};

use super::RepositoryError;
use crate::models::NewsItem;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` news queries.
#[derive(Debug, sqlx::FromRow)]
struct NewsRow {
    id: NewsId,
    news_type: String,
    content_name: String,
    content_url: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<NewsRow> for NewsItem {
    type Error = RepositoryError;

    fn try_from(row: NewsRow) -> Result<Self, Self::Error> {
        let news_type = row.news_type.parse::<NewsType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid news type in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            news_type,
            content_name: row.content_name,
            content_url: row.content_url,
            created_at: row.created_at,
        })
    }
}

fn pattern(filter: Option<&SearchFilter>) -> Option<String> {
    filter.map(SearchFilter::like_pattern)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for news database operations.
pub struct NewsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsRepository<'a> {
    /// Create a new news repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count news items matching the optional filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn count(&self, filter: Option<&SearchFilter>) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM news
            WHERE ($1::text IS NULL
                   OR "type" ILIKE $1
                   OR content_name ILIKE $1
                   OR content_url ILIKE $1)
            "#,
        )
        .bind(pattern(filter))
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// List one page of news items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored type is unknown.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: Option<&SearchFilter>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, "type" AS news_type, content_name, content_url, created_at
            FROM news
            WHERE ($1::text IS NULL
                   OR "type" ILIKE $1
                   OR content_name ILIKE $1
                   OR content_url ILIKE $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern(filter))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a news item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored type is unknown.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: NewsId) -> Result<Option<NewsItem>, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, "type" AS news_type, content_name, content_url, created_at
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a validated draft and return the new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self))]
    pub async fn insert(&self, draft: &NewsDraft) -> Result<NewsId, RepositoryError> {
        let id = sqlx::query_scalar::<_, NewsId>(
            r#"
            INSERT INTO news ("type", content_name, content_url)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(draft.news_type().as_str())
        .bind(draft.content_name())
        .bind(draft.content_url())
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Rewrite type, name and URL of an existing item.
    ///
    /// The ID and creation timestamp are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn update(&self, id: NewsId, draft: &NewsDraft) -> Result<NewsItem, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            UPDATE news
            SET "type" = $1, content_name = $2, content_url = $3
            WHERE id = $4
            RETURNING id, "type" AS news_type, content_name, content_url, created_at
            "#,
        )
        .bind(draft.news_type().as_str())
        .bind(draft.content_name())
        .bind(draft.content_url())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a news item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: NewsId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
