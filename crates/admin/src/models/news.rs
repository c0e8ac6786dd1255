//! News item domain type.

use chrono::{DateTime, Utc};

use newsdesk_core::{NewsId, NewsType};

/// A stored news record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Unique news ID.
    pub id: NewsId,
    /// News category.
    pub news_type: NewsType,
    /// Headline shown in the list.
    pub content_name: String,
    /// Link to the article.
    pub content_url: String,
    /// When the record was created. Never changed by edits.
    pub created_at: DateTime<Utc>,
}
