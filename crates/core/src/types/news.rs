//! News item types and form validation.
//!
//! [`NewsDraft::parse`] is the single validation boundary for submitted news
//! fields. Write operations only accept a [`NewsDraft`], so nothing reaches the
//! database without passing the rules below, in this order:
//!
//! 1. type, name and URL are all present
//! 2. type is one of [`NewsType::ALL`]
//! 3. URL parses as an absolute URL
//! 4. trimmed name is at least [`NewsDraft::MIN_NAME_CHARS`] characters
//!
//! Only the first failing rule is reported.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// News category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsType {
    Business,
    National,
    International,
}

impl NewsType {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Business, Self::National, Self::International];

    /// Returns the stored and displayed name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::National => "National",
            Self::International => "International",
        }
    }
}

impl fmt::Display for NewsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known [`NewsType`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid news type: {0}")]
pub struct UnknownNewsType(pub String);

impl FromStr for NewsType {
    type Err = UnknownNewsType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownNewsType(s.to_owned()))
    }
}

/// Validation failure for a submitted news form.
///
/// The `Display` text is shown to the operator as-is.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsFormError {
    #[error("All fields are required")]
    MissingField,
    #[error("Invalid type selected")]
    InvalidType,
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("Content name must be at least 3 characters")]
    NameTooShort,
}

/// A validated news item ready to be written.
///
/// Name and URL are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    news_type: NewsType,
    content_name: String,
    content_url: String,
}

impl NewsDraft {
    /// Minimum length of the trimmed content name, in characters.
    pub const MIN_NAME_CHARS: usize = 3;

    /// Validate raw form fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`NewsFormError`] whose rule the input breaks.
    pub fn parse(
        news_type: &str,
        content_name: &str,
        content_url: &str,
    ) -> Result<Self, NewsFormError> {
        if news_type.is_empty() || content_name.is_empty() || content_url.is_empty() {
            return Err(NewsFormError::MissingField);
        }

        let news_type: NewsType = news_type.parse().map_err(|_| NewsFormError::InvalidType)?;

        Url::parse(content_url).map_err(|_| NewsFormError::InvalidUrl)?;

        let content_name = content_name.trim();
        if content_name.chars().count() < Self::MIN_NAME_CHARS {
            return Err(NewsFormError::NameTooShort);
        }

        Ok(Self {
            news_type,
            content_name: content_name.to_owned(),
            content_url: content_url.trim().to_owned(),
        })
    }

    #[must_use]
    pub const fn news_type(&self) -> NewsType {
        self.news_type
    }

    #[must_use]
    pub fn content_name(&self) -> &str {
        &self.content_name
    }

    #[must_use]
    pub fn content_url(&self) -> &str {
        &self.content_url
    }
}
