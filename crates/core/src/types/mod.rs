//! Core types for Newsdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod news;
pub mod pagination;
pub mod search;

pub use credential::{HashScheme, StoredCredential};
pub use id::*;
pub use news::{NewsDraft, NewsFormError, NewsType, UnknownNewsType};
pub use pagination::{PageRequest, Pagination, total_pages};
pub use search::SearchFilter;
