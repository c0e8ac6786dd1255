//! HTTP middleware for admin.
//!
//! - `session` - tower-sessions layer (cookie settings and the `PostgreSQL` store)
//! - `auth` - extractor guarding the news routes

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, current_admin, set_current_admin};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
