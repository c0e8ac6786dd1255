//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Database readiness check
//!
//! # Auth
//! GET    /admin                  - Redirect to login
//! GET    /admin/login            - Login page (redirects to the list when signed in)
//! POST   /admin/login            - Username/password login
//! GET    /admin/logout           - Destroy session
//!
//! # News (signed-in admins only)
//! GET    /admin/news             - Paginated, searchable list (?search=&page=)
//! GET    /admin/news/add         - Add form
//! POST   /admin/news/add         - Create news item
//! GET    /admin/news/edit/{id}   - Edit form
//! POST   /admin/news/edit/{id}   - Update news item
//! DELETE /admin/news/{id}        - Delete news item (JSON response)
//! DELETE /admin/news/add         - Rejected as an invalid news ID (JSON response)
//! ```

pub mod auth;
pub mod news;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};

use crate::state::AppState;

pub use crate::middleware::auth::LOGIN_PATH;

/// Landing page after login and target of every news redirect.
pub const NEWS_LIST_PATH: &str = "/admin/news";

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Auth
        .route("/admin", get(auth::admin_root))
        .route(LOGIN_PATH, get(auth::login_page).post(auth::login))
        .route("/admin/logout", get(auth::logout))
        // News
        .route(NEWS_LIST_PATH, get(news::index))
        .route(
            "/admin/news/add",
            get(news::add_page)
                .post(news::add)
                .delete(news::remove_without_id),
        )
        .route("/admin/news/edit/{id}", get(news::edit_page).post(news::edit))
        .route("/admin/news/{id}", delete(news::remove))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
