//! Authentication route handlers for admin.
//!
//! Username/password login against the `admin` table, and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_admin, current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

use super::NEWS_LIST_PATH;

const MISSING_FIELDS: &str = "Username and password are required";
const INVALID_CREDENTIALS: &str = "Invalid username or password";
const LOGIN_FAILED: &str = "An error occurred during login. Please try again.";

/// Login form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

fn login_page_with(status: StatusCode, error: &'static str) -> Response {
    (status, LoginTemplate { error: Some(error) }).into_response()
}

/// GET /admin
pub async fn admin_root() -> Redirect {
    Redirect::to(super::LOGIN_PATH)
}

/// Render the login page, or skip it when already signed in.
///
/// GET /admin/login
#[instrument(skip_all)]
pub async fn login_page(session: Session) -> Response {
    if current_admin(&session).await.is_some() {
        return Redirect::to(NEWS_LIST_PATH).into_response();
    }

    LoginTemplate { error: None }.into_response()
}

/// Verify credentials and establish the session.
///
/// POST /admin/login
#[instrument(skip(state, session))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username.is_empty() || form.password.is_empty() {
        return login_page_with(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    }

    let account = match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(account) => account,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Admin login rejected");
            return login_page_with(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS);
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin login failed");
            return login_page_with(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
        }
    };

    let admin = CurrentAdmin::from(&account);
    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!(error = %e, "Failed to store admin session");
        return login_page_with(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
    }

    set_sentry_user(admin.id, &admin.username);
    tracing::info!(admin_id = %admin.id, "Admin signed in");

    Redirect::to(NEWS_LIST_PATH).into_response()
}

/// Destroy the session and return to the login page.
///
/// GET /admin/logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!(error = %e, "Failed to destroy admin session");
    }
    clear_sentry_user();

    Redirect::to(super::LOGIN_PATH)
}
