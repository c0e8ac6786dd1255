//! Newsdesk Admin library.
//!
//! This crate provides the news administration panel as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! Every `/admin/news` route requires a signed-in admin. Sessions are stored
//! server-side and identified by a `SameSite=Strict`, `HttpOnly` cookie.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use middleware::create_session_layer;
use state::AppState;

/// Build the admin application over the given session store.
///
/// Sentry layers are added by the binary.
pub fn app<S>(state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    build_router(routes::routes(), state, store)
}

fn build_router<S>(routes: Router<AppState>, state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(store, state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    routes
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use axum::routing::get;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, Session};
    use url::Url;

    use newsdesk_core::AdminId;

    use super::*;
    use crate::config::AdminConfig;
    use crate::middleware::set_current_admin;
    use crate::models::CurrentAdmin;

    /// Nothing listens here, so every query fails fast.
    const UNREACHABLE_DB: &str = "postgres://newsdesk@127.0.0.1:1/newsdesk";

    fn test_config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from(UNREACHABLE_DB),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: Url::parse("http://localhost:3001").unwrap(),
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        }
    }

    async fn sign_in(session: Session) -> &'static str {
        let admin = CurrentAdmin {
            logged_in: true,
            id: AdminId::new(1),
            username: "editor".to_string(),
        };
        set_current_admin(&session, &admin).await.unwrap();
        "ok"
    }

    fn test_app() -> Router {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy(UNREACHABLE_DB)
            .unwrap();
        let state = AppState::new(test_config(), pool);
        let routes = routes::routes().route("/test/sign-in", get(sign_in));
        build_router(routes, state, MemoryStore::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn form_request(method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Sign in through the test route and return the session cookie.
    async fn signed_in_cookie(app: &Router) -> String {
        let response = send(app, get_request("/test/sign-in", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Strict"));
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let response = send(&app, get_request("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_readiness_reports_unreachable_database() {
        let app = test_app();
        let response = send(&app, get_request("/health/ready", None)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_admin_root_redirects_to_login() {
        let app = test_app();
        let response = send(&app, get_request("/admin", None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn test_protected_routes_redirect_without_session() {
        let app = test_app();
        for uri in ["/admin/news", "/admin/news/add", "/admin/news/edit/1"] {
            let response = send(&app, get_request(uri, None)).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location(&response), "/admin/login", "{uri}");
        }

        let response = send(&app, form_request("DELETE", "/admin/news/1", "", None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn test_unknown_session_cookie_redirects() {
        let app = test_app();
        let response = send(
            &app,
            get_request("/admin/news", Some("newsdesk_session=bogus")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn test_login_page_renders() {
        let app = test_app();
        let response = send(&app, get_request("/admin/login", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"name="username""#));
        assert!(body.contains(r#"name="password""#));
    }

    #[tokio::test]
    async fn test_login_page_redirects_when_signed_in() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get_request("/admin/login", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/news");
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let app = test_app();
        for body in ["username=editor&password=", "username=&password=secret", ""] {
            let response = send(&app, form_request("POST", "/admin/login", body, None)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(
                body_text(response)
                    .await
                    .contains("Username and password are required")
            );
        }
    }

    #[tokio::test]
    async fn test_login_database_failure_is_generic() {
        let app = test_app();
        let response = send(
            &app,
            form_request("POST", "/admin/login", "username=editor&password=secret", None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains("An error occurred during login. Please try again."));
        assert!(!body.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;

        let response = send(&app, get_request("/admin/logout", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");

        let response = send(&app, get_request("/admin/news/add", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn test_logout_without_session_redirects() {
        let app = test_app();
        let response = send(&app, get_request("/admin/logout", None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/login");
    }

    #[tokio::test]
    async fn test_news_list_shows_load_error() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            get_request("/admin/news?page=abc&search=%20", Some(&cookie)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Error loading news data"));
        assert!(body.contains("editor"));
    }

    #[tokio::test]
    async fn test_news_list_flash_codes() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            get_request("/admin/news?success=added", Some(&cookie)),
        )
        .await;
        let body = body_text(response).await;
        assert!(body.contains("News added successfully"));

        let response = send(
            &app,
            get_request("/admin/news?success=%3Cscript%3E", Some(&cookie)),
        )
        .await;
        let body = body_text(response).await;
        assert!(!body.contains("<script>"));
    }

    #[tokio::test]
    async fn test_add_page_lists_types() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get_request("/admin/news/add", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        for news_type in ["Business", "National", "International"] {
            assert!(body.contains(news_type));
        }
        assert!(body.contains("data-include"));
    }

    #[tokio::test]
    async fn test_add_validation_rerenders_with_input() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            form_request(
                "POST",
                "/admin/news/add",
                "type=Sports&contentName=Cup+final&contentUrl=https%3A%2F%2Fexample.com",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("Invalid type selected"));
        assert!(body.contains("Cup final"));
    }

    #[tokio::test]
    async fn test_add_insert_failure() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            form_request(
                "POST",
                "/admin/news/add",
                "type=Business&contentName=Markets&contentUrl=https%3A%2F%2Fexample.com",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains("An error occurred while adding news. Please try again."));
    }

    #[tokio::test]
    async fn test_edit_invalid_id_redirects() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get_request("/admin/news/edit/abc", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/news?error=invalid_id");
    }

    #[tokio::test]
    async fn test_edit_load_failure_redirects() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get_request("/admin/news/edit/3", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/news?error=load_failed");
    }

    #[tokio::test]
    async fn test_edit_update_failure_redirects() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            form_request(
                "POST",
                "/admin/news/edit/3",
                "type=Business&contentName=Markets&contentUrl=https%3A%2F%2Fexample.com",
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin/news?error=update_failed");
    }

    #[tokio::test]
    async fn test_delete_malformed_id_is_bad_request() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let request = form_request("DELETE", "/admin/news/abc", "", Some(&cookie));
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid news ID");
    }

    #[tokio::test]
    async fn test_delete_on_add_path_is_bad_request_json() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let request = form_request("DELETE", "/admin/news/add", "", Some(&cookie));
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid news ID");
    }

    #[tokio::test]
    async fn test_delete_on_add_path_requires_session() {
        let app = test_app();
        let response = send(&app, form_request("DELETE", "/admin/news/add", "", None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_delete_database_failure_is_server_error() {
        let app = test_app();
        let cookie = signed_in_cookie(&app).await;
        let request = form_request("DELETE", "/admin/news/5", "", Some(&cookie));
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_static_assets_served() {
        let app = test_app();
        let response = send(&app, get_request("/static/js/include.js", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("data-include"));
    }
}
