//! News management route handlers.
//!
//! Flash messages travel as short codes on the list URL (`?success=added`,
//! `?error=not_found`) and are mapped to fixed text here, so nothing from the
//! query string is echoed into the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use newsdesk_core::{NewsDraft, NewsId, NewsType, PageRequest, Pagination, SearchFilter};

use crate::db::{NewsRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::{CurrentAdmin, NewsItem};
use crate::state::AppState;

use super::NEWS_LIST_PATH;

const LOAD_FAILED: &str = "Error loading news data";
const ADD_FAILED: &str = "An error occurred while adding news. Please try again.";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Success flash codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added,
    Updated,
}

impl Notice {
    const fn code(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "added" => Some(Self::Added),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::Added => "News added successfully",
            Self::Updated => "News updated successfully",
        }
    }
}

/// Error flash codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    InvalidId,
    NotFound,
    LoadFailed,
    UpdateFailed,
}

impl Alert {
    const fn code(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::NotFound => "not_found",
            Self::LoadFailed => "load_failed",
            Self::UpdateFailed => "update_failed",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid_id" => Some(Self::InvalidId),
            "not_found" => Some(Self::NotFound),
            "load_failed" => Some(Self::LoadFailed),
            "update_failed" => Some(Self::UpdateFailed),
            _ => None,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::InvalidId => "Invalid news ID",
            Self::NotFound => "News not found",
            Self::LoadFailed => LOAD_FAILED,
            Self::UpdateFailed => "An error occurred while updating news",
        }
    }
}

fn redirect_with_notice(notice: Notice) -> Response {
    Redirect::to(&format!("{NEWS_LIST_PATH}?success={}", notice.code())).into_response()
}

fn redirect_with_alert(alert: Alert) -> Response {
    Redirect::to(&format!("{NEWS_LIST_PATH}?error={}", alert.code())).into_response()
}

/// Parse a news ID path segment. Only positive integers are valid.
fn parse_news_id(raw: &str) -> Option<NewsId> {
    raw.parse::<i32>().ok().filter(|id| *id > 0).map(NewsId::new)
}

// =============================================================================
// List
// =============================================================================

/// News list query parameters.
///
/// `page` is kept as a string so a malformed value falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct NewsListQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// News row view for templates.
#[derive(Debug, Clone)]
pub struct NewsRowView {
    pub id: i32,
    pub news_type: &'static str,
    pub content_name: String,
    pub content_url: String,
    pub created_at: String,
}

impl From<&NewsItem> for NewsRowView {
    fn from(item: &NewsItem) -> Self {
        Self {
            id: item.id.as_i32(),
            news_type: item.news_type.as_str(),
            content_name: item.content_name.clone(),
            content_url: item.content_url.clone(),
            created_at: item.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// A numbered link in the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub url: String,
    pub is_current: bool,
}

/// Pager view for templates.
#[derive(Debug, Clone, Default)]
pub struct PagerView {
    pub current_page: u32,
    pub total_pages: i64,
    pub total_count: i64,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    pub links: Vec<PageLink>,
}

impl PagerView {
    fn new(pagination: &Pagination, search: Option<&SearchFilter>) -> Self {
        let url = |page: u32| page_url(page, search);
        let last = u32::try_from(pagination.total_pages).unwrap_or(u32::MAX);

        Self {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
            total_count: pagination.total_count,
            previous_url: pagination.previous().map(url),
            next_url: pagination.next().map(url),
            links: (1..=last)
                .map(|number| PageLink {
                    number,
                    url: url(number),
                    is_current: number == pagination.current_page,
                })
                .collect(),
        }
    }
}

/// List URL for `page`, keeping the search term.
fn page_url(page: u32, search: Option<&SearchFilter>) -> String {
    match search {
        Some(filter) => {
            let term: String =
                url::form_urlencoded::byte_serialize(filter.term().as_bytes()).collect();
            format!("{NEWS_LIST_PATH}?search={term}&page={page}")
        }
        None => format!("{NEWS_LIST_PATH}?page={page}"),
    }
}

/// News list template.
#[derive(Template, WebTemplate)]
#[template(path = "news/index.html")]
pub struct NewsIndexTemplate {
    pub admin: CurrentAdmin,
    pub items: Vec<NewsRowView>,
    pub search: String,
    pub pager: PagerView,
    pub success: Option<&'static str>,
    pub error: Option<&'static str>,
}

async fn load_page(
    repo: &NewsRepository<'_>,
    filter: Option<&SearchFilter>,
    request: PageRequest,
    page_size: u32,
) -> Result<(Vec<NewsItem>, i64), RepositoryError> {
    let total_count = repo.count(filter).await?;
    let items = repo
        .list(filter, i64::from(page_size), request.offset(page_size))
        .await?;
    Ok((items, total_count))
}

/// Paginated, searchable news list.
///
/// GET /admin/news
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<NewsListQuery>,
) -> NewsIndexTemplate {
    let filter = SearchFilter::parse(query.search.as_deref());
    let request = PageRequest::parse(query.page.as_deref());
    let page_size = PageRequest::DEFAULT_PAGE_SIZE;
    let repo = NewsRepository::new(state.pool());

    let (items, total_count, load_error) =
        match load_page(&repo, filter.as_ref(), request, page_size).await {
            Ok((items, total_count)) => (items, total_count, None),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load news list");
                (Vec::new(), 0, Some(LOAD_FAILED))
            }
        };

    let pagination = Pagination::new(request, page_size, total_count);

    NewsIndexTemplate {
        admin,
        items: items.iter().map(NewsRowView::from).collect(),
        search: filter
            .as_ref()
            .map(|f| f.term().to_string())
            .unwrap_or_default(),
        pager: PagerView::new(&pagination, filter.as_ref()),
        success: query
            .success
            .as_deref()
            .and_then(Notice::from_code)
            .map(Notice::message),
        error: load_error.or_else(|| {
            query
                .error
                .as_deref()
                .and_then(Alert::from_code)
                .map(Alert::message)
        }),
    }
}

// =============================================================================
// Add / Edit
// =============================================================================

/// Submitted news form fields.
///
/// Fields are optional so an omitted field can be told apart from an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct NewsForm {
    #[serde(rename = "type")]
    pub news_type: Option<String>,
    #[serde(rename = "contentName")]
    pub content_name: Option<String>,
    #[serde(rename = "contentUrl")]
    pub content_url: Option<String>,
}

impl NewsForm {
    fn validate(&self) -> Result<NewsDraft, newsdesk_core::NewsFormError> {
        NewsDraft::parse(
            self.news_type.as_deref().unwrap_or_default(),
            self.content_name.as_deref().unwrap_or_default(),
            self.content_url.as_deref().unwrap_or_default(),
        )
    }
}

/// Values shown in the news form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFormView {
    pub news_type: String,
    pub content_name: String,
    pub content_url: String,
}

impl NewsFormView {
    /// Echo submitted values back into the form.
    fn submitted(form: &NewsForm) -> Self {
        Self {
            news_type: form.news_type.clone().unwrap_or_default(),
            content_name: form.content_name.clone().unwrap_or_default(),
            content_url: form.content_url.clone().unwrap_or_default(),
        }
    }

    /// The stored record with any submitted fields laid over it.
    fn merged(item: &NewsItem, form: &NewsForm) -> Self {
        Self {
            news_type: form
                .news_type
                .clone()
                .unwrap_or_else(|| item.news_type.as_str().to_string()),
            content_name: form
                .content_name
                .clone()
                .unwrap_or_else(|| item.content_name.clone()),
            content_url: form
                .content_url
                .clone()
                .unwrap_or_else(|| item.content_url.clone()),
        }
    }
}

impl From<&NewsItem> for NewsFormView {
    fn from(item: &NewsItem) -> Self {
        Self {
            news_type: item.news_type.as_str().to_string(),
            content_name: item.content_name.clone(),
            content_url: item.content_url.clone(),
        }
    }
}

/// An entry in the type dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOption {
    pub name: &'static str,
    pub selected: bool,
}

fn type_options(selected: &str) -> Vec<TypeOption> {
    NewsType::ALL
        .iter()
        .map(|t| TypeOption {
            name: t.as_str(),
            selected: t.as_str() == selected,
        })
        .collect()
}

/// Add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "news/form.html")]
pub struct NewsFormTemplate {
    pub admin: CurrentAdmin,
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub type_options: Vec<TypeOption>,
    pub form: NewsFormView,
    pub created_at: Option<String>,
    pub error: Option<String>,
}

impl NewsFormTemplate {
    fn add(admin: CurrentAdmin, form: NewsFormView, error: Option<String>) -> Self {
        Self {
            admin,
            heading: "Add News",
            action: "/admin/news/add".to_string(),
            submit_label: "Add News",
            type_options: type_options(&form.news_type),
            form,
            created_at: None,
            error,
        }
    }

    fn edit(
        admin: CurrentAdmin,
        item: &NewsItem,
        form: NewsFormView,
        error: Option<String>,
    ) -> Self {
        Self {
            admin,
            heading: "Edit News",
            action: format!("/admin/news/edit/{}", item.id),
            submit_label: "Update News",
            type_options: type_options(&form.news_type),
            form,
            created_at: Some(item.created_at.format(DATE_FORMAT).to_string()),
            error,
        }
    }
}

/// Empty add form.
///
/// GET /admin/news/add
#[instrument(skip_all)]
pub async fn add_page(RequireAdminAuth(admin): RequireAdminAuth) -> NewsFormTemplate {
    NewsFormTemplate::add(admin, NewsFormView::default(), None)
}

/// Create a news item.
///
/// POST /admin/news/add
#[instrument(skip(admin, state))]
pub async fn add(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<NewsForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(e) => {
            let template =
                NewsFormTemplate::add(admin, NewsFormView::submitted(&form), Some(e.to_string()));
            return (StatusCode::UNPROCESSABLE_ENTITY, template).into_response();
        }
    };

    match NewsRepository::new(state.pool()).insert(&draft).await {
        Ok(id) => {
            tracing::info!(news_id = %id, "News added");
            redirect_with_notice(Notice::Added)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to add news");
            let template = NewsFormTemplate::add(
                admin,
                NewsFormView::submitted(&form),
                Some(ADD_FAILED.to_string()),
            );
            (StatusCode::INTERNAL_SERVER_ERROR, template).into_response()
        }
    }
}

/// Edit form for an existing item.
///
/// GET /admin/news/edit/{id}
#[instrument(skip(admin, state))]
pub async fn edit_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_news_id(&id) else {
        return redirect_with_alert(Alert::InvalidId);
    };

    match NewsRepository::new(state.pool()).get_by_id(id).await {
        Ok(Some(item)) => {
            NewsFormTemplate::edit(admin, &item, NewsFormView::from(&item), None).into_response()
        }
        Ok(None) => redirect_with_alert(Alert::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load news for edit");
            redirect_with_alert(Alert::LoadFailed)
        }
    }
}

/// Update an existing item.
///
/// POST /admin/news/edit/{id}
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NewsForm>,
) -> Response {
    let Some(id) = parse_news_id(&id) else {
        return redirect_with_alert(Alert::InvalidId);
    };
    let repo = NewsRepository::new(state.pool());

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(validation) => {
            return match repo.get_by_id(id).await {
                Ok(Some(item)) => {
                    let template = NewsFormTemplate::edit(
                        admin,
                        &item,
                        NewsFormView::merged(&item, &form),
                        Some(validation.to_string()),
                    );
                    (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
                }
                Ok(None) => redirect_with_alert(Alert::NotFound),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to reload news after validation error");
                    redirect_with_alert(Alert::LoadFailed)
                }
            };
        }
    };

    match repo.update(id, &draft).await {
        Ok(item) => {
            tracing::info!(news_id = %item.id, "News updated");
            redirect_with_notice(Notice::Updated)
        }
        Err(RepositoryError::NotFound) => redirect_with_alert(Alert::NotFound),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update news");
            redirect_with_alert(Alert::UpdateFailed)
        }
    }
}

// =============================================================================
// Delete
// =============================================================================

/// JSON body of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Delete a news item.
///
/// DELETE /admin/news/{id}
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_news_id(&id).ok_or_else(invalid_news_id)?;

    match NewsRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(news_id = %id, "News deleted");
            Ok(Json(DeleteResponse {
                success: true,
                message: "News deleted successfully",
            }))
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound("News not found".to_string())),
        Err(e) => Err(AppError::Database(e)),
    }
}

/// Delete sent to the fixed add path, which is never a news ID.
///
/// DELETE /admin/news/add
pub async fn remove_without_id(RequireAdminAuth(_admin): RequireAdminAuth) -> AppError {
    invalid_news_id()
}

fn invalid_news_id() -> AppError {
    AppError::BadRequest("Invalid news ID".to_string())
}
