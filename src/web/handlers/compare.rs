//! Comparison table and the cookie-backed selection endpoints.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use tracing::debug;

use crate::application::services::split_list;
use crate::domain::comparison::{AddOutcome, ComparisonSelection};
use crate::state::AppState;
use crate::web::PageError;
use crate::web::compare_cookie::CookieScope;
use crate::web::forms::CompareForm;
use crate::web::views::ToolCard;

/// Suggestions listed under the table while there is room left.
const CANDIDATE_LIMIT: usize = 6;

/// Loads the visitor's comparison selection from the request cookies.
pub fn load_selection(headers: &HeaderMap, capacity: usize) -> ComparisonSelection<CookieScope> {
    ComparisonSelection::load(CookieScope::from_headers(headers), capacity)
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated slugs; overrides the cookie selection when present.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tools: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub notice: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "compare.html")]
pub struct CompareTemplate {
    pub tools: Vec<ToolCard>,
    pub candidates: Vec<ToolCard>,
    pub capacity: usize,
    pub is_full: bool,
    pub from_query: bool,
    pub notice: Option<String>,
}

/// `GET /compare`
pub async fn compare_handler(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
    headers: HeaderMap,
) -> Result<CompareTemplate, PageError> {
    let capacity = state.site.compare_capacity;
    let selection = load_selection(&headers, capacity);

    let (slugs, from_query) = match query.tools.as_deref() {
        Some(raw) => {
            let mut slugs = split_list(raw);
            slugs.truncate(capacity);
            (slugs, true)
        }
        None => (selection.list().to_vec(), false),
    };

    let tools = state.comparison_service.resolve(&slugs).await?;
    let is_full = tools.len() >= capacity;
    let candidates = if is_full {
        Vec::new()
    } else {
        state
            .comparison_service
            .candidates(&slugs, CANDIDATE_LIMIT)
            .await?
    };

    let notice = query.notice.as_deref().map(|n| match n {
        "full" => format!(
            "You can compare up to {} tools. Remove one to add another.",
            capacity
        ),
        _ => "Comparison updated.".to_string(),
    });

    Ok(CompareTemplate {
        tools: ToolCard::list(&tools, &slugs),
        candidates: ToolCard::list(&candidates, &slugs),
        capacity,
        is_full,
        from_query,
        notice,
    })
}

/// `POST /compare/add`
pub async fn compare_add_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CompareForm>,
) -> Result<Response, PageError> {
    // Unknown slugs never enter the cookie.
    let tool = state.catalog_service.get_tool(form.slug.trim()).await?;

    let mut selection = load_selection(&headers, state.site.compare_capacity);
    let outcome = selection.add(&tool.slug);
    debug!(slug = %tool.slug, ?outcome, "Compare add");

    let target = match outcome {
        AddOutcome::CapacityReached => "/compare?notice=full".to_string(),
        AddOutcome::Added | AddOutcome::AlreadyPresent => form.redirect_target().to_string(),
    };
    Ok(finish(selection, &target))
}

/// `POST /compare/remove`
pub async fn compare_remove_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CompareForm>,
) -> Response {
    let mut selection = load_selection(&headers, state.site.compare_capacity);
    selection.remove(&form.slug);
    finish(selection, form.redirect_target())
}

/// `POST /compare/clear`
pub async fn compare_clear_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CompareForm>,
) -> Response {
    let mut selection = load_selection(&headers, state.site.compare_capacity);
    selection.clear();
    finish(selection, form.redirect_target())
}

/// 303 back to `target` with the updated cookie attached.
fn finish(selection: ComparisonSelection<CookieScope>, target: &str) -> Response {
    let mut headers = HeaderMap::new();
    selection.into_scope().write_to(&mut headers);
    (headers, Redirect::to(target)).into_response()
}
