//! HTML search results page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};

use crate::api::dto::search::SearchParams;
use crate::domain::search::MAX_RESULTS;
use crate::state::AppState;
use crate::web::PageError;
use crate::web::views::ToolCard;

#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub q: String,
    pub results: Vec<ToolCard>,
}

/// `GET /search?q=`
pub async fn search_page_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<SearchTemplate, PageError> {
    let q = params.q.trim().to_string();
    let limit = params.limit.unwrap_or(MAX_RESULTS);
    let hits = state.search_service.search(&q, limit).await?;

    let results = hits.iter().map(|hit| ToolCard::new(&hit.tool, &[])).collect();
    Ok(SearchTemplate { q, results })
}
