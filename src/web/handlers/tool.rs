//! Tool detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
};

use crate::domain::presentation::domain_of;
use crate::domain::telemetry::TelemetryEvent;
use crate::state::AppState;
use crate::web::PageError;
use crate::web::handlers::compare::load_selection;
use crate::web::views::ToolCard;

const RELATED_LIMIT: usize = 3;

#[derive(Template, WebTemplate)]
#[template(path = "tool.html")]
pub struct ToolTemplate {
    pub tool: ToolCard,
    pub tagline: Option<String>,
    pub website: String,
    pub website_domain: Option<String>,
    pub all_platforms: Vec<String>,
    pub all_tags: Vec<String>,
    pub related: Vec<ToolCard>,
    pub compare_full: bool,
}

/// `GET /tool/{slug}`. Emits a `ToolViewed` event for the telemetry worker.
pub async fn tool_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<ToolTemplate, PageError> {
    let tool = state.catalog_service.get_tool(&slug).await?;
    state.telemetry.emit(TelemetryEvent::viewed(tool.slug.as_str()));

    let related = state
        .catalog_service
        .related_tools(&tool, RELATED_LIMIT)
        .await?;
    let selection = load_selection(&headers, state.site.compare_capacity);

    Ok(ToolTemplate {
        tool: ToolCard::new(&tool, selection.list()),
        tagline: tool.tagline.clone(),
        website_domain: domain_of(&tool.website),
        website: tool.website.clone(),
        all_platforms: tool.platforms.clone(),
        all_tags: tool.tags.clone(),
        related: ToolCard::list(&related, selection.list()),
        compare_full: selection.is_full(),
    })
}
