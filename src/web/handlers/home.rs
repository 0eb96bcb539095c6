//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::domain::entities::{Category, SiteStats};
use crate::state::AppState;
use crate::web::PageError;
use crate::web::views::ToolCard;

/// Featured tools shown on the home page.
const FEATURED_LIMIT: usize = 6;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub stats: SiteStats,
    pub categories: Vec<Category>,
    pub featured: Vec<ToolCard>,
}

/// `GET /`: site totals, categories and featured tools.
pub async fn home_handler(
    State(state): State<AppState>,
) -> Result<HomeTemplate, PageError> {
    let stats = state.catalog_service.stats().await?;
    let categories = state.catalog_service.list_categories().await?;
    let featured = state.catalog_service.featured_tools(FEATURED_LIMIT).await?;

    Ok(HomeTemplate {
        stats,
        categories,
        featured: ToolCard::list(&featured, &[]),
    })
}
