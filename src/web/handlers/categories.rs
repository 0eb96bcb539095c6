//! Category index and category listing pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
};

use crate::api::dto::browse::BrowseParams;
use crate::application::view_controller::ViewMode;
use crate::domain::entities::Category;
use crate::domain::search::{FilterDimension, SortStrategy};
use crate::state::AppState;
use crate::web::PageError;
use crate::web::handlers::compare::load_selection;
use crate::web::views::{OptionView, ToolCard, pricing_options};

#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub categories: Vec<Category>,
}

/// `GET /categories`
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<CategoriesTemplate, PageError> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(CategoriesTemplate { categories })
}

#[derive(Template, WebTemplate)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub category: Category,
    pub tools: Vec<ToolCard>,
    pub shown: usize,
    pub catalog_size: usize,
    pub active_filter_count: usize,
    pub q: String,
    pub platforms: Vec<OptionView>,
    pub pricing: Vec<OptionView>,
    pub tags: Vec<OptionView>,
    pub sorts: Vec<OptionView>,
    pub list_view: bool,
    pub sort: String,
    pub grid_href: String,
    pub list_href: String,
    pub clear_href: String,
}

/// `GET /category/{slug}`: the category's tools driven by the view controller.
///
/// Accepts `q`, `platform`, `pricing`, `tag` (repeated or comma-separated),
/// `sort` and `view`.
pub async fn category_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<CategoryTemplate, PageError> {
    let category = state.catalog_service.get_category(&slug).await?;
    let tools = state.catalog_service.list_tools(Some(&category.slug)).await?;

    let mut params = BrowseParams::from_query(query.as_deref());
    params.category = None;

    let controller = params.controller(tools);
    let visible = controller.visible_results();
    let selection = load_selection(&headers, state.site.compare_capacity);

    let criteria = controller.criteria();
    let platforms = controller
        .available_platforms()
        .into_iter()
        .map(|p| {
            let selected = criteria.is_selected(FilterDimension::Platform, &p);
            OptionView::new(p.clone(), p, selected)
        })
        .collect();
    let tags = controller
        .available_tags()
        .into_iter()
        .map(|t| {
            let selected = criteria.is_selected(FilterDimension::Tag, &t);
            OptionView::new(t.clone(), t, selected)
        })
        .collect();
    let pricing = pricing_options(|v| criteria.is_selected(FilterDimension::Pricing, v));
    let sorts = SortStrategy::ALL
        .iter()
        .map(|s| OptionView::new(s.as_str(), s.label(), *s == controller.sort_strategy()))
        .collect();

    let base = format!("/category/{}", category.slug);
    let href = |p: &BrowseParams| {
        let query = p.to_query();
        if query.is_empty() {
            base.clone()
        } else {
            format!("{}?{}", base, query)
        }
    };

    let grid_href = href(&BrowseParams {
        view: ViewMode::Grid,
        ..params.clone()
    });
    let list_href = href(&BrowseParams {
        view: ViewMode::List,
        ..params.clone()
    });
    let clear_href = href(&BrowseParams {
        sort: params.sort,
        view: params.view,
        ..BrowseParams::default()
    });

    Ok(CategoryTemplate {
        tools: ToolCard::list(visible.tools.iter().copied(), selection.list()),
        shown: visible.total,
        catalog_size: controller.catalog_size(),
        active_filter_count: visible.active_filter_count,
        q: controller.search_text().to_string(),
        platforms,
        pricing,
        tags,
        sorts,
        list_view: controller.view_mode() == ViewMode::List,
        sort: controller.sort_strategy().as_str().to_string(),
        grid_href,
        list_href,
        clear_href,
        category,
    })
}
