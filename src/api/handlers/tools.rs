//! Handlers for JSON tool endpoints.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use tracing::{debug, error};

use crate::api::dto::browse::BrowseParams;
use crate::api::dto::tools::ToolListResponse;
use crate::domain::entities::Tool;
use crate::error::AppError;
use crate::state::AppState;

/// Filtered, sorted tool listing.
///
/// # Endpoint
///
/// `GET /api/tools?category=&q=&platform=&pricing=&tag=&sort=&view=`
///
/// Filter values may be repeated or comma-separated. An unknown `category`
/// yields an empty list rather than an error.
pub async fn list_tools_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ToolListResponse>, AppError> {
    let params = BrowseParams::from_query(query.as_deref());
    let tools = state
        .catalog_service
        .list_tools(params.category.as_deref())
        .await?;

    let controller = params.controller(tools);
    let visible = controller.visible_results();

    Ok(Json(ToolListResponse {
        total: controller.catalog_size(),
        matched: visible.total,
        active_filter_count: visible.active_filter_count,
        sort: controller.sort_strategy().as_str(),
        view: controller.view_mode().as_str(),
        tools: visible.tools.into_iter().cloned().collect(),
    }))
}

/// Single tool by slug.
///
/// # Endpoint
///
/// `GET /api/tools/{slug}`
///
/// # Cache Strategy
///
/// - **Cache hit**: returned directly
/// - **Cache miss**: loaded from the store, cache write spawned in the background
/// - **Cache error**: logged, falls back to the store
///
/// # Errors
///
/// Returns 404 Not Found if no tool has this slug.
pub async fn get_tool_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Tool>, AppError> {
    match state.cache.get_tool(&slug).await {
        Ok(Some(tool)) => return Ok(Json(tool)),
        Ok(None) => debug!("Cache MISS for tool {}", slug),
        Err(e) => error!("Cache error: {}", e),
    }

    let tool = state.catalog_service.get_tool(&slug).await?;

    let cache = state.cache.clone();
    let cached = tool.clone();
    tokio::spawn(async move {
        if let Err(e) = cache.set_tool(&cached, None).await {
            error!("Failed to cache tool: {}", e);
        }
    });

    Ok(Json(tool))
}
