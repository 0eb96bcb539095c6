//! Handler for JSON category listing.

use axum::{Json, extract::State};

use crate::api::dto::categories::CategoriesResponse;
use crate::error::AppError;
use crate::state::AppState;

/// All categories with their tool counts, plus site totals.
///
/// # Endpoint
///
/// `GET /api/categories`
pub async fn categories_handler(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.catalog_service.list_categories().await?;
    let stats = state.catalog_service.stats().await?;

    Ok(Json(CategoriesResponse { categories, stats }))
}
