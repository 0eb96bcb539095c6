//! Handler for JSON fuzzy search.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::search::{SearchParams, SearchResponse, SearchResultItem};
use crate::domain::search::MAX_RESULTS;
use crate::error::AppError;
use crate::state::AppState;

/// Typo-tolerant search across name, tagline, description, tags and category.
///
/// # Endpoint
///
/// `GET /api/search?q=revt&limit=5`
///
/// A blank `q` returns an empty result set. `limit` defaults to and is
/// capped at 10.
///
/// # Response
///
/// ```json
/// {
///   "query": "revt",
///   "total": 1,
///   "results": [
///     { "slug": "revit", "name": "Autodesk Revit", "tagline": "...", "category": "BIM Software", "score": 2.25 }
///   ]
/// }
/// ```
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let limit = params.limit.unwrap_or(MAX_RESULTS);
    let hits = state.search_service.search(&params.q, limit).await?;

    let results: Vec<SearchResultItem> = hits.into_iter().map(Into::into).collect();

    Ok(Json(SearchResponse {
        query: params.q.trim().to_string(),
        total: results.len(),
        results,
    }))
}
