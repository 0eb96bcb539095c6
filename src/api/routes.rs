//! API route configuration.
//!
//! The JSON API is public and read-only.

use crate::api::handlers::{
    categories_handler, get_tool_handler, list_tools_handler, search_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET /tools`         - Filtered, sorted listing
/// - `GET /tools/{slug}`  - Single tool (cache-backed)
/// - `GET /search`        - Fuzzy search
/// - `GET /categories`    - Categories with counts
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(list_tools_handler))
        .route("/tools/{slug}", get(get_tool_handler))
        .route("/search", get(search_handler))
        .route("/categories", get(categories_handler))
}
