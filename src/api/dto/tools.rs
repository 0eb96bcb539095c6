//! DTOs for tool endpoints.

use serde::Serialize;

use crate::domain::entities::Tool;

/// Response of `GET /api/tools`.
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<Tool>,
    /// Tools in the listing before filtering.
    pub total: usize,
    /// Tools matching the search text and filters.
    pub matched: usize,
    pub active_filter_count: usize,
    pub sort: &'static str,
    pub view: &'static str,
}
