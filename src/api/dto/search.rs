//! DTOs for fuzzy search endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::ScoredTool;

/// Query parameters of `GET /api/search`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub slug: String,
    pub name: String,
    pub tagline: String,
    pub category: String,
    pub score: f64,
}

impl From<ScoredTool> for SearchResultItem {
    fn from(hit: ScoredTool) -> Self {
        Self {
            tagline: hit.tool.summary().to_string(),
            slug: hit.tool.slug,
            name: hit.tool.name,
            category: hit.tool.category,
            score: hit.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchResultItem>,
}
