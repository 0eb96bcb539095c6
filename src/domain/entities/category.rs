//! Category entity grouping catalog tools.

use serde::{Deserialize, Serialize};

/// A grouping of tools, e.g. "BIM Software" or "Drone Mapping".
///
/// `count` is a denormalized membership count computed by the store; the
/// engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
            icon: None,
            color: None,
            count: 0,
        }
    }
}

/// Aggregate numbers shown on the home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub total_tools: u64,
    pub total_categories: u64,
    pub total_views: u64,
}
