//! DTOs for category endpoint.

use serde::Serialize;

use crate::domain::entities::{Category, SiteStats};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    pub stats: SiteStats,
}
