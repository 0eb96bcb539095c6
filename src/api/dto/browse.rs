//! Listing query parameters shared by the category page and `GET /api/tools`.
//!
//! Filter dimensions accept repeated keys and comma-separated values, so
//! `?platform=Web&platform=Mac` and `?platform=Web,Mac` are equivalent.
//! Unknown keys and unknown sort or view names are ignored.

use url::form_urlencoded;

use crate::application::view_controller::{ViewController, ViewMode};
use crate::domain::entities::Tool;
use crate::domain::search::{FilterCriteria, FilterDimension, SortStrategy};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseParams {
    pub q: String,
    pub criteria: FilterCriteria,
    pub sort: SortStrategy,
    pub view: ViewMode,
    /// Only used by the JSON endpoint; the category page takes it from the path.
    pub category: Option<String>,
}

impl BrowseParams {
    /// Parses a raw query string as delivered by `axum::extract::RawQuery`.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => params.q = value.trim().to_string(),
                "sort" => params.sort = SortStrategy::parse_or_default(&value),
                "view" => params.view = ViewMode::parse_or_default(&value),
                "category" => {
                    let value = value.trim();
                    params.category = (!value.is_empty()).then(|| value.to_string());
                }
                other => {
                    if let Ok(dimension) = other.parse::<FilterDimension>() {
                        for item in value.split(',') {
                            params.criteria.select(dimension, item);
                        }
                    }
                }
            }
        }

        params
    }

    /// Builds a controller over `tools` with these parameters applied.
    pub fn controller(&self, tools: Vec<Tool>) -> ViewController {
        let mut controller = ViewController::new(tools);
        controller.set_search_text(self.q.clone());
        controller.set_criteria(self.criteria.clone());
        controller.set_sort_strategy(self.sort);
        controller.set_view_mode(self.view);
        controller
    }

    /// Serializes back into a query string, e.g. for links that change one setting.
    pub fn to_query(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() {
            out.append_pair("q", &self.q);
        }
        for dimension in [
            FilterDimension::Platform,
            FilterDimension::Pricing,
            FilterDimension::Tag,
        ] {
            for value in self.criteria.values(dimension) {
                out.append_pair(dimension.as_str(), value);
            }
        }
        if self.sort != SortStrategy::default() {
            out.append_pair("sort", self.sort.as_str());
        }
        if self.view != ViewMode::default() {
            out.append_pair("view", self.view.as_str());
        }
        if let Some(category) = &self.category {
            out.append_pair("category", category);
        }
        out.finish()
    }
}
