//! Listing page state: search text, filter selection, sort order and view mode
//! over one catalog snapshot.
//!
//! Every mutation that can change the visible set recomputes it eagerly, so
//! [`ViewController::visible_results`] is a cheap read.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::Tool;
use crate::domain::search::{FilterCriteria, FilterDimension, SortStrategy, matches};

/// Platforms offered by the filter panel when the snapshot lists none.
pub const DEFAULT_PLATFORMS: [&str; 6] = ["Windows", "Mac", "Linux", "Web", "iOS", "Android"];

/// Presentation of the result list. Has no effect on which tools are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "list" => Self::List,
            _ => Self::Grid,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the listing page renders.
#[derive(Debug, Clone, Serialize)]
pub struct VisibleResults<'a> {
    pub tools: Vec<&'a Tool>,
    pub total: usize,
    pub active_filter_count: usize,
}

/// Session-local orchestrator of the filter and sort engine.
#[derive(Debug, Clone)]
pub struct ViewController {
    tools: Vec<Tool>,
    search_text: String,
    criteria: FilterCriteria,
    sort: SortStrategy,
    view_mode: ViewMode,
    visible: Vec<usize>,
}

impl ViewController {
    /// Creates a controller over `tools` with no search, no filters and the
    /// default sort.
    pub fn new(tools: Vec<Tool>) -> Self {
        let mut controller = Self {
            tools,
            search_text: String::new(),
            criteria: FilterCriteria::new(),
            sort: SortStrategy::default(),
            view_mode: ViewMode::default(),
            visible: Vec::new(),
        };
        controller.recompute();
        controller
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.recompute();
    }

    /// Flips one filter value and recomputes.
    pub fn toggle_filter_value(&mut self, dimension: FilterDimension, value: &str) {
        self.criteria.toggle(dimension, value);
        self.recompute();
    }

    /// Replaces the whole selection at once, e.g. from query parameters.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn set_sort_strategy(&mut self, strategy: SortStrategy) {
        self.sort = strategy;
        self.recompute();
    }

    /// Changes presentation only; the visible set is untouched.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Resets search text and every filter selection. Sort and view mode stay.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.criteria.clear();
        self.recompute();
    }

    pub fn visible_results(&self) -> VisibleResults<'_> {
        VisibleResults {
            tools: self.visible.iter().map(|&i| &self.tools[i]).collect(),
            total: self.visible.len(),
            active_filter_count: self.criteria.active_count(),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_strategy(&self) -> SortStrategy {
        self.sort
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Number of tools in the snapshot, before filtering.
    pub fn catalog_size(&self) -> usize {
        self.tools.len()
    }

    /// Distinct platforms in the snapshot, sorted.
    pub fn available_platforms(&self) -> Vec<String> {
        let platforms: BTreeSet<&str> = self
            .tools
            .iter()
            .flat_map(|t| t.platforms.iter().map(String::as_str))
            .collect();

        if platforms.is_empty() {
            DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect()
        } else {
            platforms.into_iter().map(str::to_string).collect()
        }
    }

    /// Distinct tags in the snapshot, sorted.
    pub fn available_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .tools
            .iter()
            .flat_map(|t| t.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_string).collect()
    }

    fn recompute(&mut self) {
        let tools = &self.tools;
        let mut visible: Vec<usize> = (0..tools.len())
            .filter(|&i| matches(&tools[i], &self.criteria, &self.search_text))
            .collect();
        visible.sort_by(|&a, &b| self.sort.compare(&tools[a], &tools[b]));
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PricingType;

    fn tool(
        name: &str,
        sponsored: bool,
        rating: f64,
        pricing: PricingType,
        platforms: &[&str],
    ) -> Tool {
        let mut t = Tool::new(name, name.to_lowercase(), name, "bim-software");
        t.sponsored = sponsored;
        t.rating = rating;
        t.pricing_type = Some(pricing);
        t.platforms = platforms.iter().map(|s| s.to_string()).collect();
        t.description = format!("{} description", name);
        t
    }

    fn controller() -> ViewController {
        ViewController::new(vec![
            tool("ARCHICAD", false, 4.3, PricingType::Paid, &["Windows", "Mac"]),
            tool("Revit", true, 4.5, PricingType::Paid, &["Windows"]),
            tool("Tekla", false, 4.4, PricingType::Freemium, &["Windows"]),
            tool("SketchUp", false, 4.1, PricingType::Free, &["Web", "Mac"]),
        ])
    }

    fn names(results: &VisibleResults<'_>) -> Vec<String> {
        results.tools.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_initial_results_use_default_sort() {
        let c = controller();
        let results = c.visible_results();

        assert_eq!(results.total, 4);
        assert_eq!(results.active_filter_count, 0);
        assert_eq!(names(&results), vec!["Revit", "Tekla", "ARCHICAD", "SketchUp"]);
    }

    #[test]
    fn test_active_filter_count_counts_values() {
        let mut c = controller();
        c.toggle_filter_value(FilterDimension::Platform, "Windows");
        c.toggle_filter_value(FilterDimension::Pricing, "free");
        c.toggle_filter_value(FilterDimension::Pricing, "paid");

        let results = c.visible_results();
        assert_eq!(results.active_filter_count, 3);
        assert_eq!(names(&results), vec!["Revit", "ARCHICAD"]);
    }

    #[test]
    fn test_toggle_twice_restores_results() {
        let mut c = controller();
        c.toggle_filter_value(FilterDimension::Pricing, "free");
        assert_eq!(c.visible_results().total, 1);

        c.toggle_filter_value(FilterDimension::Pricing, "free");
        assert_eq!(c.visible_results().total, 4);
    }

    #[test]
    fn test_search_text_filters_by_substring() {
        let mut c = controller();
        c.set_search_text("tek");

        assert_eq!(names(&c.visible_results()), vec!["Tekla"]);
    }

    #[test]
    fn test_sort_change_recomputes() {
        let mut c = controller();
        c.set_sort_strategy(SortStrategy::Rating);

        assert_eq!(
            names(&c.visible_results()),
            vec!["Revit", "Tekla", "ARCHICAD", "SketchUp"]
        );
        assert_eq!(c.sort_strategy(), SortStrategy::Rating);
    }

    #[test]
    fn test_view_mode_does_not_change_visible_set() {
        let mut c = controller();
        c.set_search_text("a");
        let before = names(&c.visible_results());

        c.set_view_mode(ViewMode::List);

        assert_eq!(c.view_mode(), ViewMode::List);
        assert_eq!(names(&c.visible_results()), before);
    }

    #[test]
    fn test_clear_filters_keeps_sort_and_view_mode() {
        let mut c = controller();
        c.set_search_text("revit");
        c.toggle_filter_value(FilterDimension::Platform, "Windows");
        c.set_sort_strategy(SortStrategy::MostViewed);
        c.set_view_mode(ViewMode::List);

        c.clear_filters();

        assert_eq!(c.search_text(), "");
        assert!(c.criteria().is_empty());
        assert_eq!(c.sort_strategy(), SortStrategy::MostViewed);
        assert_eq!(c.view_mode(), ViewMode::List);
        assert_eq!(c.visible_results().total, 4);
    }

    #[test]
    fn test_no_match_gives_empty_state() {
        let mut c = controller();
        c.set_search_text("zzz_no_match");

        let results = c.visible_results();
        assert!(results.tools.is_empty());
        assert_eq!(results.total, 0);
        assert_eq!(c.catalog_size(), 4);
    }

    #[test]
    fn test_available_platforms_and_tags() {
        let mut c = controller();
        assert_eq!(c.available_platforms(), vec!["Mac", "Web", "Windows"]);
        assert!(c.available_tags().is_empty());

        c = ViewController::new(vec![Tool::new("1", "x", "X", "c")]);
        assert_eq!(c.available_platforms().len(), DEFAULT_PLATFORMS.len());
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse_or_default("list"), ViewMode::List);
        assert_eq!(ViewMode::parse_or_default("table"), ViewMode::Grid);
    }
}
