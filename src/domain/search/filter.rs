//! Filter predicates for category and listing pages.
//!
//! Unlike the ranked fuzzy search, these predicates are exact: plain
//! case-insensitive substring matching for text and set membership for the
//! platform, pricing and tag dimensions. Every sub-predicate passes when its
//! selection is empty, and the overall predicate is their conjunction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::Tool;

/// One selectable filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Platform,
    Pricing,
    Tag,
}

impl FilterDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Pricing => "pricing",
            Self::Tag => "tag",
        }
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform" | "platforms" => Ok(Self::Platform),
            "pricing" | "pricing_type" | "pricingType" => Ok(Self::Pricing),
            "tag" | "tags" => Ok(Self::Tag),
            other => Err(format!("unknown filter dimension '{}'", other)),
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-local filter selection. All sets empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub platforms: BTreeSet<String>,
    pub pricing_types: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    fn values_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Platform => &mut self.platforms,
            FilterDimension::Pricing => &mut self.pricing_types,
            FilterDimension::Tag => &mut self.tags,
        }
    }

    pub fn values(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Platform => &self.platforms,
            FilterDimension::Pricing => &self.pricing_types,
            FilterDimension::Tag => &self.tags,
        }
    }

    /// Selects `value` if absent, deselects it if present.
    ///
    /// Returns `true` when the value is selected afterwards. Values are
    /// trimmed; blank ones are ignored and never selected.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let values = self.values_mut(dimension);
        if values.remove(value) {
            false
        } else {
            values.insert(value.to_string());
            true
        }
    }

    /// Selects `value` regardless of its current state. Blank values are ignored.
    pub fn select(&mut self, dimension: FilterDimension, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.values_mut(dimension).insert(value.to_string());
        }
    }

    pub fn is_selected(&self, dimension: FilterDimension, value: &str) -> bool {
        self.values(dimension).contains(value)
    }

    /// Number of individually selected values across all dimensions.
    pub fn active_count(&self) -> usize {
        self.platforms.len() + self.pricing_types.len() + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn clear(&mut self) {
        self.platforms.clear();
        self.pricing_types.clear();
        self.tags.clear();
    }
}

/// Case-insensitive substring match on name, description and tags.
///
/// Blank search text matches every tool.
pub fn matches_text(tool: &Tool, search_text: &str) -> bool {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    tool.name.to_lowercase().contains(&needle)
        || tool.description.to_lowercase().contains(&needle)
        || tool.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// True when no platform is selected or the tool runs on any selected one.
pub fn matches_platform(tool: &Tool, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || tool.platforms.iter().any(|p| selected.contains(p))
}

/// True when no pricing type is selected or the tool's type is selected.
///
/// A tool without a pricing type never satisfies a non-empty selection.
pub fn matches_pricing(tool: &Tool, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || tool
            .pricing_type
            .is_some_and(|p| selected.contains(p.as_str()))
}

/// True when no tag is selected or the tool carries any selected tag.
pub fn matches_tags(tool: &Tool, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || tool.tags.iter().any(|t| selected.contains(t))
}

/// Full predicate: text AND platform AND pricing AND tags.
pub fn matches(tool: &Tool, criteria: &FilterCriteria, search_text: &str) -> bool {
    matches_text(tool, search_text)
        && matches_platform(tool, &criteria.platforms)
        && matches_pricing(tool, &criteria.pricing_types)
        && matches_tags(tool, &criteria.tags)
}

/// Applies [`matches`] to a collection, preserving order.
pub fn filter_tools<'a>(
    tools: impl IntoIterator<Item = &'a Tool>,
    criteria: &FilterCriteria,
    search_text: &str,
) -> Vec<&'a Tool> {
    tools
        .into_iter()
        .filter(|tool| matches(tool, criteria, search_text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PricingType;

    fn tool(slug: &str, pricing: Option<PricingType>, platforms: &[&str], tags: &[&str]) -> Tool {
        let mut t = Tool::new(slug, slug, slug.to_uppercase(), "cat");
        t.pricing_type = pricing;
        t.platforms = platforms.iter().map(|s| s.to_string()).collect();
        t.tags = tags.iter().map(|s| s.to_string()).collect();
        t
    }

    fn sample() -> Vec<Tool> {
        vec![
            tool("free-one", Some(PricingType::Free), &["Windows"], &["bim"]),
            tool("paid-one", Some(PricingType::Paid), &["Mac", "Web"], &["estimating"]),
            tool("freemium-one", Some(PricingType::Freemium), &["Web"], &["bim", "cloud"]),
            tool("unknown", None, &[], &[]),
        ]
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::new();
        for t in sample() {
            assert!(matches(&t, &criteria, ""));
        }
    }

    #[test]
    fn test_pricing_filter_keeps_only_free() {
        let mut criteria = FilterCriteria::new();
        criteria.select(FilterDimension::Pricing, "free");

        let tools = sample();
        let kept = filter_tools(&tools[..3], &criteria, "");

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].slug, "free-one");
    }

    #[test]
    fn test_missing_pricing_type_never_matches_selection() {
        let mut criteria = FilterCriteria::new();
        criteria.select(FilterDimension::Pricing, "free");
        criteria.select(FilterDimension::Pricing, "paid");

        let tools = sample();
        assert!(!matches(&tools[3], &criteria, ""));
    }

    #[test]
    fn test_platform_filter_is_any_of() {
        let mut criteria = FilterCriteria::new();
        criteria.select(FilterDimension::Platform, "Windows");
        criteria.select(FilterDimension::Platform, "Mac");

        let tools = sample();
        let slugs: Vec<&str> = filter_tools(&tools, &criteria, "")
            .iter()
            .map(|t| t.slug.as_str())
            .collect();

        assert_eq!(slugs, vec!["free-one", "paid-one"]);
    }

    #[test]
    fn test_tag_filter_is_any_of() {
        let mut criteria = FilterCriteria::new();
        criteria.select(FilterDimension::Tag, "cloud");

        let tools = sample();
        let kept = filter_tools(&tools, &criteria, "");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].slug, "freemium-one");
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let mut criteria = FilterCriteria::new();
        criteria.select(FilterDimension::Platform, "Web");
        criteria.select(FilterDimension::Tag, "bim");

        let tools = sample();
        let kept = filter_tools(&tools, &criteria, "");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].slug, "freemium-one");
    }

    #[test]
    fn test_text_matches_name_description_and_tags() {
        let mut t = tool("x", None, &[], &["Point Cloud"]);
        t.name = "Recap Pro".to_string();
        t.description = "Reality capture for laser scans".to_string();

        assert!(matches_text(&t, "recap"));
        assert!(matches_text(&t, "LASER"));
        assert!(matches_text(&t, "cloud"));
        assert!(matches_text(&t, "   "));
        assert!(!matches_text(&t, "drone"));
    }

    #[test]
    fn test_text_is_exact_substring_not_fuzzy() {
        let mut t = tool("x", None, &[], &[]);
        t.name = "Autodesk Revit".to_string();
        assert!(!matches_text(&t, "revt"));
    }

    #[test]
    fn test_toggle_and_active_count() {
        let mut criteria = FilterCriteria::new();

        assert!(criteria.toggle(FilterDimension::Platform, "Windows"));
        assert!(criteria.toggle(FilterDimension::Pricing, "free"));
        assert!(criteria.toggle(FilterDimension::Pricing, "paid"));
        assert_eq!(criteria.active_count(), 3);

        assert!(!criteria.toggle(FilterDimension::Pricing, "free"));
        assert_eq!(criteria.active_count(), 2);
        assert!(!criteria.is_selected(FilterDimension::Pricing, "free"));

        criteria.clear();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_select_ignores_blank_values() {
        let mut criteria = FilterCriteria::new();
        criteria.select(FilterDimension::Tag, "  ");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_toggle_trims_and_ignores_blank_values() {
        let mut criteria = FilterCriteria::new();

        assert!(!criteria.toggle(FilterDimension::Tag, ""));
        assert!(!criteria.toggle(FilterDimension::Platform, "  \t"));
        assert_eq!(criteria.active_count(), 0);

        assert!(criteria.toggle(FilterDimension::Platform, " Web "));
        assert!(criteria.is_selected(FilterDimension::Platform, "Web"));
        assert!(!criteria.toggle(FilterDimension::Platform, "Web"));
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("platform".parse::<FilterDimension>(), Ok(FilterDimension::Platform));
        assert_eq!("pricing".parse::<FilterDimension>(), Ok(FilterDimension::Pricing));
        assert_eq!("tags".parse::<FilterDimension>(), Ok(FilterDimension::Tag));
        assert!("brand".parse::<FilterDimension>().is_err());
    }
}
