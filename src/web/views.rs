//! Pre-formatted view models handed to the templates.
//!
//! Templates only print strings and test booleans; all formatting happens here.

use crate::domain::entities::{PricingType, Tool};
use crate::domain::presentation::{
    cta_text, format_commission, format_pricing, logo_url, rating_stars,
};

/// Platforms and tags shown on a card before "+N more".
const CARD_LIST_LIMIT: usize = 3;

/// One tool as rendered in grids, lists, search results and the compare table.
#[derive(Debug, Clone)]
pub struct ToolCard {
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    pub category_slug: String,
    pub logo_url: String,
    pub pricing: String,
    pub rating: String,
    pub stars: String,
    pub review_count: u32,
    pub views: u64,
    pub platforms: Vec<String>,
    pub more_platforms: usize,
    pub tags: Vec<String>,
    pub more_tags: usize,
    pub verified: bool,
    pub sponsored: bool,
    pub link_type: &'static str,
    pub cta: &'static str,
    pub commission: Option<String>,
    pub cookie_days: Option<String>,
    pub outbound_href: String,
    pub in_compare: bool,
}

impl ToolCard {
    pub fn new(tool: &Tool, compare_selection: &[String]) -> Self {
        let (platforms, more_platforms) = truncated(&tool.platforms);
        let (tags, more_tags) = truncated(&tool.tags);

        Self {
            slug: tool.slug.clone(),
            name: tool.name.clone(),
            summary: tool.summary().to_string(),
            description: tool.description.clone(),
            category: tool.category.clone(),
            category_slug: tool.category_slug.clone(),
            logo_url: logo_url(tool),
            pricing: format_pricing(tool.pricing_type, &tool.pricing),
            rating: format!("{:.1}", tool.rating),
            stars: rating_stars(tool.rating),
            review_count: tool.review_count,
            views: tool.views,
            platforms,
            more_platforms,
            tags,
            more_tags,
            verified: tool.verified,
            sponsored: tool.sponsored,
            link_type: tool.link_type.as_str(),
            cta: cta_text(tool.link_type),
            commission: format_commission(tool.commission.as_deref()),
            cookie_days: tool.cookie_days.clone(),
            outbound_href: format!("/go/{}", tool.slug),
            in_compare: compare_selection.iter().any(|s| *s == tool.slug),
        }
    }

    pub fn list<'a>(
        tools: impl IntoIterator<Item = &'a Tool>,
        compare_selection: &[String],
    ) -> Vec<Self> {
        tools
            .into_iter()
            .map(|t| Self::new(t, compare_selection))
            .collect()
    }
}

fn truncated(values: &[String]) -> (Vec<String>, usize) {
    let shown = values.iter().take(CARD_LIST_LIMIT).cloned().collect();
    (shown, values.len().saturating_sub(CARD_LIST_LIMIT))
}

/// A checkbox or select option.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Pricing filter options in display order.
pub fn pricing_options(is_selected: impl Fn(&str) -> bool) -> Vec<OptionView> {
    PricingType::ALL
        .iter()
        .map(|p| OptionView::new(p.as_str(), p.label(), is_selected(p.as_str())))
        .collect()
}
