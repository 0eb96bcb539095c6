//! Ranking policies for filtered tool lists.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::Tool;

/// Named ordering applied to listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortStrategy {
    /// Sponsored tools first, then by rating.
    #[default]
    #[serde(rename = "sponsored")]
    Sponsored,
    #[serde(rename = "rating")]
    Rating,
    /// Ordered by view count; the catalog has no reliable creation time.
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "most-viewed")]
    MostViewed,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 4] = [
        Self::Sponsored,
        Self::Rating,
        Self::Newest,
        Self::MostViewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sponsored => "sponsored",
            Self::Rating => "rating",
            Self::Newest => "newest",
            Self::MostViewed => "most-viewed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sponsored => "Sponsored First",
            Self::Rating => "Highest Rated",
            Self::Newest => "Newest",
            Self::MostViewed => "Most Viewed",
        }
    }

    /// Parses user input, falling back to the default for unknown names.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Compares two tools under this strategy. `Less` means `a` ranks first.
    pub fn compare(&self, a: &Tool, b: &Tool) -> Ordering {
        match self {
            Self::Sponsored => b
                .sponsored
                .cmp(&a.sponsored)
                .then_with(|| by_rating_desc(a, b)),
            Self::Rating => by_rating_desc(a, b),
            Self::Newest | Self::MostViewed => b.views.cmp(&a.views),
        }
    }
}

fn by_rating_desc(a: &Tool, b: &Tool) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sponsored" => Ok(Self::Sponsored),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            "most-viewed" | "most_viewed" => Ok(Self::MostViewed),
            other => Err(format!("unknown sort strategy '{}'", other)),
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a new, stably sorted sequence; the input is left untouched.
pub fn sort_tools<'a>(
    tools: impl IntoIterator<Item = &'a Tool>,
    strategy: SortStrategy,
) -> Vec<&'a Tool> {
    let mut sorted: Vec<&Tool> = tools.into_iter().collect();
    sorted.sort_by(|a, b| strategy.compare(a, b));
    sorted
}
