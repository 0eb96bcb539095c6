//! Tool entity representing one catalog entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the outbound link of a tool is monetized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkType {
    #[default]
    Direct,
    Affiliate,
    Partner,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Affiliate => "Affiliate",
            Self::Partner => "Partner",
        }
    }
}

impl FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Direct" | "direct" => Ok(Self::Direct),
            "Affiliate" | "affiliate" => Ok(Self::Affiliate),
            "Partner" | "partner" => Ok(Self::Partner),
            other => Err(format!("unknown link type '{}'", other)),
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing model of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingType {
    Free,
    Freemium,
    Paid,
    Custom,
}

impl PricingType {
    pub const ALL: [PricingType; 4] = [Self::Free, Self::Freemium, Self::Paid, Self::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Freemium => "freemium",
            Self::Paid => "paid",
            Self::Custom => "custom",
        }
    }

    /// Human-readable label used by filter panels.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Freemium => "Freemium",
            Self::Paid => "Paid",
            Self::Custom => "Custom Pricing",
        }
    }
}

impl FromStr for PricingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "freemium" => Ok(Self::Freemium),
            "paid" => Ok(Self::Paid),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown pricing type '{}'", other)),
        }
    }
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry describing one construction-technology product.
///
/// This is the single canonical shape used by the search, filter and sort
/// engine. Store adapters map their native rows onto it; optional fields
/// stay `None` rather than being defaulted, so a missing `pricing_type`
/// never satisfies a pricing filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub category: String,
    pub category_slug: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub affiliate_url: Option<String>,
    #[serde(default)]
    pub link_type: LinkType,
    #[serde(default)]
    pub pricing: String,
    #[serde(default, deserialize_with = "lenient_pricing_type")]
    pub pricing_type: Option<PricingType>,
    #[serde(default)]
    pub commission: Option<String>,
    #[serde(default)]
    pub cookie_days: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub sponsored: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Accepts unknown pricing strings as `None` instead of failing the whole record.
fn lenient_pricing_type<'de, D>(deserializer: D) -> Result<Option<PricingType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

impl Tool {
    /// Creates a tool with the required identity fields; everything else is empty.
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
        category_slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            tagline: None,
            description: String::new(),
            short_description: None,
            category: String::new(),
            category_slug: category_slug.into(),
            logo_url: None,
            website: String::new(),
            affiliate_url: None,
            link_type: LinkType::Direct,
            pricing: String::new(),
            pricing_type: None,
            commission: None,
            cookie_days: None,
            rating: 0.0,
            review_count: 0,
            views: 0,
            platforms: Vec::new(),
            tags: Vec::new(),
            verified: false,
            sponsored: false,
            created_at: None,
        }
    }

    /// Clamps `rating` into `[0, 5]`; NaN becomes 0.
    pub fn normalized(mut self) -> Self {
        self.rating = if self.rating.is_nan() {
            0.0
        } else {
            self.rating.clamp(0.0, 5.0)
        };
        self
    }

    /// The URL outbound clicks should land on: the affiliate link when set.
    pub fn outbound_url(&self) -> &str {
        match self.affiliate_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => &self.website,
        }
    }

    /// Tagline, falling back to the short description.
    pub fn summary(&self) -> &str {
        self.tagline
            .as_deref()
            .or(self.short_description.as_deref())
            .unwrap_or_default()
    }
}
