//! Display helpers shared by the HTML pages and the JSON API.

use url::Url;

use crate::domain::entities::{LinkType, PricingType, Tool};

/// Placeholder image used when no logo can be derived.
pub const PLACEHOLDER_LOGO: &str = "/static/placeholder.svg";

/// Human-readable price line.
pub fn format_pricing(pricing_type: Option<PricingType>, pricing: &str) -> String {
    match pricing_type {
        Some(PricingType::Free) => "Free".to_string(),
        Some(PricingType::Freemium) if !pricing.trim().is_empty() => {
            format!("Free + {}", pricing.trim())
        }
        Some(PricingType::Freemium) => "Freemium".to_string(),
        _ => pricing.to_string(),
    }
}

/// Appends `%` to bare commission numbers.
pub fn format_commission(commission: Option<&str>) -> Option<String> {
    let commission = commission?.trim();
    if commission.is_empty() {
        return None;
    }
    if commission.ends_with('%') {
        Some(commission.to_string())
    } else {
        Some(format!("{}%", commission))
    }
}

/// Call-to-action label for the outbound button.
pub fn cta_text(link_type: LinkType) -> &'static str {
    match link_type {
        LinkType::Affiliate => "Join Program",
        LinkType::Partner => "View Partner Page",
        LinkType::Direct => "Visit Tool",
    }
}

/// Host of `url` without a leading `www.`.
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Logo to display for a tool.
///
/// A custom logo wins unless it is itself a placeholder; otherwise the logo
/// is fetched from Clearbit by website domain.
pub fn logo_url(tool: &Tool) -> String {
    if let Some(logo) = tool.logo_url.as_deref()
        && !logo.trim().is_empty()
        && !logo.contains("placeholder")
    {
        return logo.to_string();
    }

    match domain_of(&tool.website) {
        Some(domain) => format!("https://logo.clearbit.com/{}", domain),
        None => PLACEHOLDER_LOGO.to_string(),
    }
}

/// Outbound URL tagged with referral UTM parameters.
///
/// Existing `utm_*` parameters are replaced, other query parameters are kept.
/// Targets that do not parse as absolute URLs are returned unchanged.
pub fn build_affiliate_url(target: &str, site_name: &str, slug: &str) -> String {
    let Ok(mut url) = Url::parse(target.trim()) else {
        return target.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !k.starts_with("utm_"))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("utm_source", site_name)
        .append_pair("utm_medium", "referral")
        .append_pair("utm_campaign", slug);

    url.to_string()
}

/// Star glyphs for a 0-5 rating, rounded to the nearest whole star.
pub fn rating_stars(rating: f64) -> String {
    let filled = rating.clamp(0.0, 5.0).round() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
