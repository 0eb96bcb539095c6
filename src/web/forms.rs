//! Form and query payloads of the HTML pages.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::{Validate, ValidationError};

use crate::application::services::split_list;
use crate::domain::entities::{ListingPlan, NewSubmission, PricingType};
use crate::domain::roi::RoiInput;

fn validate_pricing_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<PricingType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("pricing_type").with_message("Unknown pricing type".into()))
}

fn validate_plan(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ListingPlan>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("plan").with_message("Unknown listing plan".into()))
}

fn default_plan() -> String {
    ListingPlan::Free.as_str().to_string()
}

/// `POST /submit` body.
///
/// Platforms, tags and features arrive as comma-separated text.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubmissionForm {
    #[validate(length(min = 2, max = 120, message = "Tool name must be 2 to 120 characters"))]
    #[serde(default)]
    pub tool_name: String,

    #[validate(length(min = 1, message = "Choose a category"))]
    #[serde(default)]
    pub category: String,

    #[validate(url(message = "Enter a valid website URL"))]
    #[serde(default)]
    pub website_url: String,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    #[serde(default)]
    pub description: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(length(max = 200, message = "Short description must be at most 200 characters"))]
    #[serde(default)]
    pub short_description: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(custom(function = "validate_pricing_type"))]
    #[serde(default)]
    pub pricing_type: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub pricing_details: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub company_name: Option<String>,

    #[validate(email(message = "Enter a valid email address"))]
    #[serde(default)]
    pub contact_email: String,

    #[serde(default)]
    pub platforms: String,

    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub features: String,

    #[validate(custom(function = "validate_plan"))]
    #[serde(default = "default_plan")]
    pub plan: String,
}

impl SubmissionForm {
    /// Converts a validated form into the domain input.
    pub fn to_new_submission(&self) -> NewSubmission {
        NewSubmission {
            tool_name: self.tool_name.trim().to_string(),
            category: self.category.trim().to_string(),
            website_url: self.website_url.trim().to_string(),
            description: self.description.trim().to_string(),
            short_description: self.short_description.clone(),
            pricing_type: self.pricing_type.clone(),
            pricing_details: self.pricing_details.clone(),
            company_name: self.company_name.clone(),
            contact_email: self.contact_email.trim().to_string(),
            platforms: split_list(&self.platforms),
            tags: split_list(&self.tags),
            features: split_list(&self.features),
            plan: self.plan.parse().unwrap_or_default(),
        }
    }
}

/// `POST /compare/add` and `/compare/remove` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareForm {
    #[serde(default)]
    pub slug: String,
    /// Local path to return to; anything else falls back to `/compare`.
    #[serde(default)]
    pub next: Option<String>,
}

impl CompareForm {
    pub fn redirect_target(&self) -> &str {
        safe_local_path(self.next.as_deref()).unwrap_or("/compare")
    }
}

/// Accepts `/path` but not `//host`, absolute URLs or anything that cannot
/// go into a `Location` header.
pub fn safe_local_path(path: Option<&str>) -> Option<&str> {
    let path = path?.trim();
    let local = path.starts_with('/') && !path.starts_with("//");
    let clean = path
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '\\');
    (local && clean).then_some(path)
}

/// `GET /fieldkit/roi-calculator` query. Blank inputs take the defaults.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoiParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub scans_per_month: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub avg_job_revenue: Option<f64>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub lifespan_years: Option<f64>,
}

impl RoiParams {
    pub fn to_input(&self) -> RoiInput {
        let defaults = RoiInput::default();
        RoiInput {
            purchase_price: self.purchase_price.unwrap_or(defaults.purchase_price),
            scans_per_month: self.scans_per_month.unwrap_or(defaults.scans_per_month),
            avg_job_revenue: self.avg_job_revenue.unwrap_or(defaults.avg_job_revenue),
            lifespan_years: self.lifespan_years.unwrap_or(defaults.lifespan_years),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            tool_name: "FieldScan Pro".to_string(),
            category: "reality-capture".to_string(),
            website_url: "https://fieldscan.example.com".to_string(),
            description: "Handheld laser scanning for site crews.".to_string(),
            contact_email: "sales@fieldscan.example.com".to_string(),
            platforms: "Windows, iOS, windows".to_string(),
            plan: "verified".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let form = valid_form();
        assert!(form.validate().is_ok());

        let submission = form.to_new_submission();
        assert_eq!(submission.platforms, vec!["Windows", "iOS"]);
        assert_eq!(submission.plan, ListingPlan::Verified);
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let form = SubmissionForm {
            tool_name: "X".to_string(),
            website_url: "not a url".to_string(),
            description: "too short".to_string(),
            contact_email: "nobody".to_string(),
            pricing_type: Some("subscription".to_string()),
            plan: "platinum".to_string(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in [
            "tool_name",
            "website_url",
            "description",
            "contact_email",
            "pricing_type",
            "plan",
        ] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_form_decoding_treats_blank_as_none() {
        let body = "tool_name=Scan&category=c&website_url=https%3A%2F%2Fa.io&description=&short_description=&pricing_type=&contact_email=a%40b.io";
        let form: SubmissionForm = decode_form(body);

        assert!(form.short_description.is_none());
        assert!(form.pricing_type.is_none());
        assert_eq!(form.plan, "free");
    }

    fn decode_form(body: &str) -> SubmissionForm {
        let pairs: serde_json::Map<String, serde_json::Value> = url::form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), serde_json::Value::String(v.into_owned())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(pairs)).unwrap()
    }

    #[test]
    fn test_safe_local_path() {
        assert_eq!(safe_local_path(Some("/tool/revit")), Some("/tool/revit"));
        assert_eq!(safe_local_path(Some("//evil.example")), None);
        assert_eq!(safe_local_path(Some("https://evil.example")), None);
        assert_eq!(safe_local_path(None), None);
        assert_eq!(safe_local_path(Some("/a\nb")), None);
        assert_eq!(safe_local_path(Some("/tool/\u{7f}x")), None);
        assert_eq!(safe_local_path(Some("/\\evil.example")), None);
        assert_eq!(safe_local_path(Some("/tool/caf\u{e9}")), None);
    }

    #[test]
    fn test_roi_params_defaults() {
        let params = RoiParams {
            purchase_price: Some(20_000.0),
            ..Default::default()
        };
        let input = params.to_input();

        assert_eq!(input.purchase_price, 20_000.0);
        assert_eq!(input.scans_per_month, 4.0);
    }
}
