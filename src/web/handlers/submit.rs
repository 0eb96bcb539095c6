//! Tool submission form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::domain::entities::{ListingPlan, PricingType};
use crate::domain::pricing::{find_plan, plans};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::PageError;
use crate::web::forms::SubmissionForm;
use crate::web::views::OptionView;

#[derive(Debug, Default, Deserialize)]
pub struct SubmitQuery {
    #[serde(default)]
    pub plan: Option<String>,
}

/// A message attached to one form field.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub tool_name: String,
    pub website_url: String,
    pub description: String,
    pub short_description: String,
    pub pricing_details: String,
    pub company_name: String,
    pub contact_email: String,
    pub platforms: String,
    pub tags: String,
    pub features: String,
    pub categories: Vec<OptionView>,
    pub pricing_types: Vec<OptionView>,
    pub plans: Vec<OptionView>,
    pub errors: Vec<FieldError>,
    pub conflict: Option<String>,
}

impl SubmitTemplate {
    async fn build(
        state: &AppState,
        form: &SubmissionForm,
        errors: Vec<FieldError>,
        conflict: Option<String>,
    ) -> Result<Self, AppError> {
        let categories = state
            .catalog_service
            .list_categories()
            .await?
            .into_iter()
            .map(|c| {
                let selected = c.slug == form.category;
                OptionView::new(c.slug, c.name, selected)
            })
            .collect();

        let pricing_type = form.pricing_type.as_deref().unwrap_or_default();
        let pricing_types = PricingType::ALL
            .iter()
            .map(|p| OptionView::new(p.as_str(), p.label(), p.as_str() == pricing_type))
            .collect();

        let plans = plans()
            .iter()
            .map(|p| OptionView::new(p.id.as_str(), p.name, p.id.as_str() == form.plan))
            .collect();

        Ok(Self {
            tool_name: form.tool_name.clone(),
            website_url: form.website_url.clone(),
            description: form.description.clone(),
            short_description: form.short_description.clone().unwrap_or_default(),
            pricing_details: form.pricing_details.clone().unwrap_or_default(),
            company_name: form.company_name.clone().unwrap_or_default(),
            contact_email: form.contact_email.clone(),
            platforms: form.platforms.clone(),
            tags: form.tags.clone(),
            features: form.features.clone(),
            categories,
            pricing_types,
            plans,
            errors,
            conflict,
        })
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "submit_success.html")]
pub struct SubmitSuccessTemplate {
    pub id: i64,
    pub tool_name: String,
    pub plan_name: &'static str,
    pub paid: bool,
}

/// `GET /submit?plan=verified`
pub async fn submit_form_handler(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
) -> Result<SubmitTemplate, PageError> {
    let plan = query
        .plan
        .as_deref()
        .and_then(|p| p.parse::<ListingPlan>().ok())
        .unwrap_or_default();
    let form = SubmissionForm {
        plan: plan.as_str().to_string(),
        ..SubmissionForm::default()
    };

    Ok(SubmitTemplate::build(&state, &form, Vec::new(), None).await?)
}

/// `POST /submit`
///
/// Invalid input re-renders the form with 400, a duplicate pending website
/// with 409.
pub async fn submit_handler(
    State(state): State<AppState>,
    Form(form): Form<SubmissionForm>,
) -> Result<Response, PageError> {
    if let Err(errors) = form.validate() {
        let page = SubmitTemplate::build(&state, &form, field_errors(&errors), None).await?;
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    match state.submission_service.submit(form.to_new_submission()).await {
        Ok(stored) => {
            let plan = find_plan(stored.plan);
            Ok(SubmitSuccessTemplate {
                id: stored.id,
                tool_name: stored.tool_name,
                plan_name: plan.name,
                paid: !plan.is_free(),
            }
            .into_response())
        }
        Err(e @ AppError::Conflict { .. }) => {
            let page =
                SubmitTemplate::build(&state, &form, Vec::new(), Some(e.to_string())).await?;
            Ok((StatusCode::CONFLICT, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Flattens validator output into one entry per message, sorted by field.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field)),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_are_flattened() {
        let form = SubmissionForm {
            tool_name: "X".to_string(),
            contact_email: "nope".to_string(),
            ..SubmissionForm::default()
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<String> = field_errors(&errors).into_iter().map(|e| e.field).collect();

        assert!(fields.contains(&"tool_name".to_string()));
        assert!(fields.contains(&"contact_email".to_string()));
        let mut sorted = fields.clone();
        sorted.sort();
        assert_eq!(fields, sorted);
    }
}
