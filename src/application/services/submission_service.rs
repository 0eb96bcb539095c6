//! Tool submission workflow: intake from the public form, review from the CLI.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewSubmission, Submission, SubmissionStatus};
use crate::domain::repositories::SubmissionRepository;
use crate::error::AppError;

pub struct SubmissionService<R: SubmissionRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: SubmissionRepository + ?Sized> SubmissionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Normalizes and stores a submission as `pending`.
    ///
    /// Field-level validation happens on the form; this enforces what needs
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a pending submission for the same
    /// website already exists.
    pub async fn submit(&self, submission: NewSubmission) -> Result<Submission, AppError> {
        let submission = normalize(submission);

        let website = canonical_website(&submission.website_url);
        let duplicate = self
            .repository
            .list(Some(SubmissionStatus::Pending))
            .await?
            .into_iter()
            .any(|s| canonical_website(&s.website_url) == website);

        if duplicate {
            return Err(AppError::conflict(
                "A submission for this website is already awaiting review",
                json!({ "website_url": submission.website_url }),
            ));
        }

        let stored = self.repository.create(submission).await?;
        tracing::info!(
            id = stored.id,
            tool = %stored.tool_name,
            plan = stored.plan.as_str(),
            "Tool submission received"
        );
        Ok(stored)
    }

    pub async fn list(&self, status: Option<SubmissionStatus>) -> Result<Vec<Submission>, AppError> {
        self.repository.list(status).await
    }

    /// Marks a submission approved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown.
    pub async fn approve(&self, id: i64) -> Result<(), AppError> {
        self.set_status(id, SubmissionStatus::Approved).await
    }

    /// Marks a submission rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is unknown.
    pub async fn reject(&self, id: i64) -> Result<(), AppError> {
        self.set_status(id, SubmissionStatus::Rejected).await
    }

    async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<(), AppError> {
        if self.repository.set_status(id, status).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Submission not found",
                json!({ "id": id }),
            ))
        }
    }
}

/// Splits a comma-separated form value into trimmed, de-duplicated items.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|i| i.eq_ignore_ascii_case(item)) {
            items.push(item.to_string());
        }
    }
    items
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    split_list(&values.join(","))
}

fn normalize(s: NewSubmission) -> NewSubmission {
    NewSubmission {
        tool_name: s.tool_name.trim().to_string(),
        category: s.category.trim().to_string(),
        website_url: s.website_url.trim().to_string(),
        description: s.description.trim().to_string(),
        short_description: non_blank(s.short_description),
        pricing_type: non_blank(s.pricing_type).map(|p| p.to_ascii_lowercase()),
        pricing_details: non_blank(s.pricing_details),
        company_name: non_blank(s.company_name),
        contact_email: s.contact_email.trim().to_ascii_lowercase(),
        platforms: dedupe(s.platforms),
        tags: dedupe(s.tags),
        features: dedupe(s.features),
        plan: s.plan,
    }
}

fn canonical_website(url: &str) -> String {
    crate::domain::presentation::domain_of(url).unwrap_or_else(|| url.trim().to_ascii_lowercase())
}
