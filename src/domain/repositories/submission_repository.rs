//! Repository trait for tool submissions.

use crate::domain::entities::{NewSubmission, Submission, SubmissionStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for listing requests sent through the submission form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Stores a new submission with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, submission: NewSubmission) -> Result<Submission, AppError>;

    /// Lists submissions, newest first, optionally filtered by status.
    async fn list(&self, status: Option<SubmissionStatus>) -> Result<Vec<Submission>, AppError>;

    /// Moves a submission to a new status.
    ///
    /// Returns `Ok(false)` when the id is unknown.
    async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<bool, AppError>;
}
