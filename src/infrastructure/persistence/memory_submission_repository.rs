//! In-memory submission store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewSubmission, Submission, SubmissionStatus};
use crate::domain::repositories::SubmissionRepository;
use crate::error::AppError;

#[derive(Default)]
pub struct MemorySubmissionRepository {
    submissions: RwLock<Vec<Submission>>,
}

impl MemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for MemorySubmissionRepository {
    async fn create(&self, submission: NewSubmission) -> Result<Submission, AppError> {
        let mut submissions = self.submissions.write().await;
        let id = submissions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let stored = submission.into_pending(id, Utc::now());
        submissions.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, status: Option<SubmissionStatus>) -> Result<Vec<Submission>, AppError> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .iter()
            .rev()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .cloned()
            .collect())
    }

    async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<bool, AppError> {
        let mut submissions = self.submissions.write().await;
        match submissions.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
