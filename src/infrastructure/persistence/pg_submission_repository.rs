//! PostgreSQL implementation of the submission repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewSubmission, Submission, SubmissionStatus};
use crate::domain::repositories::SubmissionRepository;
use crate::error::AppError;

const SUBMISSION_COLUMNS: &str = "id, tool_name, category, website_url, description, \
     short_description, pricing_type, pricing_details, company_name, contact_email, \
     platforms, tags, features, plan, status, submitted_at";

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: i64,
    tool_name: String,
    category: String,
    website_url: String,
    description: String,
    short_description: Option<String>,
    pricing_type: Option<String>,
    pricing_details: Option<String>,
    company_name: Option<String>,
    contact_email: String,
    platforms: Vec<String>,
    tags: Vec<String>,
    features: Vec<String>,
    plan: String,
    status: String,
    submitted_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Submission {
            id: row.id,
            tool_name: row.tool_name,
            category: row.category,
            website_url: row.website_url,
            description: row.description,
            short_description: row.short_description,
            pricing_type: row.pricing_type,
            pricing_details: row.pricing_details,
            company_name: row.company_name,
            contact_email: row.contact_email,
            platforms: row.platforms,
            tags: row.tags,
            features: row.features,
            plan: row.plan.parse().unwrap_or_default(),
            status: row.status.parse().unwrap_or(SubmissionStatus::Pending),
            submitted_at: row.submitted_at,
        }
    }
}

/// PostgreSQL repository for tool submissions.
pub struct PgSubmissionRepository {
    pool: Arc<PgPool>,
}

impl PgSubmissionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    async fn create(&self, s: NewSubmission) -> Result<Submission, AppError> {
        let sql = format!(
            r#"
            INSERT INTO tool_submissions (
                tool_name, category, website_url, description, short_description,
                pricing_type, pricing_details, company_name, contact_email,
                platforms, tags, features, plan
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(s.tool_name)
            .bind(s.category)
            .bind(s.website_url)
            .bind(s.description)
            .bind(s.short_description)
            .bind(s.pricing_type)
            .bind(s.pricing_details)
            .bind(s.company_name)
            .bind(s.contact_email)
            .bind(s.platforms)
            .bind(s.tags)
            .bind(s.features)
            .bind(s.plan.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn list(&self, status: Option<SubmissionStatus>) -> Result<Vec<Submission>, AppError> {
        let sql = format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM tool_submissions
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY submitted_at DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Submission::from).collect())
    }

    async fn set_status(&self, id: i64, status: SubmissionStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tool_submissions SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
