//! PostgreSQL implementation of the telemetry event log.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::EventRepository;
use crate::domain::telemetry::TelemetryEvent;
use crate::error::AppError;

/// Appends view and click events to `tool_events`.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn record(&self, event: &TelemetryEvent) -> Result<(), AppError> {
        let (link_type, referer, user_agent) = match event {
            TelemetryEvent::ToolViewed { .. } => (None, None, None),
            TelemetryEvent::AffiliateClicked {
                link_type,
                referer,
                user_agent,
                ..
            } => (
                Some(link_type.as_str()),
                referer.as_deref(),
                user_agent.as_deref(),
            ),
        };

        sqlx::query(
            r#"
            INSERT INTO tool_events (tool_slug, event, link_type, referer, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.slug())
        .bind(event.name())
        .bind(link_type)
        .bind(referer)
        .bind(user_agent)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
