//! Repository trait for persisted telemetry events.

use crate::domain::telemetry::TelemetryEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only log of tool views and affiliate clicks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Appends one event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record(&self, event: &TelemetryEvent) -> Result<(), AppError>;
}
