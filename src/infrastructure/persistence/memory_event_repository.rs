//! In-memory event log.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::EventRepository;
use crate::domain::telemetry::TelemetryEvent;
use crate::error::AppError;

/// Keeps every recorded event; the log is lost on restart.
#[derive(Default)]
pub struct MemoryEventRepository {
    events: RwLock<Vec<TelemetryEvent>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first.
    pub async fn events(&self) -> Vec<TelemetryEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn record(&self, event: &TelemetryEvent) -> Result<(), AppError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
