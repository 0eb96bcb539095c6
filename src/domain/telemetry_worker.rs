//! Background worker persisting telemetry events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, warn};

use crate::domain::repositories::{CatalogRepository, EventRepository};
use crate::domain::telemetry::TelemetryEvent;
use crate::error::AppError;

/// Attempts per store write, the first try included.
const WRITE_ATTEMPTS: usize = 3;

fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(WRITE_ATTEMPTS - 1)
}

/// Drains the telemetry channel until every sender is dropped.
///
/// Each event is appended to the event log; view events first bump the
/// tool's view counter. The counter bump and the log append are retried
/// separately with jittered exponential backoff ([`WRITE_ATTEMPTS`] tries
/// each), so a failing log append never counts a view twice. An event that
/// still fails is dropped with an error log.
pub async fn run_telemetry_worker<C, E>(
    mut rx: mpsc::Receiver<TelemetryEvent>,
    catalog_repository: Arc<C>,
    event_repository: Arc<E>,
) where
    C: CatalogRepository + ?Sized,
    E: EventRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        let result =
            process_event(&event, catalog_repository.as_ref(), event_repository.as_ref()).await;

        match result {
            Ok(()) => {
                metrics::counter!("telemetry_events_processed", "event" => event.name())
                    .increment(1);
                debug!(event = event.name(), slug = event.slug(), "Telemetry event stored");
            }
            Err(e) => {
                metrics::counter!("telemetry_events_failed", "event" => event.name())
                    .increment(1);
                error!(
                    event = event.name(),
                    slug = event.slug(),
                    error = %e,
                    "Failed to store telemetry event after retries"
                );
            }
        }
    }

    warn!("Telemetry channel closed, worker stopping");
}

async fn process_event<C, E>(
    event: &TelemetryEvent,
    catalog_repository: &C,
    event_repository: &E,
) -> Result<(), AppError>
where
    C: CatalogRepository + ?Sized,
    E: EventRepository + ?Sized,
{
    if let TelemetryEvent::ToolViewed { slug } = event {
        let known =
            Retry::spawn(retry_strategy(), || catalog_repository.increment_views(slug)).await?;
        if !known {
            debug!(slug = %slug, "View for unknown tool ignored");
            return Ok(());
        }
    }

    Retry::spawn(retry_strategy(), || event_repository.record(event)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkType;
    use crate::domain::repositories::{MockCatalogRepository, MockEventRepository};
    use serde_json::json;

    #[tokio::test]
    async fn test_view_increments_and_records() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_increment_views()
            .withf(|slug| slug == "revit")
            .times(1)
            .returning(|_| Ok(true));

        let mut events = MockEventRepository::new();
        events.expect_record().times(1).returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(TelemetryEvent::viewed("revit")).await.unwrap();
        drop(tx);

        run_telemetry_worker(rx, Arc::new(catalog), Arc::new(events)).await;
    }

    #[tokio::test]
    async fn test_click_is_recorded_without_view_increment() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_increment_views().times(0);

        let mut events = MockEventRepository::new();
        events
            .expect_record()
            .withf(|e| e.name() == "affiliate_clicked")
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(TelemetryEvent::affiliate_clicked(
            "tekla",
            LinkType::Partner,
            None,
            None,
        ))
        .await
        .unwrap();
        drop(tx);

        run_telemetry_worker(rx, Arc::new(catalog), Arc::new(events)).await;
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_recorded() {
        let mut catalog = MockCatalogRepository::new();
        catalog.expect_increment_views().times(1).returning(|_| Ok(false));

        let mut events = MockEventRepository::new();
        events.expect_record().times(0);

        let (tx, rx) = mpsc::channel(8);
        tx.send(TelemetryEvent::viewed("ghost")).await.unwrap();
        drop(tx);

        run_telemetry_worker(rx, Arc::new(catalog), Arc::new(events)).await;
    }

    #[tokio::test]
    async fn test_failed_write_is_retried() {
        let catalog = MockCatalogRepository::new();

        let mut events = MockEventRepository::new();
        let mut seq = mockall::Sequence::new();
        events
            .expect_record()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        events
            .expect_record()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(TelemetryEvent::affiliate_clicked(
            "a",
            LinkType::Affiliate,
            None,
            None,
        ))
        .await
        .unwrap();
        drop(tx);

        run_telemetry_worker(rx, Arc::new(catalog), Arc::new(events)).await;
    }

    #[tokio::test]
    async fn test_log_retry_does_not_recount_view() {
        let mut catalog = MockCatalogRepository::new();
        catalog
            .expect_increment_views()
            .times(1)
            .returning(|_| Ok(true));

        let mut events = MockEventRepository::new();
        let mut seq = mockall::Sequence::new();
        events
            .expect_record()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        events
            .expect_record()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(TelemetryEvent::viewed("revit")).await.unwrap();
        drop(tx);

        run_telemetry_worker(rx, Arc::new(catalog), Arc::new(events)).await;
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let catalog = MockCatalogRepository::new();

        let mut events = MockEventRepository::new();
        events
            .expect_record()
            .times(WRITE_ATTEMPTS)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let (tx, rx) = mpsc::channel(8);
        tx.send(TelemetryEvent::affiliate_clicked(
            "a",
            LinkType::Direct,
            None,
            None,
        ))
        .await
        .unwrap();
        drop(tx);

        run_telemetry_worker(rx, Arc::new(catalog), Arc::new(events)).await;
    }

    #[test]
    fn test_retry_strategy_length() {
        assert_eq!(retry_strategy().count(), WRITE_ATTEMPTS - 1);
    }
}
