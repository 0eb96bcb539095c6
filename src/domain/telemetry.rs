//! Telemetry events for view counting and affiliate click tracking.
//!
//! Handlers emit events through a [`TelemetrySink`] and return immediately.
//! [`ChannelTelemetrySink`] forwards them over a bounded channel to
//! [`crate::domain::telemetry_worker::run_telemetry_worker`], which persists
//! them off the request path.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::entities::LinkType;

/// Something worth counting happened to a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// The tool detail page was rendered.
    ToolViewed { slug: String },
    /// A visitor followed the outbound (possibly affiliate) link.
    AffiliateClicked {
        slug: String,
        link_type: LinkType,
        referer: Option<String>,
        user_agent: Option<String>,
    },
}

impl TelemetryEvent {
    pub fn viewed(slug: impl Into<String>) -> Self {
        Self::ToolViewed { slug: slug.into() }
    }

    pub fn affiliate_clicked(
        slug: impl Into<String>,
        link_type: LinkType,
        referer: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        Self::AffiliateClicked {
            slug: slug.into(),
            link_type,
            referer: referer.map(|s| s.to_string()),
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::ToolViewed { slug } | Self::AffiliateClicked { slug, .. } => slug,
        }
    }

    /// Event name as stored and reported.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToolViewed { .. } => "tool_viewed",
            Self::AffiliateClicked { .. } => "affiliate_clicked",
        }
    }
}

/// Fire-and-forget destination for telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Hands an event over without blocking. Losing an event is acceptable.
    fn emit(&self, event: TelemetryEvent);

    /// Whether events can currently be delivered.
    fn is_open(&self) -> bool;

    /// Remaining buffer space, when the sink is bounded.
    fn capacity(&self) -> Option<usize> {
        None
    }
}

/// Sink backed by a bounded tokio channel.
#[derive(Clone)]
pub struct ChannelTelemetrySink {
    tx: mpsc::Sender<TelemetryEvent>,
}

impl ChannelTelemetrySink {
    pub fn new(tx: mpsc::Sender<TelemetryEvent>) -> Self {
        Self { tx }
    }
}

impl TelemetrySink for ChannelTelemetrySink {
    fn emit(&self, event: TelemetryEvent) {
        if let Err(e) = self.tx.try_send(event) {
            metrics::counter!("telemetry_events_dropped").increment(1);
            warn!(error = %e, "Dropping telemetry event");
        }
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.tx.capacity())
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetrySink;

impl TelemetrySink for NullTelemetrySink {
    fn emit(&self, _event: TelemetryEvent) {}

    fn is_open(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affiliate_event_creation() {
        let event = TelemetryEvent::affiliate_clicked(
            "revit",
            LinkType::Affiliate,
            Some("https://google.com"),
            None,
        );

        assert_eq!(event.slug(), "revit");
        assert_eq!(event.name(), "affiliate_clicked");
        match event {
            TelemetryEvent::AffiliateClicked {
                referer,
                user_agent,
                link_type,
                ..
            } => {
                assert_eq!(referer.as_deref(), Some("https://google.com"));
                assert!(user_agent.is_none());
                assert_eq!(link_type, LinkType::Affiliate);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let json = serde_json::to_value(TelemetryEvent::viewed("tekla")).unwrap();
        assert_eq!(json["kind"], "tool_viewed");
        assert_eq!(json["slug"], "tekla");
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = ChannelTelemetrySink::new(tx);

        sink.emit(TelemetryEvent::viewed("a"));

        assert!(sink.is_open());
        assert_eq!(rx.recv().await, Some(TelemetryEvent::viewed("a")));
    }

    #[tokio::test]
    async fn test_channel_sink_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let sink = ChannelTelemetrySink::new(tx);

        sink.emit(TelemetryEvent::viewed("a"));
        sink.emit(TelemetryEvent::viewed("b"));

        assert_eq!(sink.capacity(), Some(0));
        assert_eq!(rx.recv().await, Some(TelemetryEvent::viewed("a")));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_reports_closed() {
        let (tx, rx) = mpsc::channel(1);
        let sink = ChannelTelemetrySink::new(tx);
        drop(rx);

        assert!(!sink.is_open());
        // Emitting into a closed channel must not panic.
        sink.emit(TelemetryEvent::viewed("a"));
    }
}
