use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::PipelineEvent;

/// A pipeline event stamped with the time it was emitted.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: PipelineEvent,
}

impl EventEnvelope {
    fn stamp(event: PipelineEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Sending side of the event channel.
///
/// Each pipeline stage holds its own clone. Once the collector is gone,
/// events are dropped with a warning and the stage carries on.
#[derive(Debug, Clone)]
pub struct EventHandle {
    tx: mpsc::Sender<EventEnvelope>,
}

impl EventHandle {
    pub fn new(tx: mpsc::Sender<EventEnvelope>) -> Self {
        Self { tx }
    }

    /// Queue an event, waiting for room if the collector lags behind.
    pub async fn emit(&self, event: PipelineEvent) {
        let event_type = event.event_type();
        if self.tx.send(EventEnvelope::stamp(event)).await.is_err() {
            tracing::warn!(event_type, "Event collector closed, dropping event");
        }
    }
}

/// Emit through a stage's optional handle.
pub(crate) async fn emit(handle: &Option<EventHandle>, event: PipelineEvent) {
    if let Some(handle) = handle {
        handle.emit(event).await;
    }
}
