use tokio::sync::mpsc;

use super::{EventEnvelope, EventHandle};

/// Background task that drains pipeline events
pub struct EventCollector {
    rx: mpsc::Receiver<EventEnvelope>,
}

impl EventCollector {
    pub fn new(rx: mpsc::Receiver<EventEnvelope>) -> Self {
        Self { rx }
    }

    /// Consume events until every handle is dropped, returning them in order.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) -> Vec<EventEnvelope> {
        let mut collected = Vec::new();

        while let Some(envelope) = self.rx.recv().await {
            tracing::debug!(
                event_type = envelope.event.event_type(),
                order_id = envelope.event.order_id().unwrap_or("-"),
                "Pipeline event"
            );
            collected.push(envelope);
        }

        collected
    }
}

/// Create a complete event system
///
/// Returns:
/// - `EventHandle` - clone this into every pipeline component
/// - `EventCollector` - spawn this with `tokio::spawn(collector.run())`
pub fn create_event_system(buffer_size: usize) -> (EventHandle, EventCollector) {
    let (tx, rx) = mpsc::channel(buffer_size);
    (EventHandle::new(tx), EventCollector::new(rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PipelineEvent;

    #[tokio::test]
    async fn test_collector_returns_events_in_order() {
        let (handle, collector) = create_event_system(4);
        let task = tokio::spawn(collector.run());

        for order_id in ["1", "2", "3", "4", "5", "6"] {
            handle
                .emit(PipelineEvent::UpdateSent {
                    sink: "mock".to_string(),
                    order_id: order_id.to_string(),
                })
                .await;
        }
        drop(handle);

        let events = task.await.unwrap();
        let ids: Vec<_> = events.iter().filter_map(|e| e.event.order_id()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[tokio::test]
    async fn test_collector_finishes_when_handles_drop() {
        let (handle, collector) = create_event_system(4);
        let clone = handle.clone();
        drop(handle);
        drop(clone);

        assert!(collector.run().await.is_empty());
    }
}
