//! Forwarding processed orders downstream.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::types::UpdateOutcome;
use crate::events::{emit, EventHandle, PipelineEvent};
use crate::gateway::{ApiError, UpdateSink};
use crate::order::Order;

/// Posts processed orders to the update endpoint. Failures are logged only.
pub struct Updater<U: UpdateSink> {
    sink: Arc<U>,
    events: Option<EventHandle>,
}

impl<U: UpdateSink> Updater<U> {
    pub fn new(sink: Arc<U>) -> Self {
        Self { sink, events: None }
    }

    /// Sets the event handle for reporting update outcomes.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.events = Some(events);
        self
    }

    /// Forward the order. No retry; the outcome is informational.
    pub async fn send_update(&self, order: &Order) -> UpdateOutcome {
        let order_id = order.order_id.to_string();
        let sink = self.sink.name().to_string();

        let outcome = match self.sink.send_update(order).await {
            Ok(()) => {
                info!(sink = %sink, order_id = %order_id, "Order update sent");
                UpdateOutcome::Sent
            }
            Err(ApiError::Status { status, body }) => {
                warn!(
                    sink = %sink,
                    order_id = %order_id,
                    status,
                    body = %body,
                    "Failed to send updated order for processing: OrderId {}",
                    order_id
                );
                UpdateOutcome::Rejected { status }
            }
            Err(e) if e.is_transport() => {
                error!(
                    sink = %sink,
                    order_id = %order_id,
                    error = %e,
                    "Network error occurred while sending updated order: OrderId {}",
                    order_id
                );
                UpdateOutcome::Failed {
                    error: e.to_string(),
                }
            }
            Err(e) => {
                error!(
                    sink = %sink,
                    order_id = %order_id,
                    error = %e,
                    "Unexpected error occurred while sending updated order: OrderId {}",
                    order_id
                );
                UpdateOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let event = match &outcome {
            UpdateOutcome::Sent => PipelineEvent::UpdateSent { sink, order_id },
            UpdateOutcome::Rejected { status } => PipelineEvent::UpdateFailed {
                sink,
                order_id,
                error: format!("HTTP {}", status),
            },
            UpdateOutcome::Failed { error } => PipelineEvent::UpdateFailed {
                sink,
                order_id,
                error: error.clone(),
            },
        };
        emit(&self.events, event).await;

        outcome
    }
}
