//! Fetching the order batch.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::events::{emit, EventHandle, PipelineEvent};
use crate::gateway::{ApiError, OrderSource};
use crate::order::Order;

/// Fetches orders and degrades every failure to an empty batch.
pub struct Fetcher<S: OrderSource> {
    source: Arc<S>,
    events: Option<EventHandle>,
}

impl<S: OrderSource> Fetcher<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            events: None,
        }
    }

    /// Sets the event handle for reporting fetch outcomes.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.events = Some(events);
        self
    }

    /// Fetch the current batch. Never fails; errors yield an empty batch.
    pub async fn fetch(&self) -> Vec<Order> {
        let source = self.source.name().to_string();

        match self.source.fetch_orders().await {
            Ok(orders) => {
                info!(source = %source, count = orders.len(), "Fetched orders");
                emit(
                    &self.events,
                    PipelineEvent::OrdersFetched {
                        source,
                        count: orders.len(),
                    },
                )
                .await;
                orders
            }
            Err(e) => {
                match &e {
                    ApiError::Status { status, .. } => {
                        warn!(source = %source, status, "Failed to fetch orders from API")
                    }
                    e if e.is_transport() => error!(
                        source = %source,
                        error = %e,
                        "Network error occurred while fetching orders from API"
                    ),
                    e => error!(
                        source = %source,
                        error = %e,
                        "Unexpected error occurred while fetching orders from API"
                    ),
                }
                emit(
                    &self.events,
                    PipelineEvent::FetchFailed {
                        source,
                        error: e.to_string(),
                    },
                )
                .await;
                Vec::new()
            }
        }
    }
}
