//! Batch runner: fetch, process each order, forward the fully processed ones.

use std::sync::Arc;

use tracing::{debug, info, Instrument};
use uuid::Uuid;

use super::fetcher::Fetcher;
use super::processor::OrderProcessor;
use super::types::BatchSummary;
use super::updater::Updater;
use crate::config::{Config, RunMode};
use crate::events::{emit, EventHandle, PipelineEvent};
use crate::gateway::{AlertSink, ApiError, HttpGateway, OrderSource, SimulatedGateway, UpdateSink};
use crate::order::Order;

/// Runs one batch through the pipeline, strictly one order at a time.
pub struct BatchRunner<S: OrderSource, A: AlertSink, U: UpdateSink> {
    fetcher: Fetcher<S>,
    processor: OrderProcessor<A>,
    updater: Updater<U>,
    events: Option<EventHandle>,
}

impl<S: OrderSource, A: AlertSink, U: UpdateSink> BatchRunner<S, A, U> {
    pub fn new(source: Arc<S>, alerts: Arc<A>, updates: Arc<U>) -> Self {
        Self {
            fetcher: Fetcher::new(source),
            processor: OrderProcessor::new(alerts),
            updater: Updater::new(updates),
            events: None,
        }
    }

    /// Sets the event handle for the runner and every stage.
    pub fn with_events(self, events: EventHandle) -> Self {
        Self {
            fetcher: self.fetcher.with_events(events.clone()),
            processor: self.processor.with_events(events.clone()),
            updater: self.updater.with_events(events.clone()),
            events: Some(events),
        }
    }

    /// Fetch the batch and run it.
    pub async fn run(&self) -> BatchSummary {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("batch", run_id = %run_id);

        async {
            let orders = self.fetcher.fetch().await;
            self.run_orders(run_id.clone(), orders).await
        }
        .instrument(span)
        .await
    }

    /// Run an already fetched batch.
    pub async fn run_orders(&self, run_id: String, orders: Vec<Order>) -> BatchSummary {
        let mut summary = BatchSummary {
            run_id,
            orders_fetched: orders.len(),
            ..BatchSummary::default()
        };

        for order in orders {
            let processed = self.processor.process_with_tally(order).await;
            summary.record(&processed);

            let status = processed.status();
            if !status.should_forward() {
                debug!(
                    order_id = %processed.order.order_id,
                    status = %status,
                    "Skipping order update"
                );
                emit(
                    &self.events,
                    PipelineEvent::OrderSkipped {
                        order_id: processed.order.order_id.to_string(),
                        status: status.to_string(),
                    },
                )
                .await;
                continue;
            }

            let outcome = self.updater.send_update(&processed.order).await;
            summary.record_update(&outcome);
        }

        info!(
            orders = summary.orders_fetched,
            processed = summary.processed,
            skipped = summary.skipped(),
            alerts_sent = summary.alerts_sent,
            alerts_failed = summary.alerts_failed,
            updates_sent = summary.updates_sent,
            updates_failed = summary.updates_failed,
            "Batch complete"
        );

        summary
    }
}

impl<G> BatchRunner<G, G, G>
where
    G: OrderSource + AlertSink + UpdateSink,
{
    /// Build a runner whose three stages share one gateway.
    pub fn from_gateway(gateway: Arc<G>) -> Self {
        Self::new(Arc::clone(&gateway), Arc::clone(&gateway), gateway)
    }
}

/// Run one batch against the gateway selected by `config.mode`.
///
/// Only fails if the HTTP client cannot be built; every call failure during
/// the batch is contained and shows up in the summary.
pub async fn run_batch(
    config: &Config,
    events: Option<EventHandle>,
) -> Result<BatchSummary, ApiError> {
    match config.mode {
        RunMode::Live => {
            let gateway = HttpGateway::new(config.endpoints.clone(), &config.http)?;
            info!(orders_url = %config.endpoints.orders_url, "Running batch against HTTP endpoints");
            Ok(run_with(BatchRunner::from_gateway(Arc::new(gateway)), events).await)
        }
        RunMode::Simulated => {
            info!("Running batch against simulated gateway");
            Ok(run_with(BatchRunner::from_gateway(Arc::new(SimulatedGateway::new())), events).await)
        }
    }
}

async fn run_with<G>(runner: BatchRunner<G, G, G>, events: Option<EventHandle>) -> BatchSummary
where
    G: OrderSource + AlertSink + UpdateSink,
{
    match events {
        Some(events) => runner.with_events(events).run().await,
        None => runner.run().await,
    }
}
