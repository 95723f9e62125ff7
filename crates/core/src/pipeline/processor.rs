//! Order processor: alerts for delivered items and aggregate status.

use std::sync::Arc;

use tracing::{debug, info};

use super::alert::AlertDispatcher;
use super::types::{ProcessTally, ProcessedOrder};
use crate::events::{emit, EventHandle, PipelineEvent};
use crate::gateway::AlertSink;
use crate::order::{is_delivered, Order, ProcessStatus};

/// Walks an order's items, alerting for each delivered one, and sets
/// `processStatus`.
///
/// The status counts items classified as delivered, whether or not their
/// alert was acknowledged. An order whose items are all delivered is
/// `processed` even if some alerts failed.
pub struct OrderProcessor<A: AlertSink> {
    dispatcher: AlertDispatcher<A>,
    events: Option<EventHandle>,
}

impl<A: AlertSink> OrderProcessor<A> {
    pub fn new(alerts: Arc<A>) -> Self {
        Self {
            dispatcher: AlertDispatcher::new(alerts),
            events: None,
        }
    }

    /// Sets the event handle for this processor and its alert dispatcher.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.dispatcher = self.dispatcher.with_events(events.clone());
        self.events = Some(events);
        self
    }

    /// Process the order and return it with updated counters and status.
    pub async fn process(&self, order: Order) -> Order {
        self.process_with_tally(order).await.order
    }

    /// Process the order, also returning the counts behind its status.
    pub async fn process_with_tally(&self, mut order: Order) -> ProcessedOrder {
        let mut tally = ProcessTally {
            total: order.items.len(),
            ..ProcessTally::default()
        };

        for item in order.items.iter_mut() {
            if !is_delivered(item) {
                debug!(
                    order_id = %order.order_id,
                    item_id = %item.item_id,
                    status = %item.status,
                    "Item not delivered"
                );
                continue;
            }

            let outcome = self.dispatcher.send_alert(item, &order.order_id).await;
            if outcome.is_sent() {
                tally.notified += 1;
            }
            tally.delivered += 1;
        }

        let status = ProcessStatus::from_counts(tally.delivered, tally.total);
        order.process_status = Some(status);

        info!(
            order_id = %order.order_id,
            status = %status,
            delivered = tally.delivered,
            notified = tally.notified,
            total = tally.total,
            "Order processed"
        );
        emit(
            &self.events,
            PipelineEvent::OrderProcessed {
                order_id: order.order_id.to_string(),
                status: status.to_string(),
                delivered: tally.delivered,
                notified: tally.notified,
                total: tally.total,
            },
        )
        .await;

        ProcessedOrder { order, tally }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ApiError;
    use crate::testing::{fixtures, MockGateway};

    fn processor(gateway: &MockGateway) -> OrderProcessor<MockGateway> {
        OrderProcessor::new(Arc::new(gateway.clone()))
    }

    #[tokio::test]
    async fn test_all_delivered_is_processed() {
        let gateway = MockGateway::new();
        let order = processor(&gateway)
            .process(fixtures::wheelchair_order("Delivered"))
            .await;

        assert_eq!(order.process_status, Some(ProcessStatus::Processed));
        assert!(order.items.iter().all(|i| i.delivery_notification == 1));
        assert_eq!(gateway.alert_count().await, 2);
    }

    #[tokio::test]
    async fn test_none_delivered_is_not_processed() {
        let gateway = MockGateway::new();
        let order = processor(&gateway)
            .process(fixtures::wheelchair_order("In Transit"))
            .await;

        assert_eq!(order.process_status, Some(ProcessStatus::NotProcessed));
        assert!(order.items.iter().all(|i| i.delivery_notification == 0));
        assert_eq!(gateway.alert_count().await, 0);
    }

    #[tokio::test]
    async fn test_mixed_is_partial() {
        let gateway = MockGateway::new();
        let order = processor(&gateway)
            .process(fixtures::order_with_statuses(
                7,
                &["Delivered", "In Transit", "delivered"],
            ))
            .await;

        assert_eq!(order.process_status, Some(ProcessStatus::Partial));
        let counters: Vec<u32> = order.items.iter().map(|i| i.delivery_notification).collect();
        assert_eq!(counters, vec![1, 0, 1]);
    }

    #[tokio::test]
    async fn test_failed_alert_still_counts_as_delivered() {
        let gateway = MockGateway::new();
        gateway.push_alert_result(Ok(())).await;
        gateway
            .push_alert_result(Err(ApiError::Status {
                status: 502,
                body: String::new(),
            }))
            .await;

        let processed = processor(&gateway)
            .process_with_tally(fixtures::wheelchair_order("Delivered"))
            .await;

        assert_eq!(processed.status(), ProcessStatus::Processed);
        assert_eq!(processed.order.items[0].delivery_notification, 1);
        assert_eq!(processed.order.items[1].delivery_notification, 0);
        assert_eq!(
            processed.tally,
            ProcessTally {
                delivered: 2,
                notified: 1,
                total: 2
            }
        );
    }

    #[tokio::test]
    async fn test_items_alerted_in_order() {
        let gateway = MockGateway::new();
        processor(&gateway)
            .process(fixtures::order_with_statuses(3, &["Delivered", "Delivered", "Delivered"]))
            .await;

        let messages: Vec<String> = gateway
            .recorded_alerts()
            .await
            .into_iter()
            .map(|r| r.alert.message)
            .collect();
        assert!(messages[0].contains("Item: Item 1,"));
        assert!(messages[1].contains("Item: Item 2,"));
        assert!(messages[2].contains("Item: Item 3,"));
    }

    #[tokio::test]
    async fn test_empty_order_is_not_processed() {
        let gateway = MockGateway::new();
        let order = processor(&gateway).process(Order::new(1, vec![])).await;
        assert_eq!(order.process_status, Some(ProcessStatus::NotProcessed));
    }

    #[tokio::test]
    async fn test_reprocessing_recomputes_same_status() {
        let gateway = MockGateway::new();
        let processor = processor(&gateway);

        let once = processor.process(fixtures::wheelchair_order("Delivered")).await;
        let twice = processor.process(once).await;

        assert_eq!(twice.process_status, Some(ProcessStatus::Processed));
        assert!(twice.items.iter().all(|i| i.delivery_notification == 2));
    }
}
