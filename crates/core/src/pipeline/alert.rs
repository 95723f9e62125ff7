//! Delivery alert dispatch.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::types::AlertOutcome;
use crate::events::{emit, EventHandle, PipelineEvent};
use crate::gateway::{AlertMessage, AlertSink, ApiError};
use crate::order::{Item, OrderId};

/// Build the alert text for a delivered item.
///
/// Uses the item's counter as it is before this alert is acknowledged.
pub fn alert_message(order_id: &OrderId, item: &Item) -> String {
    format!(
        "Alert for delivered item: Order {}, Item: {}, Delivery Notifications: {}",
        order_id, item.description, item.delivery_notification
    )
}

/// Sends one alert per delivered item and keeps the item's counter.
pub struct AlertDispatcher<A: AlertSink> {
    sink: Arc<A>,
    events: Option<EventHandle>,
}

impl<A: AlertSink> AlertDispatcher<A> {
    pub fn new(sink: Arc<A>) -> Self {
        Self { sink, events: None }
    }

    /// Sets the event handle for reporting alert outcomes.
    pub fn with_events(mut self, events: EventHandle) -> Self {
        self.events = Some(events);
        self
    }

    /// Alert for `item` and bump its counter once the sink acknowledges.
    ///
    /// Failures are logged and reported as an outcome; the counter is left
    /// untouched and nothing is returned as an error.
    pub async fn send_alert(&self, item: &mut Item, order_id: &OrderId) -> AlertOutcome {
        let alert = AlertMessage::new(alert_message(order_id, item));
        let sink = self.sink.name().to_string();

        let outcome = match self.sink.send_alert(&alert).await {
            Ok(()) => {
                item.delivery_notification = item.delivery_notification.saturating_add(1);
                debug!(
                    sink = %sink,
                    order_id = %order_id,
                    item_id = %item.item_id,
                    notifications = item.delivery_notification,
                    "Alert sent for delivered item"
                );
                AlertOutcome::Sent {
                    notifications: item.delivery_notification,
                }
            }
            Err(ApiError::Status { status, body }) => {
                warn!(
                    sink = %sink,
                    order_id = %order_id,
                    item_id = %item.item_id,
                    status,
                    body = %body,
                    "Failed to send alert for delivered item: {}",
                    item.description
                );
                AlertOutcome::Rejected { status }
            }
            Err(e) if e.is_transport() => {
                error!(
                    sink = %sink,
                    order_id = %order_id,
                    item_id = %item.item_id,
                    error = %e,
                    "Network error occurred while sending alert message"
                );
                AlertOutcome::Failed {
                    error: e.to_string(),
                }
            }
            Err(e) => {
                error!(
                    sink = %sink,
                    order_id = %order_id,
                    item_id = %item.item_id,
                    error = %e,
                    "Unexpected error occurred while sending alert message"
                );
                AlertOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        let event = match &outcome {
            AlertOutcome::Sent { notifications } => PipelineEvent::AlertSent {
                sink,
                order_id: order_id.to_string(),
                item_id: item.item_id.to_string(),
                description: item.description.clone(),
                notifications: *notifications,
            },
            AlertOutcome::Rejected { status } => PipelineEvent::AlertFailed {
                sink,
                order_id: order_id.to_string(),
                item_id: item.item_id.to_string(),
                description: item.description.clone(),
                error: format!("HTTP {}", status),
            },
            AlertOutcome::Failed { error } => PipelineEvent::AlertFailed {
                sink,
                order_id: order_id.to_string(),
                item_id: item.item_id.to_string(),
                description: item.description.clone(),
                error: error.clone(),
            },
        };
        emit(&self.events, event).await;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGateway;
    use tokio::sync::mpsc;

    #[test]
    fn test_alert_message_template() {
        let item = Item::new(2, "Wheelchair ramp", "Delivered").with_notifications(3);
        assert_eq!(
            alert_message(&OrderId::from(1234), &item),
            "Alert for delivered item: Order 1234, Item: Wheelchair ramp, Delivery Notifications: 3"
        );
    }

    #[test]
    fn test_alert_message_with_string_order_id() {
        let item = Item::new("A", "Crutches - Adult", "Delivered");
        assert_eq!(
            alert_message(&OrderId::from("ORD-9"), &item),
            "Alert for delivered item: Order ORD-9, Item: Crutches - Adult, Delivery Notifications: 0"
        );
    }

    #[tokio::test]
    async fn test_success_increments_after_sending_old_count() {
        let gateway = MockGateway::new();
        let dispatcher = AlertDispatcher::new(Arc::new(gateway.clone()));
        let mut item = Item::new(1, "Wheelchair", "Delivered");

        let outcome = dispatcher.send_alert(&mut item, &OrderId::from(1234)).await;

        assert_eq!(outcome, AlertOutcome::Sent { notifications: 1 });
        assert_eq!(item.delivery_notification, 1);
        let alerts = gateway.recorded_alerts().await;
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].alert.message.ends_with("Delivery Notifications: 0"));
    }

    #[tokio::test]
    async fn test_rejected_alert_leaves_counter() {
        let gateway = MockGateway::new();
        gateway
            .push_alert_result(Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            }))
            .await;
        let dispatcher = AlertDispatcher::new(Arc::new(gateway));
        let mut item = Item::new(1, "Wheelchair", "Delivered").with_notifications(2);

        let outcome = dispatcher.send_alert(&mut item, &OrderId::from(1)).await;

        assert_eq!(outcome, AlertOutcome::Rejected { status: 500 });
        assert_eq!(item.delivery_notification, 2);
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_counter() {
        let gateway = MockGateway::new();
        gateway
            .set_alert_error(ApiError::Connection("refused".to_string()))
            .await;
        let dispatcher = AlertDispatcher::new(Arc::new(gateway));
        let mut item = Item::new(1, "Wheelchair", "Delivered");

        let outcome = dispatcher.send_alert(&mut item, &OrderId::from(1)).await;

        assert!(matches!(outcome, AlertOutcome::Failed { .. }));
        assert_eq!(item.delivery_notification, 0);
    }

    #[tokio::test]
    async fn test_events_emitted() {
        let gateway = MockGateway::new();
        gateway.push_alert_result(Ok(())).await;
        gateway.push_alert_result(Err(ApiError::Timeout)).await;
        let (tx, mut rx) = mpsc::channel(8);
        let dispatcher =
            AlertDispatcher::new(Arc::new(gateway)).with_events(EventHandle::new(tx));

        let mut first = Item::new(1, "Wheelchair", "Delivered");
        let mut second = Item::new(2, "Wheelchair ramp", "Delivered");
        dispatcher.send_alert(&mut first, &OrderId::from(5)).await;
        dispatcher.send_alert(&mut second, &OrderId::from(5)).await;

        let sent = rx.recv().await.unwrap().event;
        assert_eq!(
            sent,
            PipelineEvent::AlertSent {
                sink: "mock".to_string(),
                order_id: "5".to_string(),
                item_id: "1".to_string(),
                description: "Wheelchair".to_string(),
                notifications: 1,
            }
        );
        let failed = rx.recv().await.unwrap().event;
        assert!(matches!(
            failed,
            PipelineEvent::AlertFailed { ref sink, ref item_id, .. } if sink == "mock" && item_id == "2"
        ));
    }
}
