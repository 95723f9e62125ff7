//! Mock gateway for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::gateway::{AlertMessage, AlertSink, ApiError, OrderSource, UpdateSink};
use crate::order::Order;

/// A recorded alert for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedAlert {
    /// The alert that was submitted.
    pub alert: AlertMessage,
    /// Whether the mock acknowledged it.
    pub success: bool,
}

/// A recorded update for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpdate {
    /// The order as it was forwarded.
    pub order: Order,
    /// Whether the mock acknowledged it.
    pub success: bool,
}

/// Mock implementation of `OrderSource`, `AlertSink` and `UpdateSink`.
///
/// Provides controllable behavior for testing:
/// - Serve a configurable order batch, or fail the fetch
/// - Script alert results call by call, or fail every alert
/// - Record alerts and updates for assertions
///
/// Clones share state, so one clone can be handed to the pipeline while the
/// test keeps another for assertions.
///
/// # Example
///
/// ```rust,ignore
/// use delivery_notifier_core::testing::{fixtures, MockGateway};
///
/// let gateway = MockGateway::new();
/// gateway.set_orders(vec![fixtures::wheelchair_order("Delivered")]).await;
/// gateway.push_alert_result(Err(ApiError::Timeout)).await;
///
/// // Run the pipeline...
///
/// let alerts = gateway.recorded_alerts().await;
/// assert!(!alerts[0].success);
/// ```
#[derive(Debug, Clone)]
pub struct MockGateway {
    /// Result served by the next fetch.
    orders: Arc<RwLock<Result<Vec<Order>, ApiError>>>,
    /// Number of fetches performed.
    fetches: Arc<RwLock<usize>>,
    /// Per-call alert results, consumed front to back.
    alert_script: Arc<RwLock<VecDeque<Result<(), ApiError>>>>,
    /// If set, every unscripted alert fails with this error.
    alert_error: Arc<RwLock<Option<ApiError>>>,
    /// Recorded alerts.
    alerts: Arc<RwLock<Vec<RecordedAlert>>>,
    /// If set, every update fails with this error.
    update_error: Arc<RwLock<Option<ApiError>>>,
    /// Recorded updates.
    updates: Arc<RwLock<Vec<RecordedUpdate>>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create a mock serving an empty batch and acknowledging every call.
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Ok(Vec::new()))),
            fetches: Arc::new(RwLock::new(0)),
            alert_script: Arc::new(RwLock::new(VecDeque::new())),
            alert_error: Arc::new(RwLock::new(None)),
            alerts: Arc::new(RwLock::new(Vec::new())),
            update_error: Arc::new(RwLock::new(None)),
            updates: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Serve these orders on fetch.
    pub async fn set_orders(&self, orders: Vec<Order>) {
        *self.orders.write().await = Ok(orders);
    }

    /// Fail every fetch with the given error.
    pub async fn set_fetch_error(&self, error: ApiError) {
        *self.orders.write().await = Err(error);
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        *self.fetches.read().await
    }

    /// Queue the result of the next unscripted alert call.
    pub async fn push_alert_result(&self, result: Result<(), ApiError>) {
        self.alert_script.write().await.push_back(result);
    }

    /// Fail every alert that has no scripted result.
    pub async fn set_alert_error(&self, error: ApiError) {
        *self.alert_error.write().await = Some(error);
    }

    /// Get all recorded alerts.
    pub async fn recorded_alerts(&self) -> Vec<RecordedAlert> {
        self.alerts.read().await.clone()
    }

    /// Get the number of alert calls made.
    pub async fn alert_count(&self) -> usize {
        self.alerts.read().await.len()
    }

    /// Fail every update with the given error.
    pub async fn set_update_error(&self, error: ApiError) {
        *self.update_error.write().await = Some(error);
    }

    /// Get all recorded updates.
    pub async fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.updates.read().await.clone()
    }

    /// Get the number of update calls made.
    pub async fn update_count(&self) -> usize {
        self.updates.read().await.len()
    }

    async fn next_alert_result(&self) -> Result<(), ApiError> {
        if let Some(result) = self.alert_script.write().await.pop_front() {
            return result;
        }
        match self.alert_error.read().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderSource for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        *self.fetches.write().await += 1;
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl AlertSink for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), ApiError> {
        let result = self.next_alert_result().await;
        self.alerts.write().await.push(RecordedAlert {
            alert: alert.clone(),
            success: result.is_ok(),
        });
        result
    }
}

#[async_trait]
impl UpdateSink for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_update(&self, order: &Order) -> Result<(), ApiError> {
        let result = match self.update_error.read().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        };
        self.updates.write().await.push(RecordedUpdate {
            order: order.clone(),
            success: result.is_ok(),
        });
        result
    }
}
