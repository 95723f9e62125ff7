//! Offline gateway for dry runs.
//!
//! Serves a fixed batch of sample orders, acknowledges every alert without a
//! network call and logs updates instead of posting them.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{AlertMessage, AlertSink, ApiError, OrderSource, UpdateSink};
use crate::order::Order;

const SAMPLE_ORDERS: &str = include_str!("sample_orders.json");

/// Gateway that never leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    payload: String,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedGateway {
    /// Create a gateway serving the built-in sample batch.
    pub fn new() -> Self {
        Self {
            payload: SAMPLE_ORDERS.to_string(),
        }
    }

    /// Create a gateway serving a custom JSON payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl OrderSource for SimulatedGateway {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        serde_json::from_str(&self.payload)
            .map_err(|e| ApiError::Decode(format!("Order payload is not an order array: {}", e)))
    }
}

#[async_trait]
impl AlertSink for SimulatedGateway {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), ApiError> {
        debug!(message = %alert.message, "Simulated alert acknowledged");
        Ok(())
    }
}

#[async_trait]
impl UpdateSink for SimulatedGateway {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn send_update(&self, order: &Order) -> Result<(), ApiError> {
        let payload = serde_json::to_string(order)
            .map_err(|e| ApiError::Request(format!("Failed to serialize order: {}", e)))?;
        info!(order_id = %order.order_id, payload = %payload, "Order successfully updated for processing");
        Ok(())
    }
}
