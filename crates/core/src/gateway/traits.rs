//! Trait definitions for the collaborators the pipeline talks to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::order::Order;

/// Body of a delivery alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

impl AlertMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source of the order batch.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Returns the name of this implementation.
    fn name(&self) -> &str;

    /// Fetches the current batch of orders.
    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError>;
}

/// Receiver of delivery alerts.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Returns the name of this implementation.
    fn name(&self) -> &str;

    /// Delivers one alert. `Ok` means the endpoint acknowledged it.
    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), ApiError>;
}

/// Receiver of processed orders.
#[async_trait]
pub trait UpdateSink: Send + Sync {
    /// Returns the name of this implementation.
    fn name(&self) -> &str;

    /// Forwards the order, as mutated by processing.
    async fn send_update(&self, order: &Order) -> Result<(), ApiError>;
}
