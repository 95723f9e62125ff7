use serde::{Deserialize, Serialize};

/// Events emitted by the pipeline as it works through a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    // Fetch
    OrdersFetched {
        source: String,
        count: usize,
    },
    FetchFailed {
        source: String,
        error: String,
    },

    // Alerts
    AlertSent {
        sink: String,
        order_id: String,
        item_id: String,
        description: String,
        /// Counter value after the increment.
        notifications: u32,
    },
    AlertFailed {
        sink: String,
        order_id: String,
        item_id: String,
        description: String,
        error: String,
    },

    // Orders
    OrderProcessed {
        order_id: String,
        status: String,
        delivered: usize,
        notified: usize,
        total: usize,
    },
    OrderSkipped {
        order_id: String,
        status: String,
    },

    // Updates
    UpdateSent {
        sink: String,
        order_id: String,
    },
    UpdateFailed {
        sink: String,
        order_id: String,
        error: String,
    },
}

impl PipelineEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::OrdersFetched { .. } => "orders_fetched",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::AlertSent { .. } => "alert_sent",
            Self::AlertFailed { .. } => "alert_failed",
            Self::OrderProcessed { .. } => "order_processed",
            Self::OrderSkipped { .. } => "order_skipped",
            Self::UpdateSent { .. } => "update_sent",
            Self::UpdateFailed { .. } => "update_failed",
        }
    }

    /// Get the order ID if this event relates to a single order
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::OrdersFetched { .. } | Self::FetchFailed { .. } => None,
            Self::AlertSent { order_id, .. }
            | Self::AlertFailed { order_id, .. }
            | Self::OrderProcessed { order_id, .. }
            | Self::OrderSkipped { order_id, .. }
            | Self::UpdateSent { order_id, .. }
            | Self::UpdateFailed { order_id, .. } => Some(order_id),
        }
    }
}
