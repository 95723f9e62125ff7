//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the gateway traits,
//! allowing the whole pipeline to be exercised without real endpoints.
//!
//! # Example
//!
//! ```rust,ignore
//! use delivery_notifier_core::testing::{fixtures, MockGateway};
//!
//! let gateway = MockGateway::new();
//! gateway.set_orders(vec![fixtures::wheelchair_order("Delivered")]).await;
//!
//! let runner = BatchRunner::from_gateway(Arc::new(gateway.clone()));
//! runner.run().await;
//!
//! assert_eq!(gateway.update_count().await, 1);
//! ```

mod mock_gateway;

pub use mock_gateway::{MockGateway, RecordedAlert, RecordedUpdate};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::order::{Item, Order};

    /// Create an item with a zero notification counter.
    pub fn item(item_id: i64, description: &str, status: &str) -> Item {
        Item::new(item_id, description, status)
    }

    /// Order 1234: a wheelchair and a wheelchair ramp, both with `status`.
    pub fn wheelchair_order(status: &str) -> Order {
        Order::new(
            1234,
            vec![
                item(1, "Wheelchair", status),
                item(2, "Wheelchair ramp", status),
            ],
        )
    }

    /// Order with one item per status, in the given order.
    pub fn order_with_statuses(order_id: i64, statuses: &[&str]) -> Order {
        Order::new(
            order_id,
            statuses
                .iter()
                .enumerate()
                .map(|(i, status)| item(i as i64 + 1, &format!("Item {}", i + 1), status))
                .collect(),
        )
    }
}
