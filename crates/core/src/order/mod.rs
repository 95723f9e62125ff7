//! Order domain: typed orders and items, and delivery classification.

mod classifier;
mod types;

pub use classifier::{is_delivered, DELIVERED_STATUS};
pub use types::{Item, ItemId, OpaqueId, Order, OrderId, ProcessStatus};
