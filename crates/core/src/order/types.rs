//! Order and item types as exchanged with the order source and update endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::debug;

/// Identifier that the order source may send as a JSON number or string.
///
/// Any JSON number is accepted, floats and values past `i64` included. The
/// representation is kept so the update payload echoes it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpaqueId {
    Number(Number),
    Text(String),
}

impl fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpaqueId::Number(n) => write!(f, "{}", n),
            OpaqueId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OpaqueId {
    fn from(value: i64) -> Self {
        OpaqueId::Number(value.into())
    }
}

impl From<i32> for OpaqueId {
    fn from(value: i32) -> Self {
        OpaqueId::Number(value.into())
    }
}

impl From<&str> for OpaqueId {
    fn from(value: &str) -> Self {
        OpaqueId::Text(value.to_string())
    }
}

/// Identifier of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub OpaqueId);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<OpaqueId> for OrderId {
    fn from(value: OpaqueId) -> Self {
        OrderId(value)
    }
}

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        OrderId(OpaqueId::from(value))
    }
}

impl From<i32> for OrderId {
    fn from(value: i32) -> Self {
        OrderId(OpaqueId::from(value))
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        OrderId(OpaqueId::from(value))
    }
}

/// Identifier of an item within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub OpaqueId);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<OpaqueId> for ItemId {
    fn from(value: OpaqueId) -> Self {
        ItemId(value)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId(OpaqueId::from(value))
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        ItemId(OpaqueId::from(value))
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId(OpaqueId::from(value))
    }
}

/// Aggregate outcome of processing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// No item was delivered.
    #[serde(rename = "not processed")]
    NotProcessed,
    /// Some, but not all, items were delivered.
    #[serde(rename = "partial")]
    Partial,
    /// Every item was delivered.
    #[serde(rename = "processed")]
    Processed,
}

impl ProcessStatus {
    /// Derive the status from the delivered tally and the item count.
    ///
    /// An order with no items has nothing delivered and is `NotProcessed`.
    pub fn from_counts(delivered: usize, total: usize) -> Self {
        if delivered == 0 {
            ProcessStatus::NotProcessed
        } else if delivered < total {
            ProcessStatus::Partial
        } else {
            ProcessStatus::Processed
        }
    }

    /// Whether an order with this status is forwarded to the update endpoint.
    pub fn should_forward(&self) -> bool {
        matches!(self, ProcessStatus::Processed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::NotProcessed => "not processed",
            ProcessStatus::Partial => "partial",
            ProcessStatus::Processed => "processed",
        }
    }

    /// Parse one of the three wire literals.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not processed" => Some(ProcessStatus::NotProcessed),
            "partial" => Some(ProcessStatus::Partial),
            "processed" => Some(ProcessStatus::Processed),
            _ => None,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ItemId")]
    pub item_id: ItemId,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Status")]
    pub status: String,
    /// Number of alerts acknowledged for this item.
    #[serde(rename = "deliveryNotification", default)]
    pub delivery_notification: u32,
    /// Fields the pipeline does not interpret, forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(
        item_id: impl Into<ItemId>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            description: description.into(),
            status: status.into(),
            delivery_notification: 0,
            extra: Map::new(),
        }
    }

    pub fn with_notifications(mut self, count: u32) -> Self {
        self.delivery_notification = count;
        self
    }
}

/// An equipment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "OrderId")]
    pub order_id: OrderId,
    #[serde(rename = "Items")]
    pub items: Vec<Item>,
    #[serde(
        rename = "processStatus",
        default,
        deserialize_with = "deserialize_process_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub process_status: Option<ProcessStatus>,
    /// Fields the pipeline does not interpret, forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn new(order_id: impl Into<OrderId>, items: Vec<Item>) -> Self {
        Self {
            order_id: order_id.into(),
            items,
            process_status: None,
            extra: Map::new(),
        }
    }
}

/// The incoming status is recomputed on every pass, so it never rejects an
/// order: `""`, `null` and anything unrecognised read as absent.
fn deserialize_process_status<'de, D>(deserializer: D) -> Result<Option<ProcessStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    let status = match &raw {
        Some(Value::String(s)) => ProcessStatus::parse(s.trim()),
        _ => None,
    };
    match &raw {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.trim().is_empty() => {}
        Some(value) if status.is_none() => {
            debug!(process_status = %value, "Ignoring unrecognised processStatus");
        }
        Some(_) => {}
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_counts() {
        assert_eq!(ProcessStatus::from_counts(0, 2), ProcessStatus::NotProcessed);
        assert_eq!(ProcessStatus::from_counts(1, 2), ProcessStatus::Partial);
        assert_eq!(ProcessStatus::from_counts(2, 2), ProcessStatus::Processed);
    }

    #[test]
    fn test_status_for_empty_order() {
        assert_eq!(ProcessStatus::from_counts(0, 0), ProcessStatus::NotProcessed);
    }

    #[test]
    fn test_only_processed_is_forwarded() {
        assert!(ProcessStatus::Processed.should_forward());
        assert!(!ProcessStatus::Partial.should_forward());
        assert!(!ProcessStatus::NotProcessed.should_forward());
    }

    #[test]
    fn test_status_serializes_with_spaces() {
        let value = serde_json::to_value(ProcessStatus::NotProcessed).unwrap();
        assert_eq!(value, json!("not processed"));
        assert_eq!(ProcessStatus::NotProcessed.to_string(), "not processed");
    }

    #[test]
    fn test_deserialize_order_with_numeric_ids() {
        let order: Order = serde_json::from_value(json!({
            "OrderId": 1234,
            "Items": [
                { "ItemId": 1, "Description": "Wheelchair", "Status": "Delivered", "deliveryNotification": 0 }
            ]
        }))
        .unwrap();

        assert_eq!(order.order_id, OrderId::from(1234));
        assert_eq!(order.order_id.to_string(), "1234");
        assert_eq!(order.items[0].item_id, ItemId::from(1));
        assert!(order.process_status.is_none());
    }

    #[test]
    fn test_deserialize_order_with_string_ids() {
        let order: Order = serde_json::from_value(json!({
            "OrderId": "ORD-7",
            "Items": [
                { "ItemId": "A1", "Description": "Crutches - Adult", "Status": "In Transit" }
            ]
        }))
        .unwrap();

        assert_eq!(order.order_id.to_string(), "ORD-7");
        assert_eq!(order.items[0].delivery_notification, 0);
    }

    #[test]
    fn test_empty_process_status_is_absent() {
        let order: Order = serde_json::from_value(json!({
            "OrderId": 1,
            "Items": [],
            "processStatus": ""
        }))
        .unwrap();
        assert!(order.process_status.is_none());
    }

    #[test]
    fn test_unrecognised_process_status_is_absent() {
        for status in [json!("half done"), json!("Processed"), json!(3), json!({"a": 1})] {
            let order: Order = serde_json::from_value(json!({
                "OrderId": 1,
                "Items": [],
                "processStatus": status
            }))
            .unwrap();
            assert!(order.process_status.is_none(), "status {}", status);
        }
    }

    #[test]
    fn test_known_process_status_is_read() {
        let order: Order = serde_json::from_value(json!({
            "OrderId": 1,
            "Items": [],
            "processStatus": "partial"
        }))
        .unwrap();
        assert_eq!(order.process_status, Some(ProcessStatus::Partial));
    }

    #[test]
    fn test_float_and_large_ids_keep_their_form() {
        let order: Order = serde_json::from_str(
            r#"{
                "OrderId": 1234.0,
                "Items": [
                    { "ItemId": 18446744073709551615, "Description": "Wheelchair", "Status": "Delivered" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(order.order_id.to_string(), "1234.0");
        assert_eq!(order.items[0].item_id.to_string(), "18446744073709551615");

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["OrderId"], json!(1234.0));
        assert_eq!(value["Items"][0]["ItemId"], json!(u64::MAX));
    }

    #[test]
    fn test_missing_description_is_rejected() {
        let result: Result<Item, _> = serde_json::from_value(json!({
            "ItemId": 1,
            "Status": "Delivered"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let order: Order = serde_json::from_value(json!({
            "OrderId": 9,
            "Customer": "St. Mary's",
            "Items": [
                { "ItemId": 1, "Description": "Wheelchair", "Status": "Delivered", "Carrier": "UPS" }
            ]
        }))
        .unwrap();

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["Customer"], json!("St. Mary's"));
        assert_eq!(value["Items"][0]["Carrier"], json!("UPS"));
        assert_eq!(value["Items"][0]["deliveryNotification"], json!(0));
        assert!(value.get("processStatus").is_none());
    }
}
