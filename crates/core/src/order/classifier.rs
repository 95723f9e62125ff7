use super::Item;

/// Status value that marks an item as delivered.
pub const DELIVERED_STATUS: &str = "Delivered";

/// Whether the item's status is `"Delivered"`, ignoring ASCII case.
///
/// Every other value, including an empty string or padded text, counts as
/// not delivered.
pub fn is_delivered(item: &Item) -> bool {
    item.status.eq_ignore_ascii_case(DELIVERED_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_status(status: &str) -> Item {
        Item::new(1, "Wheelchair", status)
    }

    #[test]
    fn test_delivered_any_case() {
        for status in ["Delivered", "delivered", "DELIVERED", "dElIvErEd"] {
            assert!(is_delivered(&item_with_status(status)), "{}", status);
        }
    }

    #[test]
    fn test_not_delivered() {
        for status in ["In Transit", "", "Delivered ", " delivered", "Undelivered", "Pending"] {
            assert!(!is_delivered(&item_with_status(status)), "{:?}", status);
        }
    }
}
