use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::logging::log_info;

const COMPONENT: &str = "validate_order";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOrderEvent {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOrderResponse {
    pub status_code: u16,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

impl ValidateOrderResponse {
    fn rejected(error: &str) -> Self {
        Self {
            status_code: 400,
            is_valid: false,
            error: Some(error.to_string()),
            order_id: None,
            customer_id: None,
            item_count: None,
        }
    }
}

/// Checks are applied in order and the first failing one is reported.
pub fn validate_order(event: &ValidateOrderEvent) -> ValidateOrderResponse {
    log_info(
        COMPONENT,
        "order_validation_started",
        json!({
            "order_id": event.order_id.clone(),
            "customer_id": event.customer_id.clone(),
            "item_count": event.items.as_ref().map(Vec::len),
        }),
    );

    let Some(order_id) = present(&event.order_id) else {
        return ValidateOrderResponse::rejected("Missing orderId");
    };
    let Some(customer_id) = present(&event.customer_id) else {
        return ValidateOrderResponse::rejected("Missing customerId");
    };
    let item_count = event.items.as_ref().map_or(0, Vec::len);
    if item_count == 0 {
        return ValidateOrderResponse::rejected("No items in order");
    }

    ValidateOrderResponse {
        status_code: 200,
        is_valid: true,
        error: None,
        order_id: Some(order_id.to_string()),
        customer_id: Some(customer_id.to_string()),
        item_count: Some(item_count),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(order_id: Option<&str>, customer_id: Option<&str>, items: Option<Vec<Value>>) -> ValidateOrderEvent {
        ValidateOrderEvent {
            order_id: order_id.map(str::to_string),
            customer_id: customer_id.map(str::to_string),
            items,
        }
    }

    #[test]
    fn accepts_complete_order() {
        let response = validate_order(&event(
            Some("order-1"),
            Some("customer-1"),
            Some(vec![json!({"itemId": "item-1"}), json!({"itemId": "item-2"})]),
        ));

        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({
                "statusCode": 200,
                "isValid": true,
                "orderId": "order-1",
                "customerId": "customer-1",
                "itemCount": 2
            })
        );
    }

    #[test]
    fn reports_first_missing_field() {
        let response = validate_order(&event(Some(""), None, None));
        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({"statusCode": 400, "isValid": false, "error": "Missing orderId"})
        );

        let response = validate_order(&event(Some("order-1"), None, None));
        assert_eq!(response.error.as_deref(), Some("Missing customerId"));
    }

    #[test]
    fn rejects_orders_without_items() {
        let response = validate_order(&event(Some("order-1"), Some("customer-1"), Some(Vec::new())));
        assert_eq!(response.status_code, 400);
        assert_eq!(response.error.as_deref(), Some("No items in order"));

        let response = validate_order(&event(Some("order-1"), Some("customer-1"), None));
        assert_eq!(response.error.as_deref(), Some("No items in order"));
    }

    #[test]
    fn event_deserializes_null_fields_as_missing() {
        let event: ValidateOrderEvent =
            serde_json::from_value(json!({"orderId": "order-1", "customerId": null, "items": null}))
                .expect("event");
        assert_eq!(event.customer_id, None);
        assert_eq!(validate_order(&event).error.as_deref(), Some("Missing customerId"));
    }
}
