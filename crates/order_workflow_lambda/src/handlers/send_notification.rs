use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::NotificationConfig;
use crate::logging::log_info;

const COMPONENT: &str = "send_notification";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationEvent {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    pub status_code: u16,
    pub notification_sent: bool,
    pub order_id: Option<String>,
    pub recipient: String,
    pub message: String,
}

/// Simulated order confirmation; nothing is delivered.
pub fn send_notification(
    event: &SendNotificationEvent,
    config: &NotificationConfig,
) -> SendNotificationResponse {
    let recipient = event
        .customer_email
        .clone()
        .unwrap_or_else(|| config.default_recipient.clone());

    log_info(
        COMPONENT,
        "notification_sent",
        json!({
            "order_id": event.order_id.clone(),
            "recipient": recipient.clone(),
        }),
    );

    SendNotificationResponse {
        status_code: 200,
        notification_sent: true,
        order_id: event.order_id.clone(),
        message: format!("Order confirmation sent to {recipient}"),
        recipient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirms_to_customer_email() {
        let event = SendNotificationEvent {
            order_id: Some("order-1".to_string()),
            customer_email: Some("buyer@example.com".to_string()),
        };

        let response = send_notification(&event, &NotificationConfig::default());

        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({
                "statusCode": 200,
                "notificationSent": true,
                "orderId": "order-1",
                "recipient": "buyer@example.com",
                "message": "Order confirmation sent to buyer@example.com"
            })
        );
    }

    #[test]
    fn falls_back_to_configured_recipient() {
        let event: SendNotificationEvent =
            serde_json::from_value(json!({"orderId": "order-2"})).expect("event");
        let config = NotificationConfig {
            default_recipient: "orders@example.com".to_string(),
        };

        let response = send_notification(&event, &config);

        assert_eq!(response.recipient, "orders@example.com");
        assert_eq!(response.message, "Order confirmation sent to orders@example.com");
    }
}
