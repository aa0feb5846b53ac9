use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::PaymentConfig;
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "process_payment";
const FALLBACK_REQUEST_ID: &str = "test-request-id";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentEvent {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentResponse {
    pub status_code: u16,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_processed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Simulated charge: draws a payment id and approves unless a uniform draw
/// falls at or below `config.failure_rate`.
pub fn process_payment(
    event: &ProcessPaymentEvent,
    request_id: Option<&str>,
    config: &PaymentConfig,
    rng: &mut impl Rng,
) -> ProcessPaymentResponse {
    let payment_id = format!("pay_{}", rng.gen_range(100_000..=999_999));
    let approved = rng.gen::<f64>() > config.failure_rate;
    payment_response(event, request_id, payment_id, approved)
}

pub fn payment_response(
    event: &ProcessPaymentEvent,
    request_id: Option<&str>,
    payment_id: String,
    approved: bool,
) -> ProcessPaymentResponse {
    if !approved {
        log_error(
            COMPONENT,
            "payment_declined",
            json!({
                "order_id": event.order_id.clone(),
                "payment_id": payment_id,
            }),
        );
        return ProcessPaymentResponse {
            status_code: 400,
            payment_status: PaymentStatus::Failed,
            payment_id: None,
            order_id: event.order_id.clone(),
            customer_id: event.customer_id.clone(),
            amount_processed: None,
            transaction_time: None,
            error: Some("Payment processing failed".to_string()),
        };
    }

    let amount = event.total_amount.unwrap_or(0.0);
    log_info(
        COMPONENT,
        "payment_processed",
        json!({
            "order_id": event.order_id.clone(),
            "payment_id": payment_id.clone(),
            "amount": amount,
        }),
    );
    ProcessPaymentResponse {
        status_code: 200,
        payment_status: PaymentStatus::Success,
        payment_id: Some(payment_id),
        order_id: event.order_id.clone(),
        customer_id: event.customer_id.clone(),
        amount_processed: Some(amount),
        transaction_time: Some(request_id.unwrap_or(FALLBACK_REQUEST_ID).to_string()),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    use super::*;

    fn order_event() -> ProcessPaymentEvent {
        ProcessPaymentEvent {
            order_id: Some("order-1".to_string()),
            customer_id: Some("customer-1".to_string()),
            total_amount: Some(150.75),
        }
    }

    #[test]
    fn approved_payment_echoes_order_and_request_id() {
        let response = payment_response(&order_event(), Some("req-1"), "pay_123456".to_string(), true);

        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({
                "statusCode": 200,
                "paymentStatus": "SUCCESS",
                "paymentId": "pay_123456",
                "orderId": "order-1",
                "customerId": "customer-1",
                "amountProcessed": 150.75,
                "transactionTime": "req-1"
            })
        );
    }

    #[test]
    fn declined_payment_reports_failure_without_payment_id() {
        let response = payment_response(&order_event(), Some("req-1"), "pay_123456".to_string(), false);

        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({
                "statusCode": 400,
                "paymentStatus": "FAILED",
                "orderId": "order-1",
                "customerId": "customer-1",
                "error": "Payment processing failed"
            })
        );
    }

    #[test]
    fn missing_amount_and_request_id_use_fallbacks() {
        let event = ProcessPaymentEvent {
            order_id: None,
            customer_id: None,
            total_amount: None,
        };
        let response = payment_response(&event, None, "pay_100000".to_string(), true);

        assert_eq!(response.amount_processed, Some(0.0));
        assert_eq!(response.transaction_time.as_deref(), Some("test-request-id"));
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["orderId"], serde_json::Value::Null);
    }

    #[test]
    fn payment_ids_stay_in_six_digit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = PaymentConfig { failure_rate: 0.0 };

        for _ in 0..200 {
            let response = process_payment(&order_event(), Some("req"), &config, &mut rng);
            let payment_id = response.payment_id.expect("approved payments carry an id");
            let digits: u32 = payment_id
                .strip_prefix("pay_")
                .expect("pay_ prefix")
                .parse()
                .expect("numeric id");
            assert!((100_000..=999_999).contains(&digits));
        }
    }

    #[test]
    fn failure_rate_of_one_declines_every_payment() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = PaymentConfig { failure_rate: 1.0 };

        for _ in 0..50 {
            let response = process_payment(&order_event(), None, &config, &mut rng);
            assert_eq!(response.payment_status, PaymentStatus::Failed);
        }
    }

    #[test]
    fn default_failure_rate_approves_most_payments() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = PaymentConfig::default();

        let approved = (0..1_000)
            .filter(|_| {
                process_payment(&order_event(), None, &config, &mut rng).payment_status
                    == PaymentStatus::Success
            })
            .count();
        assert!((800..=980).contains(&approved), "approved {approved} of 1000");
    }
}
