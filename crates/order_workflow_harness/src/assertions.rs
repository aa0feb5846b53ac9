//! Expectation checks over a single-state response.
//!
//! Every check panics with both the expected and the actual value on mismatch,
//! so they can be used directly inside `#[test]` functions.

use serde_json::Value;

use crate::contract::{ErrorDetails, InspectionField, TestStateResponse, TestStatus};

#[track_caller]
pub fn assert_status(response: &TestStateResponse, expected: TestStatus) {
    if response.status != expected {
        panic!(
            "expected status {expected}, got {} (error: {:?}, cause: {:?})",
            response.status, response.error, response.cause
        );
    }
}

#[track_caller]
pub fn assert_next_state(response: &TestStateResponse, expected: &str) {
    if response.next_state.as_deref() != Some(expected) {
        panic!(
            "expected next state {expected}, got {:?}",
            response.next_state
        );
    }
}

#[track_caller]
pub fn assert_no_next_state(response: &TestStateResponse) {
    if let Some(actual) = &response.next_state {
        panic!("expected no next state, got {actual}");
    }
}

#[track_caller]
pub fn assert_error(response: &TestStateResponse, expected: &str) {
    if response.error.as_deref() != Some(expected) {
        panic!("expected error {expected}, got {:?}", response.error);
    }
}

#[track_caller]
pub fn assert_cause(response: &TestStateResponse, expected: &str) {
    if response.cause.as_deref() != Some(expected) {
        panic!("expected cause {expected}, got {:?}", response.cause);
    }
}

/// Structural comparison: object key order and whitespace are irrelevant, and
/// numbers compare by value (`100` equals `100.0`).
#[track_caller]
pub fn assert_output_matches_json(response: &TestStateResponse, expected: &Value) {
    let actual = parse_payload("output", response.output.as_deref());
    if !matches_expected(actual.as_ref(), expected) {
        panic!(
            "expected output {expected}, got {}",
            response.output.as_deref().unwrap_or("<none>")
        );
    }
}

#[track_caller]
pub fn assert_inspection_field_json(
    response: &TestStateResponse,
    field: InspectionField,
    expected: &Value,
) {
    let raw = response
        .inspection_data
        .as_ref()
        .and_then(|inspection| inspection.field(field));
    let actual = parse_payload(field.as_str(), raw);
    if !matches_expected(actual.as_ref(), expected) {
        panic!(
            "expected {field} {expected}, got {}",
            raw.unwrap_or("<none>")
        );
    }
}

#[track_caller]
pub fn assert_retry_backoff_interval_seconds(response: &TestStateResponse, expected: i32) {
    let actual = error_details(response).and_then(|details| details.retry_backoff_interval_seconds);
    if actual != Some(expected) {
        panic!("expected backoff {expected}s, got {actual:?}");
    }
}

#[track_caller]
pub fn assert_retry_index(response: &TestStateResponse, expected: i32) {
    let actual = error_details(response).and_then(|details| details.retry_index);
    if actual != Some(expected) {
        panic!("expected retry policy index {expected}, got {actual:?}");
    }
}

#[track_caller]
pub fn assert_catch_index(response: &TestStateResponse, expected: i32) {
    let actual = error_details(response).and_then(|details| details.catch_index);
    if actual != Some(expected) {
        panic!("expected catch policy index {expected}, got {actual:?}");
    }
}

fn matches_expected(actual: Option<&Value>, expected: &Value) -> bool {
    actual.is_some_and(|actual| json_values_equal(actual, expected))
}

/// Deep equality where numbers are compared numerically.
pub fn json_values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            left == right || matches!((left.as_f64(), right.as_f64()), (Some(l), Some(r)) if l == r)
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(left, right)| json_values_equal(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right
                        .get(key)
                        .is_some_and(|other| json_values_equal(value, other))
                })
        }
        _ => left == right,
    }
}

fn error_details(response: &TestStateResponse) -> Option<&ErrorDetails> {
    response.error_details()
}

#[track_caller]
fn parse_payload(label: &str, raw: Option<&str>) -> Option<Value> {
    let raw = raw.filter(|text| !text.is_empty())?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(error) => panic!("{label} is not valid JSON ({error}): {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use serde_json::json;

    use super::*;
    use crate::contract::InspectionData;

    fn succeeded(output: &str) -> TestStateResponse {
        TestStateResponse {
            status: TestStatus::Succeeded,
            output: Some(output.to_string()),
            error: None,
            cause: None,
            next_state: Some("CheckValidation".to_string()),
            inspection_data: Some(InspectionData {
                after_arguments: Some("{\"Payload\":{\"orderId\":\"order-1\"}}".to_string()),
                ..InspectionData::default()
            }),
        }
    }

    fn panic_message(check: impl FnOnce()) -> String {
        let payload = catch_unwind(AssertUnwindSafe(check)).expect_err("check should panic");
        payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|text| text.to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn output_comparison_ignores_key_order_and_spacing() {
        let response = succeeded("{ \"b\": [1, 2], \"a\": {\"y\": true, \"x\": null} }");
        assert_output_matches_json(
            &response,
            &json!({"a": {"x": null, "y": true}, "b": [1, 2]}),
        );
    }

    #[test]
    fn integral_floats_match_their_integer_rendering() {
        let response = succeeded("{\"orderId\":\"o\",\"amount\":100,\"items\":[{\"price\":50}]}");
        assert_output_matches_json(
            &response,
            &json!({"orderId": "o", "amount": 100.0, "items": [{"price": 50.0}]}),
        );

        let message = panic_message(|| {
            assert_output_matches_json(&response, &json!({"orderId": "o", "amount": 100.5, "items": [{"price": 50}]}))
        });
        assert!(message.starts_with("expected output"));
    }

    #[test]
    fn numeric_equality_does_not_coerce_other_types() {
        assert!(json_values_equal(&json!(1), &json!(1.0)));
        assert!(!json_values_equal(&json!(1), &json!("1")));
        assert!(!json_values_equal(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(!json_values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn output_mismatch_names_expected_and_actual() {
        let response = succeeded("{\"isValid\":false}");
        let message = panic_message(|| {
            assert_output_matches_json(&response, &json!({"isValid": true}))
        });
        assert!(message.contains("expected output {\"isValid\":true}"));
        assert!(message.contains("got {\"isValid\":false}"));
    }

    #[test]
    fn status_mismatch_reports_both_statuses() {
        let response = succeeded("{}");
        let message = panic_message(|| assert_status(&response, TestStatus::CaughtError));
        assert!(message.starts_with("expected status CAUGHT_ERROR, got SUCCEEDED"));
    }

    #[test]
    fn next_state_checks_cover_terminal_states() {
        let mut response = succeeded("{}");
        assert_next_state(&response, "CheckValidation");

        let message = panic_message(|| assert_no_next_state(&response));
        assert_eq!(message, "expected no next state, got CheckValidation");

        response.next_state = None;
        assert_no_next_state(&response);
        let message = panic_message(|| assert_next_state(&response, "CheckValidation"));
        assert_eq!(message, "expected next state CheckValidation, got None");
    }

    #[test]
    fn inspection_field_is_compared_structurally() {
        let response = succeeded("{}");
        assert_inspection_field_json(
            &response,
            InspectionField::AfterArguments,
            &json!({"Payload": {"orderId": "order-1"}}),
        );

        let message = panic_message(|| {
            assert_inspection_field_json(&response, InspectionField::AfterResultPath, &json!({}))
        });
        assert!(message.contains("expected afterResultPath {}, got <none>"));
    }

    #[test]
    fn error_detail_checks_read_inspection_data() {
        let response: TestStateResponse = serde_json::from_value(json!({
            "status": "CAUGHT_ERROR",
            "error": "ValidationException",
            "cause": "bad",
            "nextState": "ValidationFailed",
            "inspectionData": {"errorDetails": {"catchIndex": 1, "retryIndex": 0, "retryBackoffIntervalSeconds": 4}}
        }))
        .expect("response");

        assert_error(&response, "ValidationException");
        assert_cause(&response, "bad");
        assert_catch_index(&response, 1);
        assert_retry_index(&response, 0);
        assert_retry_backoff_interval_seconds(&response, 4);

        let message = panic_message(|| assert_retry_backoff_interval_seconds(&response, 2));
        assert_eq!(message, "expected backoff 2s, got Some(4)");
    }
}
