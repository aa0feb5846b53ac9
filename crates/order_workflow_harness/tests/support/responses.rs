use order_workflow_harness::{
    ErrorDetails, InspectionData, TestStateResponse, TestStatus,
};
use serde_json::Value;

pub fn succeeded(output: Value, next_state: Option<&str>) -> TestStateResponse {
    TestStateResponse {
        status: TestStatus::Succeeded,
        output: Some(output.to_string()),
        error: None,
        cause: None,
        next_state: next_state.map(str::to_string),
        inspection_data: Some(InspectionData::default()),
    }
}

pub fn failed(error: &str, cause: &str) -> TestStateResponse {
    TestStateResponse {
        status: TestStatus::Failed,
        output: None,
        error: Some(error.to_string()),
        cause: Some(cause.to_string()),
        next_state: None,
        inspection_data: Some(InspectionData::default()),
    }
}

pub fn retriable(error: &str, cause: &str, retry_index: i32, backoff_seconds: i32) -> TestStateResponse {
    TestStateResponse {
        status: TestStatus::Retriable,
        output: None,
        error: Some(error.to_string()),
        cause: Some(cause.to_string()),
        next_state: None,
        inspection_data: Some(InspectionData {
            error_details: Some(ErrorDetails {
                retry_index: Some(retry_index),
                catch_index: None,
                retry_backoff_interval_seconds: Some(backoff_seconds),
            }),
            ..InspectionData::default()
        }),
    }
}

pub fn caught_error(error: &str, cause: &str, catch_index: i32, next_state: &str) -> TestStateResponse {
    TestStateResponse {
        status: TestStatus::CaughtError,
        output: Some(
            serde_json::json!({"error": {"Error": error, "Cause": cause}}).to_string(),
        ),
        error: Some(error.to_string()),
        cause: Some(cause.to_string()),
        next_state: Some(next_state.to_string()),
        inspection_data: Some(InspectionData {
            error_details: Some(ErrorDetails {
                retry_index: None,
                catch_index: Some(catch_index),
                retry_backoff_interval_seconds: None,
            }),
            ..InspectionData::default()
        }),
    }
}
