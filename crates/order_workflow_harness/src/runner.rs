//! Fluent single-state runner.
//!
//! ```no_run
//! # use order_workflow_harness::{StateTestRunner, TestStateApi, WorkflowDefinition};
//! # fn demo(api: &dyn TestStateApi, definition: &WorkflowDefinition) {
//! use serde_json::json;
//!
//! let mut runner = StateTestRunner::new(api, definition);
//! runner
//!     .with_input(json!({"orderId": "order-12345"}))
//!     .with_mock_result(&json!({"statusCode": 200, "isValid": true}))
//!     .execute("ValidateOrder")
//!     .expect("TestState call")
//!     .assert_succeeded()
//!     .assert_next_state("CheckValidation");
//! # }
//! ```

use serde_json::{json, Value};

use crate::adapters::test_state_api::TestStateApi;
use crate::assertions;
use crate::contract::{
    InspectionField, InspectionLevel, MockError, StateConfiguration, TestStateResponse,
    TestStatus,
};
use crate::definition::WorkflowDefinition;
use crate::error::TestStateError;
use crate::logging::{log_error, log_info};
use crate::request::TestStateRequestBuilder;

const COMPONENT: &str = "state_test_runner";

pub struct StateTestRunner<'a> {
    api: &'a dyn TestStateApi,
    definition: &'a WorkflowDefinition,
    builder: TestStateRequestBuilder,
    response: Option<TestStateResponse>,
}

impl<'a> StateTestRunner<'a> {
    pub fn new(api: &'a dyn TestStateApi, definition: &'a WorkflowDefinition) -> Self {
        Self {
            api,
            definition,
            builder: TestStateRequestBuilder::new(),
            response: None,
        }
    }

    /// Current accumulated configuration, as it would be submitted next.
    pub fn request_builder(&self) -> &TestStateRequestBuilder {
        &self.builder
    }

    pub fn with_input(&mut self, input: Value) -> &mut Self {
        self.builder.set_input(input);
        self
    }

    pub fn with_mock_result(&mut self, result: &Value) -> &mut Self {
        self.builder.set_mock_result(result);
        self
    }

    pub fn with_raw_mock_result(&mut self, result: impl Into<String>) -> &mut Self {
        self.builder.set_raw_mock_result(result);
        self
    }

    pub fn with_mock_error(
        &mut self,
        error: impl Into<String>,
        cause: impl Into<String>,
    ) -> &mut Self {
        self.builder.set_mock_error(MockError::new(error, cause));
        self
    }

    pub fn with_mock_error_output(&mut self, error: MockError) -> &mut Self {
        self.builder.set_mock_error(error);
        self
    }

    pub fn with_context(&mut self, context: &Value) -> &mut Self {
        self.builder.set_context(context);
        self
    }

    pub fn with_raw_context(&mut self, context: impl Into<String>) -> &mut Self {
        self.builder.set_raw_context(context);
        self
    }

    pub fn with_retrier_retry_count(&mut self, retry_count: i32) -> &mut Self {
        self.builder.merge_state_configuration(StateConfiguration {
            retrier_retry_count: Some(retry_count),
            ..StateConfiguration::default()
        });
        self
    }

    /// Attributes a Map/Parallel failure to a nested state.
    pub fn with_error_caused_by_state(&mut self, state_name: impl Into<String>) -> &mut Self {
        self.builder.merge_state_configuration(StateConfiguration {
            error_caused_by_state: Some(state_name.into()),
            ..StateConfiguration::default()
        });
        self
    }

    pub fn with_state_configuration(&mut self, config: StateConfiguration) -> &mut Self {
        self.builder.merge_state_configuration(config);
        self
    }

    pub fn with_inspection_level(&mut self, level: InspectionLevel) -> &mut Self {
        self.builder.set_inspection_level(level);
        self
    }

    pub fn with_reveal_secrets(&mut self, reveal: bool) -> &mut Self {
        self.builder.set_reveal_secrets(reveal);
        self
    }

    pub fn with_role_arn(&mut self, role_arn: impl Into<String>) -> &mut Self {
        self.builder.set_role_arn(Some(role_arn.into()));
        self
    }

    pub fn clear_mocks(&mut self) -> &mut Self {
        self.builder.clear_mocks();
        self
    }

    /// Submits the accumulated configuration for `state_name` and keeps the
    /// response for the assertions that follow. A failed call leaves no
    /// response behind.
    pub fn execute(&mut self, state_name: &str) -> Result<&mut Self, TestStateError> {
        self.response = None;
        let request = self.builder.build(self.definition, state_name)?;

        match self.api.test_state(&request) {
            Ok(response) => {
                log_info(
                    COMPONENT,
                    "test_state_completed",
                    json!({
                        "state_name": state_name,
                        "status": response.status.as_str(),
                        "next_state": response.next_state.clone(),
                        "mocked": request.mock.is_some(),
                    }),
                );
                self.response = Some(response);
                Ok(self)
            }
            Err(message) => {
                log_error(
                    COMPONENT,
                    "test_state_failed",
                    json!({
                        "state_name": state_name,
                        "error": message.clone(),
                    }),
                );
                Err(TestStateError::Api(message))
            }
        }
    }

    /// Forgets the last response; assertions fail again until the next `execute`.
    pub fn reset_response(&mut self) -> &mut Self {
        self.response = None;
        self
    }

    #[track_caller]
    pub fn response(&self) -> &TestStateResponse {
        self.last_response("reading the response")
    }

    /// Decoded output of the last call, `None` when the service returned none.
    #[track_caller]
    pub fn output(&self) -> Option<Value> {
        let response = self.last_response("reading the output");
        match response.decoded_output() {
            Ok(value) => value,
            Err(error) => panic!(
                "output is not valid JSON ({error}): {}",
                response.output.as_deref().unwrap_or_default()
            ),
        }
    }

    #[track_caller]
    pub fn assert_status(&self, expected: TestStatus) -> &Self {
        assertions::assert_status(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_succeeded(&self) -> &Self {
        self.assert_status(TestStatus::Succeeded)
    }

    #[track_caller]
    pub fn assert_failed(&self) -> &Self {
        self.assert_status(TestStatus::Failed)
    }

    #[track_caller]
    pub fn assert_caught_error(&self) -> &Self {
        self.assert_status(TestStatus::CaughtError)
    }

    #[track_caller]
    pub fn assert_retriable(&self) -> &Self {
        self.assert_status(TestStatus::Retriable)
    }

    #[track_caller]
    pub fn assert_next_state(&self, expected: &str) -> &Self {
        assertions::assert_next_state(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_no_next_state(&self) -> &Self {
        assertions::assert_no_next_state(self.last_response("asserting"));
        self
    }

    #[track_caller]
    pub fn assert_error(&self, expected: &str) -> &Self {
        assertions::assert_error(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_cause(&self, expected: &str) -> &Self {
        assertions::assert_cause(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_output_matches_json(&self, expected: &Value) -> &Self {
        assertions::assert_output_matches_json(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_inspection_field_json(&self, field: InspectionField, expected: &Value) -> &Self {
        assertions::assert_inspection_field_json(self.last_response("asserting"), field, expected);
        self
    }

    #[track_caller]
    pub fn assert_after_arguments(&self, expected: &Value) -> &Self {
        self.assert_inspection_field_json(InspectionField::AfterArguments, expected)
    }

    #[track_caller]
    pub fn assert_retry_backoff_interval_seconds(&self, expected: i32) -> &Self {
        assertions::assert_retry_backoff_interval_seconds(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_retry_index(&self, expected: i32) -> &Self {
        assertions::assert_retry_index(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    pub fn assert_catch_index(&self, expected: i32) -> &Self {
        assertions::assert_catch_index(self.last_response("asserting"), expected);
        self
    }

    #[track_caller]
    fn last_response(&self, operation: &str) -> &TestStateResponse {
        match &self.response {
            Some(response) => response,
            None => panic!("execute() must be called before {operation}"),
        }
    }
}
