//! One-call-per-step helper for walking a workflow state by state.
//!
//! Each call builds a fresh request, submits it, keeps the response and decoded
//! output, and checks the expected status (and next state when given) inline.
//! Chaining is explicit: pass the output of the previous step through
//! [`StateCall::previous_output`], typically `helper.last_output().cloned()`.

use serde_json::{json, Value};

use crate::adapters::test_state_api::TestStateApi;
use crate::assertions;
use crate::contract::{
    InspectionLevel, MockError, StateConfiguration, TestStateResponse, TestStatus,
};
use crate::definition::WorkflowDefinition;
use crate::error::TestStateError;
use crate::logging::{log_error, log_info};
use crate::request::TestStateRequestBuilder;
use crate::runner::StateTestRunner;

const COMPONENT: &str = "state_test_helper";

pub const DEFAULT_TASK_TOKEN: &str = "test-task-token";
pub const DEFAULT_EXECUTION_ID: &str = "test-execution-id";
pub const DEFAULT_RETRY_ERROR: &str = "Lambda.TooManyRequestsException";
pub const DEFAULT_RETRY_CAUSE: &str = "Request rate exceeded";
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Parameters of one helper step.
#[derive(Debug, Clone, PartialEq)]
pub struct StateCall {
    state_name: String,
    input: Option<Value>,
    previous_output: Option<Value>,
    use_previous_output: bool,
    mock_result: Option<Value>,
    mock_error: Option<MockError>,
    context: Option<Value>,
    state_configuration: Option<StateConfiguration>,
    expected_status: TestStatus,
    expected_next_state: Option<String>,
}

impl StateCall {
    pub fn new(state_name: impl Into<String>) -> Self {
        Self {
            state_name: state_name.into(),
            input: None,
            previous_output: None,
            use_previous_output: true,
            mock_result: None,
            mock_error: None,
            context: None,
            state_configuration: None,
            expected_status: TestStatus::Succeeded,
            expected_next_state: None,
        }
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Output of the preceding step; used as input when no explicit input is set.
    pub fn previous_output(mut self, output: Option<Value>) -> Self {
        self.previous_output = output;
        self
    }

    pub fn without_previous_output(mut self) -> Self {
        self.use_previous_output = false;
        self
    }

    pub fn mock_result(mut self, result: Value) -> Self {
        self.mock_result = Some(result);
        self
    }

    pub fn mock_error(mut self, error: MockError) -> Self {
        self.mock_error = Some(error);
        self
    }

    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn state_configuration(mut self, config: StateConfiguration) -> Self {
        self.state_configuration
            .get_or_insert_with(StateConfiguration::default)
            .merge(config);
        self
    }

    pub fn expect_status(mut self, status: TestStatus) -> Self {
        self.expected_status = status;
        self
    }

    pub fn expect_next_state(mut self, state_name: impl Into<String>) -> Self {
        self.expected_next_state = Some(state_name.into());
        self
    }

    fn has_mock(&self) -> bool {
        self.mock_result.is_some() || self.mock_error.is_some()
    }

    /// Explicit input, else the previous output (unless opted out), else nothing.
    /// A `null` previous output counts as nothing.
    fn resolved_input(&self) -> Option<Value> {
        if let Some(input) = &self.input {
            return Some(input.clone());
        }
        if self.use_previous_output {
            return self.previous_output.clone().filter(|output| !output.is_null());
        }
        None
    }

    fn to_request_builder(&self, inspection_level: InspectionLevel) -> TestStateRequestBuilder {
        let mut builder = TestStateRequestBuilder::new();
        if let Some(input) = self.resolved_input() {
            builder.set_input(input);
        }
        if let Some(result) = &self.mock_result {
            builder.set_mock_result(result);
        }
        if let Some(error) = &self.mock_error {
            builder.set_mock_error(error.clone());
        }
        if let Some(context) = &self.context {
            builder.set_context(context);
        }
        if let Some(config) = &self.state_configuration {
            builder.merge_state_configuration(config.clone());
        }
        builder.set_inspection_level(inspection_level);
        builder
    }
}

/// Identifiers injected for states that suspend until an external callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackContext {
    pub task_token: String,
    pub execution_id: String,
}

impl Default for CallbackContext {
    fn default() -> Self {
        Self {
            task_token: DEFAULT_TASK_TOKEN.to_string(),
            execution_id: DEFAULT_EXECUTION_ID.to_string(),
        }
    }
}

impl CallbackContext {
    pub fn to_context_value(&self) -> Value {
        json!({
            "Task": {"Token": self.task_token},
            "Execution": {"Id": self.execution_id},
        })
    }
}

/// A simulated failure at a given retry attempt.
///
/// `max_attempts` mirrors the retrier configured in the definition under test;
/// the helper only uses it to decide which status to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryScenario {
    pub error: String,
    pub cause: String,
    pub retry_count: i32,
    pub max_attempts: i32,
}

impl Default for RetryScenario {
    fn default() -> Self {
        Self {
            error: DEFAULT_RETRY_ERROR.to_string(),
            cause: DEFAULT_RETRY_CAUSE.to_string(),
            retry_count: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryScenario {
    pub fn at_attempt(retry_count: i32) -> Self {
        Self {
            retry_count,
            ..Self::default()
        }
    }

    pub fn expected_status(&self) -> TestStatus {
        if self.retry_count >= self.max_attempts {
            TestStatus::CaughtError
        } else {
            TestStatus::Retriable
        }
    }
}

pub struct StateTestHelper<'a> {
    api: &'a dyn TestStateApi,
    definition: &'a WorkflowDefinition,
    inspection_level: InspectionLevel,
    last_response: Option<TestStateResponse>,
    last_output: Option<Value>,
}

impl<'a> StateTestHelper<'a> {
    pub fn new(api: &'a dyn TestStateApi, definition: &'a WorkflowDefinition) -> Self {
        Self {
            api,
            definition,
            inspection_level: InspectionLevel::Debug,
            last_response: None,
            last_output: None,
        }
    }

    pub fn create_runner(&self) -> StateTestRunner<'a> {
        StateTestRunner::new(self.api, self.definition)
    }

    pub fn last_output(&self) -> Option<&Value> {
        self.last_output.as_ref()
    }

    pub fn last_response(&self) -> Option<&TestStateResponse> {
        self.last_response.as_ref()
    }

    pub fn reset_chain(&mut self) {
        self.last_output = None;
        self.last_response = None;
    }

    /// Runs one step and checks its status and, when set, its next state.
    #[track_caller]
    pub fn test_state(&mut self, call: StateCall) -> Result<TestStateResponse, TestStateError> {
        let request = call
            .to_request_builder(self.inspection_level)
            .build(self.definition, &call.state_name)?;

        let response = self.api.test_state(&request).map_err(|message| {
            log_error(
                COMPONENT,
                "state_step_failed",
                json!({
                    "state_name": call.state_name.clone(),
                    "error": message.clone(),
                }),
            );
            TestStateError::Api(message)
        })?;

        let output = response
            .decoded_output()
            .map_err(|error| TestStateError::MalformedOutput(error.to_string()))?;
        self.last_response = Some(response.clone());
        if let Some(output) = output {
            self.last_output = Some(output);
        }

        log_info(
            COMPONENT,
            "state_step_completed",
            json!({
                "state_name": call.state_name.clone(),
                "status": response.status.as_str(),
                "expected_status": call.expected_status.as_str(),
                "next_state": response.next_state.clone(),
            }),
        );

        assertions::assert_status(&response, call.expected_status);
        if let Some(expected) = &call.expected_next_state {
            assertions::assert_next_state(&response, expected);
        }

        Ok(response)
    }

    /// Branching states are evaluated by the service directly; mocks are a
    /// contract violation here.
    #[track_caller]
    pub fn test_choice_state(
        &mut self,
        call: StateCall,
    ) -> Result<TestStateResponse, TestStateError> {
        if call.has_mock() {
            panic!(
                "choice state {} is evaluated directly and cannot be mocked",
                call.state_name
            );
        }
        self.test_state(call.expect_status(TestStatus::Succeeded))
    }

    #[track_caller]
    pub fn test_task_state(&mut self, call: StateCall) -> Result<TestStateResponse, TestStateError> {
        self.test_state(call.expect_status(TestStatus::Succeeded))
    }

    #[track_caller]
    pub fn test_wait_for_task_token_state(
        &mut self,
        call: StateCall,
        callback: &CallbackContext,
    ) -> Result<TestStateResponse, TestStateError> {
        self.test_state(
            call.context(callback.to_context_value())
                .expect_status(TestStatus::Succeeded),
        )
    }

    /// Injects `scenario` as a mock error and expects `RETRIABLE` below the
    /// attempt limit, `CAUGHT_ERROR` at or above it. Retriable responses must
    /// also report a positive backoff and a retry index.
    #[track_caller]
    pub fn test_retry_mechanism(
        &mut self,
        call: StateCall,
        scenario: &RetryScenario,
    ) -> Result<TestStateResponse, TestStateError> {
        let expected_status = scenario.expected_status();
        let call = call
            .mock_error(MockError::new(
                scenario.error.clone(),
                scenario.cause.clone(),
            ))
            .state_configuration(StateConfiguration {
                retrier_retry_count: Some(scenario.retry_count),
                ..StateConfiguration::default()
            })
            .expect_status(expected_status);

        let response = self.test_state(call)?;
        if expected_status == TestStatus::Retriable {
            let Some(details) = response.error_details() else {
                panic!("retriable response should include inspectionData.errorDetails");
            };
            match details.retry_backoff_interval_seconds {
                Some(backoff) if backoff > 0 => {}
                Some(backoff) => panic!("backoff interval should be positive, got {backoff}"),
                None => panic!("retriable response should include retryBackoffIntervalSeconds"),
            }
            if details.retry_index.is_none() {
                panic!("retriable response should include retryIndex");
            }
        }
        Ok(response)
    }

    /// Succeed/Fail states: the expected status comes from `call`, and no next
    /// state may be reported.
    #[track_caller]
    pub fn test_terminal_state(
        &mut self,
        call: StateCall,
    ) -> Result<TestStateResponse, TestStateError> {
        let state_name = call.state_name.clone();
        let response = self.test_state(StateCall {
            expected_next_state: None,
            ..call
        })?;
        if let Some(next_state) = &response.next_state {
            panic!("terminal state {state_name} should not have a next state, got {next_state}");
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_input_wins_over_previous_output() {
        let call = StateCall::new("CheckValidation")
            .previous_output(Some(json!({"from": "previous"})))
            .input(json!({"from": "explicit"}));
        assert_eq!(call.resolved_input(), Some(json!({"from": "explicit"})));
    }

    #[test]
    fn previous_output_feeds_input_unless_opted_out() {
        let call = StateCall::new("CheckValidation").previous_output(Some(json!({"isValid": true})));
        assert_eq!(call.resolved_input(), Some(json!({"isValid": true})));

        let call = call.without_previous_output();
        assert_eq!(call.resolved_input(), None);
    }

    #[test]
    fn null_previous_output_falls_back_to_empty_input() {
        let call = StateCall::new("CheckValidation").previous_output(Some(Value::Null));
        assert_eq!(call.resolved_input(), None);
    }

    #[test]
    fn retry_scenario_switches_to_caught_error_at_max_attempts() {
        assert_eq!(RetryScenario::at_attempt(0).expected_status(), TestStatus::Retriable);
        assert_eq!(RetryScenario::at_attempt(2).expected_status(), TestStatus::Retriable);
        assert_eq!(RetryScenario::at_attempt(3).expected_status(), TestStatus::CaughtError);

        let scenario = RetryScenario {
            max_attempts: 2,
            retry_count: 2,
            ..RetryScenario::default()
        };
        assert_eq!(scenario.expected_status(), TestStatus::CaughtError);
    }

    #[test]
    fn callback_context_uses_task_and_execution_shape() {
        let context = CallbackContext::default().to_context_value();
        assert_eq!(
            context,
            json!({"Task": {"Token": "test-task-token"}, "Execution": {"Id": "test-execution-id"}})
        );
    }
}
