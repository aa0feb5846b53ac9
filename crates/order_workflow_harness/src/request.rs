//! Request assembly for single-state invocations.

use serde_json::Value;

use crate::contract::{
    InspectionLevel, MockError, MockInput, StateConfiguration, TestStateRequest,
    DEFAULT_STATE_INPUT,
};
use crate::definition::WorkflowDefinition;
use crate::error::TestStateError;

/// Accumulated invocation parameters. A plain value: cloning it snapshots the
/// configuration, and [`TestStateRequestBuilder::build`] never mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestStateRequestBuilder {
    input: Option<Value>,
    mock_result: Option<String>,
    mock_error: Option<MockError>,
    context: Option<String>,
    state_configuration: Option<StateConfiguration>,
    inspection_level: InspectionLevel,
    reveal_secrets: bool,
    role_arn: Option<String>,
}

impl TestStateRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    pub fn set_input(&mut self, input: Value) {
        self.input = Some(input);
    }

    pub fn set_mock_result(&mut self, result: &Value) {
        self.mock_result = Some(result.to_string());
    }

    /// Stores an already-serialized result payload as is.
    pub fn set_raw_mock_result(&mut self, result: impl Into<String>) {
        self.mock_result = Some(result.into());
    }

    pub fn set_mock_error(&mut self, error: MockError) {
        self.mock_error = Some(error);
    }

    pub fn set_context(&mut self, context: &Value) {
        self.context = Some(context.to_string());
    }

    pub fn set_raw_context(&mut self, context: impl Into<String>) {
        self.context = Some(context.into());
    }

    pub fn merge_state_configuration(&mut self, config: StateConfiguration) {
        self.state_configuration
            .get_or_insert_with(StateConfiguration::default)
            .merge(config);
    }

    pub fn set_inspection_level(&mut self, level: InspectionLevel) {
        self.inspection_level = level;
    }

    pub fn set_reveal_secrets(&mut self, reveal: bool) {
        self.reveal_secrets = reveal;
    }

    pub fn set_role_arn(&mut self, role_arn: Option<String>) {
        self.role_arn = role_arn;
    }

    /// Drops mock result, mock error, context and state configuration.
    /// Input, inspection level, secrets flag and role are kept.
    pub fn clear_mocks(&mut self) {
        self.mock_result = None;
        self.mock_error = None;
        self.context = None;
        self.state_configuration = None;
    }

    pub fn build(
        &self,
        definition: &WorkflowDefinition,
        state_name: &str,
    ) -> Result<TestStateRequest, TestStateError> {
        let input = match &self.input {
            Some(value) => serde_json::to_string(value)
                .map_err(|error| TestStateError::Serialization(error.to_string()))?,
            None => DEFAULT_STATE_INPUT.to_string(),
        };

        Ok(TestStateRequest {
            definition: definition.as_str().to_string(),
            state_name: state_name.to_string(),
            input,
            mock: self.resolve_mock(),
            context: self.context.clone(),
            state_configuration: self
                .state_configuration
                .clone()
                .filter(|config| !config.is_empty()),
            inspection_level: self.inspection_level,
            reveal_secrets: self.reveal_secrets,
            role_arn: self.role_arn.clone(),
        })
    }

    /// A configured error always wins over a configured result; the service
    /// accepts only one form per request.
    fn resolve_mock(&self) -> Option<MockInput> {
        match (&self.mock_result, &self.mock_error) {
            (_, Some(error)) => Some(MockInput::ErrorOutput(error.clone())),
            (Some(result), None) => Some(MockInput::Result(result.clone())),
            (None, None) => None,
        }
    }
}
