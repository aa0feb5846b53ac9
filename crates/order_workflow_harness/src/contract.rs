use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_STATE_INPUT: &str = "{}";

/// Outcome reported by the service for a single-state invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    Succeeded,
    Failed,
    CaughtError,
    Retriable,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::CaughtError => "CAUGHT_ERROR",
            Self::Retriable => "RETRIABLE",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SUCCEEDED" => Ok(Self::Succeeded),
            "FAILED" => Ok(Self::Failed),
            "CAUGHT_ERROR" => Ok(Self::CaughtError),
            "RETRIABLE" => Ok(Self::Retriable),
            other => Err(format!("unknown test status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionLevel {
    Info,
    #[default]
    Debug,
    Trace,
}

impl InspectionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for InspectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InspectionLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            "TRACE" => Ok(Self::Trace),
            other => Err(format!(
                "unknown inspection level '{other}' (expected INFO, DEBUG or TRACE)"
            )),
        }
    }
}

/// Simulated failure injected in place of the state's real work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockError {
    pub error: String,
    pub cause: String,
}

impl MockError {
    pub fn new(error: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            cause: cause.into(),
        }
    }

    /// Accepts the `{"Error": .., "Cause": ..}` shape used by state error outputs.
    /// Missing members become empty strings.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let Some(object) = value.as_object() else {
            return Err("mock error must be a JSON object".to_string());
        };

        let member = |name: &str| -> Result<String, String> {
            match object.get(name) {
                None | Some(Value::Null) => Ok(String::new()),
                Some(Value::String(text)) => Ok(text.clone()),
                Some(other) => Err(format!("mock error '{name}' must be a string, got {other}")),
            }
        };

        Ok(Self {
            error: member("Error")?,
            cause: member("Cause")?,
        })
    }
}

/// The oneof carried by a submitted request. Never holds both forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MockInput {
    Result(String),
    ErrorOutput(MockError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StateConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrier_retry_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_caused_by_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_iteration_failure_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_item_reader_data: Option<String>,
}

impl StateConfiguration {
    /// Parses a generic knob map, e.g. `{"errorCausedByState": "ProcessItem"}`.
    pub fn from_value(value: Value) -> Result<Self, String> {
        serde_json::from_value(value)
            .map_err(|error| format!("invalid state configuration: {error}"))
    }

    /// Field-wise merge: knobs set on `other` override ours, unset ones keep ours.
    pub fn merge(&mut self, other: StateConfiguration) {
        if other.retrier_retry_count.is_some() {
            self.retrier_retry_count = other.retrier_retry_count;
        }
        if other.error_caused_by_state.is_some() {
            self.error_caused_by_state = other.error_caused_by_state;
        }
        if other.map_iteration_failure_count.is_some() {
            self.map_iteration_failure_count = other.map_iteration_failure_count;
        }
        if other.map_item_reader_data.is_some() {
            self.map_item_reader_data = other.map_item_reader_data;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestStateRequest {
    pub definition: String,
    pub state_name: String,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<MockInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_configuration: Option<StateConfiguration>,
    pub inspection_level: InspectionLevel,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub reveal_secrets: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_backoff_interval_seconds: Option<i32>,
}

/// Serialized payload snapshots taken while the state ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionField {
    Input,
    AfterInputPath,
    AfterParameters,
    AfterArguments,
    Result,
    AfterResultSelector,
    AfterResultPath,
    Variables,
}

impl InspectionField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::AfterInputPath => "afterInputPath",
            Self::AfterParameters => "afterParameters",
            Self::AfterArguments => "afterArguments",
            Self::Result => "result",
            Self::AfterResultSelector => "afterResultSelector",
            Self::AfterResultPath => "afterResultPath",
            Self::Variables => "variables",
        }
    }
}

impl fmt::Display for InspectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_input_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_arguments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_result_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_result_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerated_failure_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerated_failure_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<i32>,
}

impl InspectionData {
    pub fn field(&self, field: InspectionField) -> Option<&str> {
        let value = match field {
            InspectionField::Input => &self.input,
            InspectionField::AfterInputPath => &self.after_input_path,
            InspectionField::AfterParameters => &self.after_parameters,
            InspectionField::AfterArguments => &self.after_arguments,
            InspectionField::Result => &self.result,
            InspectionField::AfterResultSelector => &self.after_result_selector,
            InspectionField::AfterResultPath => &self.after_result_path,
            InspectionField::Variables => &self.variables,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestStateResponse {
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_data: Option<InspectionData>,
}

impl TestStateResponse {
    /// Decodes `output`; `Ok(None)` when the service returned no output.
    pub fn decoded_output(&self) -> Result<Option<Value>, serde_json::Error> {
        self.output
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(serde_json::from_str)
            .transpose()
    }

    pub fn error_details(&self) -> Option<&ErrorDetails> {
        self.inspection_data
            .as_ref()
            .and_then(|inspection| inspection.error_details.as_ref())
    }
}
