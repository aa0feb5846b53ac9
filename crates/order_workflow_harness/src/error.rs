use std::fmt;

/// Failures raised while submitting a single-state invocation.
///
/// Assertion mismatches and contract violations panic instead; these errors
/// only cover the round trip itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStateError {
    /// The remote call failed before a response was produced.
    Api(String),
    /// The request could not be serialized.
    Serialization(String),
    /// The service reported an output that is not valid JSON.
    MalformedOutput(String),
}

impl fmt::Display for TestStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStateError::Api(message) => write!(f, "test state call failed: {message}"),
            TestStateError::Serialization(message) => {
                write!(f, "failed to serialize test state request: {message}")
            }
            TestStateError::MalformedOutput(message) => {
                write!(f, "test state output is not valid JSON: {message}")
            }
        }
    }
}

impl std::error::Error for TestStateError {}
