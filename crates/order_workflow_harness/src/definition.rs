//! Workflow definition loading.
//!
//! The definition is opaque to the harness: it is checked to be a JSON object
//! and then handed to the service byte-for-byte as it was read.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

pub const DEFAULT_DEFINITION_PATH: &str = "statemachine/order_processing.asl.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionError {
    message: String,
}

impl DefinitionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DefinitionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefinition {
    text: String,
}

impl WorkflowDefinition {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|error| {
            DefinitionError::new(format!(
                "failed to read workflow definition '{}': {error}",
                path.display()
            ))
        })?;
        Self::from_text(text)
    }

    pub fn from_text(text: impl Into<String>) -> Result<Self, DefinitionError> {
        let text = text.into();
        let parsed: Value = serde_json::from_str(&text)
            .map_err(|error| DefinitionError::new(format!("malformed workflow definition: {error}")))?;
        if !parsed.is_object() {
            return Err(DefinitionError::new(
                "workflow definition must be a JSON object",
            ));
        }
        Ok(Self { text })
    }

    pub fn from_value(value: &Value) -> Result<Self, DefinitionError> {
        let text = serde_json::to_string(value).map_err(|error| {
            DefinitionError::new(format!("failed to serialize workflow definition: {error}"))
        })?;
        Self::from_text(text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
