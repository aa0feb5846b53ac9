use std::fmt;
use std::path::PathBuf;

use crate::contract::InspectionLevel;
use crate::definition::DEFAULT_DEFINITION_PATH;

pub const DEFAULT_REGION: &str = "ca-central-1";

pub const REGION_ENV: &str = "SFN_TEST_REGION";
pub const DEFINITION_PATH_ENV: &str = "SFN_TEST_DEFINITION_PATH";
pub const INSPECTION_LEVEL_ENV: &str = "SFN_TEST_INSPECTION_LEVEL";
pub const ROLE_ARN_ENV: &str = "SFN_TEST_ROLE_ARN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Session-wide settings for talking to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub region: String,
    pub definition_path: PathBuf,
    pub inspection_level: InspectionLevel,
    pub role_arn: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            definition_path: PathBuf::from(DEFAULT_DEFINITION_PATH),
            inspection_level: InspectionLevel::default(),
            role_arn: None,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        let inspection_level = match read(INSPECTION_LEVEL_ENV) {
            Some(value) => value
                .parse()
                .map_err(|error: String| ConfigError::new(format!("{INSPECTION_LEVEL_ENV}: {error}")))?,
            None => defaults.inspection_level,
        };

        Ok(Self {
            region: read(REGION_ENV).unwrap_or(defaults.region),
            definition_path: read(DEFINITION_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.definition_path),
            inspection_level,
            role_arn: read(ROLE_ARN_ENV),
        })
    }
}
