use std::fmt;

pub const PAYMENT_FAILURE_RATE_ENV: &str = "PAYMENT_FAILURE_RATE";
pub const NOTIFICATION_DEFAULT_RECIPIENT_ENV: &str = "NOTIFICATION_DEFAULT_RECIPIENT";

pub const DEFAULT_PAYMENT_FAILURE_RATE: f64 = 0.1;
pub const DEFAULT_NOTIFICATION_RECIPIENT: &str = "customer@example.com";

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

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentConfig {
    /// Probability in `[0, 1]` that a payment is declined.
    pub failure_rate: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            failure_rate: DEFAULT_PAYMENT_FAILURE_RATE,
        }
    }
}

impl PaymentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let Some(raw) = read(&lookup, PAYMENT_FAILURE_RATE_ENV) else {
            return Ok(Self::default());
        };
        let failure_rate: f64 = raw.parse().map_err(|error| {
            ConfigError::new(format!("{PAYMENT_FAILURE_RATE_ENV}: invalid number '{raw}': {error}"))
        })?;
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(ConfigError::new(format!(
                "{PAYMENT_FAILURE_RATE_ENV} must be between 0 and 1, got {failure_rate}"
            )));
        }
        Ok(Self { failure_rate })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub default_recipient: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_recipient: DEFAULT_NOTIFICATION_RECIPIENT.to_string(),
        }
    }
}

impl NotificationConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        read(&lookup, NOTIFICATION_DEFAULT_RECIPIENT_ENV)
            .map(|default_recipient| Self { default_recipient })
            .unwrap_or_default()
    }
}

fn read(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
