//! AI responder configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_RETRIES: u32 = 10;

/// AI responder configuration
///
/// Without an `endpoint` the assistant falls back to the offline keyword
/// responder.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Chat function URL
    pub endpoint: Option<String>,

    /// Key sent as bearer token and `apikey` header
    pub api_key: Option<Secret<String>>,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// First retry delay in milliseconds; doubles on each retry
    #[serde(default = "default_backoff")]
    pub retry_backoff_ms: u64,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Configured endpoint, ignoring blank values.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(endpoint) = self.endpoint() {
            super::check_url(endpoint, "ai.endpoint")?;
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("ai.timeout_secs"));
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::TooManyRetries);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_backoff_ms: default_backoff(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

fn default_backoff() -> u64 {
    1000
}
