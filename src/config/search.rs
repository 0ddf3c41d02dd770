//! Doctor search client configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the assistant sends doctor searches.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        super::check_url(&self.endpoint, "search.endpoint")?;
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("search.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8787/search-doctors".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_service() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8787/search-doctors");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_relative_endpoint() {
        let config = SearchConfig {
            endpoint: "/search-doctors".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUrl("search.endpoint")));
    }
}
