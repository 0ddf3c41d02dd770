//! Web search provider configuration (doctor search service)

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::web_search::TRAVILY_SEARCH_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Travily API key; required by the search service only
    pub api_key: Option<Secret<String>>,

    /// Results requested per query
    #[serde(default = "default_num_results")]
    pub num_results: u32,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl WebSearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&Secret<String>, ValidationError> {
        self.api_key
            .as_ref()
            .ok_or(ValidationError::MissingRequired("KABIRAJ__WEB_SEARCH__API_KEY"))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        super::check_url(&self.endpoint, "web_search.endpoint")?;
        if !(1..=20).contains(&self.num_results) {
            return Err(ValidationError::InvalidResultCount);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("web_search.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            num_results: default_num_results(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    TRAVILY_SEARCH_URL.to_string()
}

fn default_num_results() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}
