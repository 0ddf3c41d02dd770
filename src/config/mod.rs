//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `KABIRAJ` prefix and
//! nested values are separated by double underscores.
//!
//! Every section has defaults, so both binaries start with no environment
//! at all; the search service additionally needs a web search API key.
//!
//! # Example
//!
//! ```no_run
//! use kabiraj_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Search service on {}", config.server.socket_addr());
//! ```

mod ai;
mod assistant;
mod error;
mod location;
mod search;
mod server;
mod web_search;

pub use ai::AiConfig;
pub use assistant::AssistantSettings;
pub use error::{ConfigError, ValidationError};
pub use location::LocationConfig;
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};
pub use web_search::WebSearchConfig;

use serde::Deserialize;

use crate::application::AssistantConfig;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Search service listener and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// AI chat endpoint
    #[serde(default)]
    pub ai: AiConfig,

    /// Doctor search endpoint used by the assistant
    #[serde(default)]
    pub search: SearchConfig,

    /// Position query options
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub assistant: AssistantSettings,

    /// Web search provider used by the search service
    #[serde(default)]
    pub web_search: WebSearchConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `KABIRAJ` prefix
    /// 3. Splits nested keys on `__`
    ///
    /// # Environment Variable Format
    ///
    /// - `KABIRAJ__SERVER__PORT=8787` -> `server.port = 8787`
    /// - `KABIRAJ__AI__ENDPOINT=...` -> `ai.endpoint = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("KABIRAJ")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid URL, port, timeout
    /// or coordinate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.search.validate()?;
        self.location.validate()?;
        self.assistant.validate()?;
        self.web_search.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Session tunables assembled from the assistant and location sections.
    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig {
            search_delay: self.assistant.search_delay(),
            position_options: self.location.position_options(),
            match_mode: self.assistant.specialty_matching,
        }
    }
}

/// Accepts absolute http(s) URLs only.
fn check_url(value: &str, field: &'static str) -> Result<(), ValidationError> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ValidationError::InvalidUrl(field)),
    }
}
