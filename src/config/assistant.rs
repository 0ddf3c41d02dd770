//! Assistant session settings

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::specialty::MatchMode;

/// Tunables of the conversational session.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    /// Delay between a specialty-bearing reply and the doctor search
    #[serde(default = "default_search_delay")]
    pub search_delay_ms: u64,

    /// `substring` or `word_boundary`
    #[serde(default)]
    pub specialty_matching: MatchMode,
}

impl AssistantSettings {
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.search_delay_ms > 60_000 {
            return Err(ValidationError::SearchDelayTooLong);
        }
        Ok(())
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            search_delay_ms: default_search_delay(),
            specialty_matching: MatchMode::default(),
        }
    }
}

fn default_search_delay() -> u64 {
    1000
}
