//! Location configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::location::Coordinates;
use crate::ports::PositionOptions;

/// Position query options, plus the fixed position the terminal session
/// reports as its device location.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Oldest cached fix that may be reused
    #[serde(default = "default_maximum_age")]
    pub maximum_age_secs: u64,

    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.high_accuracy,
            timeout: Duration::from_secs(self.timeout_secs),
            maximum_age: Duration::from_secs(self.maximum_age_secs),
        }
    }

    /// The configured position, when both halves are present.
    pub fn fixed_position(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("location.timeout_secs"));
        }
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude)
                .map(|_| ())
                .map_err(|_| ValidationError::CoordinatesOutOfRange),
            _ => Err(ValidationError::IncompleteCoordinates),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            maximum_age_secs: default_maximum_age(),
            high_accuracy: default_high_accuracy(),
            latitude: None,
            longitude: None,
        }
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_maximum_age() -> u64 {
    10
}

fn default_high_accuracy() -> bool {
    true
}
