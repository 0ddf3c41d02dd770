//! Geolocation Port - Interface for the platform position query.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::location::Coordinates;
use crate::domain::foundation::ValidationError;

/// Port for asking the platform where the device is.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError>;
}

/// Options passed with each position query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// Upper bound for the whole query.
    pub timeout: Duration,
    /// Oldest cached fix that may be returned.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(15),
            maximum_age: Duration::from_secs(10),
        }
    }
}

/// A raw fix as reported by the platform. Not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub acquired_at: Instant,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            acquired_at: Instant::now(),
        }
    }

    /// Time elapsed since the fix was taken.
    pub fn age(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    /// Validated coordinates of the fix.
    pub fn coordinates(&self) -> Result<Coordinates, ValidationError> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Geolocation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("position query timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

impl GeolocationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::PositionUnavailable(message.into())
    }

    pub fn timeout(after: Duration) -> Self {
        Self::Timeout {
            timeout_ms: after.as_millis() as u64,
        }
    }
}

impl From<ValidationError> for GeolocationError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidPosition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_platform_request() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(15));
        assert_eq!(options.maximum_age, Duration::from_secs(10));
    }

    #[test]
    fn out_of_range_fix_fails_validation() {
        let err: GeolocationError = Position::new(95.0, 10.0).coordinates().unwrap_err().into();
        assert!(matches!(err, GeolocationError::InvalidPosition(_)));
    }

    #[test]
    fn timeout_reports_milliseconds() {
        assert_eq!(
            GeolocationError::timeout(Duration::from_secs(15)).to_string(),
            "position query timed out after 15000ms"
        );
    }
}
