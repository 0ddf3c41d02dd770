//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Server host must be an IP address")]
    InvalidHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Fixed location needs both latitude and longitude")]
    IncompleteCoordinates,

    #[error("Fixed location is out of range")]
    CoordinatesOutOfRange,

    #[error("Search delay must not exceed 60000ms")]
    SearchDelayTooLong,

    #[error("AI retries must not exceed 10")]
    TooManyRetries,

    #[error("Web search result count must be between 1 and 20")]
    InvalidResultCount,
}
