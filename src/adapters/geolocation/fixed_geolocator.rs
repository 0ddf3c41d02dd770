//! Fixed-position geolocator for environments without a positioning device.

use async_trait::async_trait;

use crate::ports::{GeolocationError, Geolocator, Position, PositionOptions};

/// Reports a configured position, or "unavailable" when none is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator {
    position: Option<(f64, f64)>,
}

impl FixedGeolocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Some((latitude, longitude)),
        }
    }

    /// A locator that never has a fix.
    pub fn unavailable() -> Self {
        Self { position: None }
    }

    pub fn from_option(position: Option<(f64, f64)>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, GeolocationError> {
        match self.position {
            Some((latitude, longitude)) => Ok(Position::new(latitude, longitude)),
            None => Err(GeolocationError::unavailable("no position configured")),
        }
    }
}
