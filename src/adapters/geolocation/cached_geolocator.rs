//! Caching decorator honouring `PositionOptions::maximum_age`.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{GeolocationError, Geolocator, Position, PositionOptions};

/// Serves the last fix while it is younger than `maximum_age`.
pub struct CachedGeolocator<G> {
    inner: G,
    last_fix: Mutex<Option<Position>>,
}

impl<G: Geolocator> CachedGeolocator<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            last_fix: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<G: Geolocator> Geolocator for CachedGeolocator<G> {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError> {
        let cached = *self.last_fix.lock().await;
        if let Some(fix) = cached {
            if fix.age() <= options.maximum_age {
                tracing::debug!(age_ms = fix.age().as_millis() as u64, "Using cached position");
                return Ok(fix);
            }
        }

        let fix = self.inner.current_position(options).await?;
        *self.last_fix.lock().await = Some(fix);
        Ok(fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::geolocation::MockGeolocator;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn fresh_fix_is_reused() {
        let mock = MockGeolocator::new()
            .with_position(12.9, 77.6)
            .with_position(13.0, 77.7);
        let cached = CachedGeolocator::new(mock.clone());
        let options = PositionOptions::default();

        cached.current_position(&options).await.unwrap();
        tokio::time::advance(Duration::from_secs(9)).await;
        let second = cached.current_position(&options).await.unwrap();

        assert_eq!(second.latitude, 12.9);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_fix_is_refreshed() {
        let mock = MockGeolocator::new()
            .with_position(12.9, 77.6)
            .with_position(13.0, 77.7);
        let cached = CachedGeolocator::new(mock.clone());
        let options = PositionOptions::default();

        cached.current_position(&options).await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        let second = cached.current_position(&options).await.unwrap();

        assert_eq!(second.latitude, 13.0);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mock = MockGeolocator::new()
            .with_error(GeolocationError::PermissionDenied)
            .with_position(12.9, 77.6);
        let cached = CachedGeolocator::new(mock.clone());
        let options = PositionOptions::default();

        assert!(cached.current_position(&options).await.is_err());
        assert!(cached.current_position(&options).await.is_ok());
    }
}
