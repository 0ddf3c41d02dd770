//! Mock Geolocator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GeolocationError, Geolocator, Position, PositionOptions};

#[derive(Debug, Clone)]
enum MockFix {
    Position(f64, f64),
    Error(GeolocationError),
    Hang,
}

/// Scriptable geolocator. Records the options of every call.
#[derive(Debug, Clone, Default)]
pub struct MockGeolocator {
    fixes: Arc<Mutex<VecDeque<MockFix>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<PositionOptions>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGeolocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a fix. Coordinates are not validated here.
    pub fn with_position(self, latitude: f64, longitude: f64) -> Self {
        lock(&self.fixes).push_back(MockFix::Position(latitude, longitude));
        self
    }

    pub fn with_error(self, error: GeolocationError) -> Self {
        lock(&self.fixes).push_back(MockFix::Error(error));
        self
    }

    /// Queues a call that never completes.
    pub fn hanging(self) -> Self {
        lock(&self.fixes).push_back(MockFix::Hang);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<PositionOptions> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl Geolocator for MockGeolocator {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, GeolocationError> {
        lock(&self.calls).push(*options);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.fixes).pop_front();
        match next {
            Some(MockFix::Position(latitude, longitude)) => Ok(Position::new(latitude, longitude)),
            Some(MockFix::Error(err)) => Err(err),
            Some(MockFix::Hang) => std::future::pending().await,
            None => Err(GeolocationError::unavailable("no scripted position")),
        }
    }
}
