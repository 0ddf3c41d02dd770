//! Mock Doctor Search for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::domain::doctor::Doctor;
use crate::ports::{DoctorSearch, SearchError, SearchQuery};

#[derive(Debug)]
enum MockResult {
    Doctors(Vec<Doctor>),
    Error(SearchError),
}

/// Scriptable doctor search. Records every query with its arrival instant.
///
/// Like the real client, it decorates results with a fallback avatar.
#[derive(Debug, Clone, Default)]
pub struct MockDoctorSearch {
    results: Arc<Mutex<VecDeque<MockResult>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<(SearchQuery, Instant)>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockDoctorSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result list.
    pub fn with_doctors(self, doctors: Vec<Doctor>) -> Self {
        lock(&self.results).push_back(MockResult::Doctors(doctors));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: SearchError) -> Self {
        lock(&self.results).push_back(MockResult::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Queries with the instant each arrived.
    pub fn calls(&self) -> Vec<(SearchQuery, Instant)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl DoctorSearch for MockDoctorSearch {
    async fn search(&self, query: SearchQuery) -> Result<Vec<Doctor>, SearchError> {
        lock(&self.calls).push((query, Instant::now()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.results).pop_front();
        match next {
            Some(MockResult::Doctors(doctors)) => {
                Ok(doctors.into_iter().map(Doctor::with_fallback_image).collect())
            }
            Some(MockResult::Error(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}
