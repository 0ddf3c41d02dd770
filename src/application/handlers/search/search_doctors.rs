//! SearchDoctors command handler.
//!
//! Turns a `{specialty, location}` request into a web-search query and
//! extracts doctor records from the hits.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::doctor::{doctor_from_hit, Doctor};
use crate::ports::{WebSearchError, WebSearchProvider};

/// Message returned when specialty or location is missing.
pub const MISSING_PARAMETERS: &str = "Missing required parameters: specialty and location";

/// Command to search doctors near a position.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDoctorsCommand {
    pub specialty: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Errors that can occur when searching doctors.
#[derive(Debug, Error)]
pub enum SearchDoctorsError {
    /// Specialty empty, or a coordinate missing or zero.
    #[error("{}", MISSING_PARAMETERS)]
    MissingParameters,

    /// The web search provider failed.
    #[error("Web search failed: {0}")]
    Upstream(#[from] WebSearchError),
}

/// Result of a doctor search.
#[derive(Debug, Clone)]
pub struct SearchDoctorsResult {
    /// Query text sent to the provider.
    pub query: String,
    pub doctors: Vec<Doctor>,
}

/// Handler for doctor searches.
pub struct SearchDoctorsHandler {
    web_search: Arc<dyn WebSearchProvider>,
    num_results: u32,
}

impl SearchDoctorsHandler {
    pub fn new(web_search: Arc<dyn WebSearchProvider>, num_results: u32) -> Self {
        Self {
            web_search,
            num_results,
        }
    }

    pub async fn handle(&self, cmd: SearchDoctorsCommand) -> Result<SearchDoctorsResult, SearchDoctorsError> {
        let specialty = cmd.specialty.trim();
        let (latitude, longitude) = match (cmd.latitude, cmd.longitude) {
            (Some(lat), Some(lon)) if !specialty.is_empty() && lat != 0.0 && lon != 0.0 => (lat, lon),
            _ => return Err(SearchDoctorsError::MissingParameters),
        };

        let query = format!("{} doctors near {},{}", specialty, latitude, longitude);
        tracing::info!(query = %query, "Searching for doctors");

        let hits = self.web_search.search(&query, self.num_results).await?;
        let total = hits.len();
        let doctors: Vec<Doctor> = hits
            .iter()
            .filter_map(|hit| doctor_from_hit(&hit.title, &hit.description, &hit.url, specialty))
            .collect();

        tracing::debug!(hits = total, doctors = doctors.len(), "Extracted doctors from search hits");
        Ok(SearchDoctorsResult { query, doctors })
    }
}
