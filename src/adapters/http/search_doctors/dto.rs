//! Request/response DTOs for the doctor search endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::search::SearchDoctorsCommand;
use crate::domain::doctor::Doctor;

/// Body of `POST /search-doctors`. Every field is optional so that missing
/// parameters reach validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoctorsRequest {
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub location: Option<LocationDto>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LocationDto {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<SearchDoctorsRequest> for SearchDoctorsCommand {
    fn from(request: SearchDoctorsRequest) -> Self {
        let location = request.location.unwrap_or_default();
        Self {
            specialty: request.specialty.unwrap_or_default(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDoctorsResponse {
    pub doctors: Vec<Doctor>,
}

/// `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
