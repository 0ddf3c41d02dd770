//! HTTP handlers for the doctor search service.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::search::{SearchDoctorsError, SearchDoctorsHandler};

use super::dto::{ErrorResponse, HealthResponse, SearchDoctorsRequest, SearchDoctorsResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the search service routes.
#[derive(Clone)]
pub struct SearchServiceState {
    pub search_handler: Arc<SearchDoctorsHandler>,
}

impl SearchServiceState {
    pub fn new(search_handler: SearchDoctorsHandler) -> Self {
        Self {
            search_handler: Arc::new(search_handler),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /search-doctors - Find doctors of a specialty near a position
pub async fn search_doctors(
    State(state): State<SearchServiceState>,
    payload: Result<Json<SearchDoctorsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SearchApiError> {
    let Json(request) = payload?;

    let result = state.search_handler.handle(request.into()).await?;

    Ok(Json(SearchDoctorsResponse {
        doctors: result.doctors,
    }))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper rendering `{"error": ...}` bodies.
#[derive(Debug)]
pub enum SearchApiError {
    Search(SearchDoctorsError),
    BadBody(String),
}

impl From<SearchDoctorsError> for SearchApiError {
    fn from(err: SearchDoctorsError) -> Self {
        Self::Search(err)
    }
}

impl From<JsonRejection> for SearchApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadBody(rejection.body_text())
    }
}

impl IntoResponse for SearchApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            SearchApiError::Search(err @ SearchDoctorsError::MissingParameters) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            SearchApiError::Search(err @ SearchDoctorsError::Upstream(_)) => {
                tracing::error!(error = %err, "Error in search-doctors");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            SearchApiError::BadBody(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
