//! Axum router configuration for the doctor search service.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use http::{header, HeaderName, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, search_doctors, SearchServiceState};

/// Create the doctor search router.
///
/// # Routes
///
/// - `POST /search-doctors` - Search doctors
/// - `POST /functions/v1/search-doctors` - Same handler, hosted-function path
/// - `GET /health` - Liveness probe
pub fn search_doctors_routes() -> Router<SearchServiceState> {
    Router::new()
        .route("/search-doctors", post(search_doctors))
        .route("/functions/v1/search-doctors", post(search_doctors))
        .route("/health", get(health))
}

/// CORS policy: the four request headers the web client sends, and the
/// configured origins (`*` or an empty list means any origin).
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Complete service: routes, state, tracing, CORS and request timeout.
pub fn search_doctors_app(
    state: SearchServiceState,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    search_doctors_routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors_origins))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
