//! HTTP adapter for the doctor search service.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, LocationDto, SearchDoctorsRequest, SearchDoctorsResponse};
pub use handlers::{SearchApiError, SearchServiceState};
pub use routes::{cors_layer, search_doctors_app, search_doctors_routes};
