//! Doctor search adapters.

mod http_doctor_search;
mod mock_doctor_search;

pub use http_doctor_search::{HttpDoctorSearch, HttpDoctorSearchConfig};
pub use mock_doctor_search::MockDoctorSearch;
