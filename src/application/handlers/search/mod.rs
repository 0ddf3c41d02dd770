//! Doctor search service handlers.

mod search_doctors;

pub use search_doctors::{
    SearchDoctorsCommand, SearchDoctorsError, SearchDoctorsHandler, SearchDoctorsResult,
    MISSING_PARAMETERS,
};
