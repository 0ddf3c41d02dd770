//! Specialty domain module.

mod catalog;
mod detector;

pub use catalog::Specialty;
pub use detector::{detect_specialty, MatchMode, SpecialtyDetector};
