//! Location domain module.
//!
//! The permission state machine and the coordinates it guards.

mod coordinates;
mod state;
mod status;

pub use coordinates::Coordinates;
pub use state::LocationState;
pub use status::LocationStatus;
