//! Assistant session - the symptom conversation and its side flows.
//!
//! One [`AssistantSession`] per patient. It appends to the message log,
//! consults the AI responder, walks the location permission flow and runs
//! delayed doctor searches once a reply names a specialty.

mod errors;
mod in_flight;
mod outcome;
mod session;

pub use errors::SubmitError;
pub use outcome::{SearchOutcome, TurnOutcome};
pub use session::{AssistantConfig, AssistantDeps, AssistantSession};
