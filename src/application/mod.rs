//! Application layer - use cases built on the domain and the ports.
//!
//! `assistant` drives the interactive session; `handlers` holds the
//! stateless request handlers behind the HTTP service.

pub mod assistant;
pub mod handlers;

pub use assistant::{
    AssistantConfig, AssistantDeps, AssistantSession, SearchOutcome, SubmitError, TurnOutcome,
};
pub use handlers::search::{
    SearchDoctorsCommand, SearchDoctorsError, SearchDoctorsHandler, SearchDoctorsResult,
};
