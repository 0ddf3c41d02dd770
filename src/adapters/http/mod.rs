//! HTTP adapters - REST API implementations.

pub mod search_doctors;

pub use search_doctors::{search_doctors_app, SearchServiceState};
