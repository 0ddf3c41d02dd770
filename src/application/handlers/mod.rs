//! Application handlers.

pub mod search;
