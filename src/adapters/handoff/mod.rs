//! Handoff store adapters.

mod in_memory_handoff_store;

pub use in_memory_handoff_store::InMemoryHandoffStore;
