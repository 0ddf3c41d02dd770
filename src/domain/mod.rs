//! Domain layer containing the assistant's business rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, state machine trait)
//! - `conversation` - Message timeline and fixed bot texts
//! - `location` - Permission state machine and coordinates
//! - `specialty` - Recognized specialties and their detection in text
//! - `doctor` - Search result records and extraction rules
//! - `handoff` - Booking/call handoff records and navigation targets

pub mod conversation;
pub mod doctor;
pub mod foundation;
pub mod handoff;
pub mod location;
pub mod specialty;
