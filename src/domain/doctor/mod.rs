//! Doctor domain module.
//!
//! Search result records and the rules for extracting them from web hits.

mod doctor;
mod extraction;

pub use doctor::{avatar_url, dedupe_by_id, Doctor};
pub use extraction::{
    clean_name, doctor_from_hit, extract_address, short_id, ADDRESS_NOT_AVAILABLE, NEARBY,
};

#[cfg(test)]
pub(crate) use doctor::sample;
