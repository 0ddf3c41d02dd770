//! Kabiraj Assistant - conversational health assistant
//!
//! Listens to a patient's symptoms, relays them to an AI responder, detects
//! the medical specialty named in the reply and, once the patient shares a
//! location, looks up nearby doctors for booking or calling.
//!
//! Also ships the doctor search service that turns web search hits into
//! doctor records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
