//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - hosted chat function, offline keyword replies, mock
//! - `geolocation` - fixed and cached position sources, mock
//! - `handoff` - in-memory booking/call slots
//! - `http` - the doctor search HTTP service
//! - `notify` - channel-backed session events
//! - `search` - doctor search client, mock
//! - `web_search` - Travily web search client

pub mod ai;
pub mod geolocation;
pub mod handoff;
pub mod http;
pub mod notify;
pub mod search;
pub mod web_search;
