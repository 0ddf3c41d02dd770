//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the assistant and the outside world. Adapters implement these ports.
//!
//! ## Assistant Ports
//!
//! - `AIResponder` - Reply generation for a conversation
//! - `DoctorSearch` - Nearby practitioner lookup
//! - `Geolocator` - Platform position query
//! - `HandoffStore` - Booking/call handoff slots
//! - `SessionNotifier` - Events for the presentation layer
//!
//! ## Search Service Ports
//!
//! - `WebSearchProvider` - General web search behind the doctor search service

mod ai_responder;
mod doctor_search;
mod geolocation;
mod handoff_store;
mod notifier;
mod web_search;

pub use ai_responder::{AIError, AIRequest, AIResponder};
pub use doctor_search::{DoctorSearch, SearchError, SearchQuery};
pub use geolocation::{GeolocationError, Geolocator, Position, PositionOptions};
pub use handoff_store::{HandoffError, HandoffStore};
pub use notifier::{Notice, NoticeKind, SessionEvent, SessionNotifier};
pub use web_search::{WebSearchError, WebSearchProvider, WebSearchResult};
