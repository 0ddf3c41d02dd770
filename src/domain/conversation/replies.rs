//! Fixed bot texts used by the assistant.

/// Opening message of every session.
pub const GREETING: &str =
    "Hello! I'm your Kabiraj health assistant. To help you better, may I access your location?";

/// Appended after a successful location fix.
pub const LOCATION_GRANTED: &str =
    "Thank you for sharing your location. How can I help you today?";

/// Appended when the geolocation query fails or times out.
pub const LOCATION_FAILED: &str = "I couldn't access your location. I'll still try to help, but I won't be able to find doctors near you.";

/// Appended when the user declines to share a location.
pub const LOCATION_DECLINED: &str = "That's okay. I'll still try to help you, but I won't be able to find doctors near you. How can I assist you today?";

/// Single fallback for every AI failure.
pub const AI_FALLBACK: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again later.";

/// Bot message announcing search results for a specialty.
pub fn doctors_found(specialty: &str) -> String {
    format!(
        "I've found some {} specialists near you. Would you like to schedule an appointment with one of them?",
        specialty
    )
}
