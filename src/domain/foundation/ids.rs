//! UUID-backed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Random v4 identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_newtype! {
    /// Names one assistant session in logs and notifications.
    SessionId
}

uuid_newtype! {
    /// Handed to the call workflow when a call is started. Fresh for every
    /// call and never derived from the doctor.
    CallId
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.simple(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_round_trip_through_hyphenated_text() {
        let text = "550e8400-e29b-41d4-a716-446655440000";
        let id: SessionId = text.parse().unwrap();
        assert_eq!(id.to_string(), text);
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn call_id_renders_as_32_hex_digits() {
        let id = CallId::new();
        let rendered = id.to_string();
        assert_eq!(rendered.len(), 32);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rendered.parse::<CallId>().unwrap(), id);
    }

    #[test]
    fn call_id_serializes_as_hyphenated_uuid() {
        let id = CallId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!(id.as_uuid().to_string()));
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!("not-a-uuid".parse::<SessionId>().is_err());
        assert!("".parse::<CallId>().is_err());
    }
}
