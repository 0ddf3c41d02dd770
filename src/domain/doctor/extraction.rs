//! Turning raw web-search hits into doctor records.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::Doctor;

/// Placeholder used when no street address is found.
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// Distance label attached to extracted records.
pub const NEARBY: &str = "Nearby";

static TITLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Dr\.\s|Doctor\s").expect("title prefix pattern is valid"));

static STREET_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s+[^,]+,\s+[^,]+,\s+[^,]+").expect("address pattern is valid")
});

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 8;

/// Strips the first honorific, keeps the part before `" - "`, trims.
pub fn clean_name(title: &str) -> String {
    let without_prefix = TITLE_PREFIX.replace(title, "");
    without_prefix
        .split(" - ")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// First `number street, city, region` run in the text.
pub fn extract_address(description: &str) -> String {
    STREET_ADDRESS
        .find(description)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| ADDRESS_NOT_AVAILABLE.to_string())
}

/// Fresh lowercase base-36 token of eight characters.
pub fn short_id() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let radix = ID_ALPHABET.len() as u128;
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(char::from(ID_ALPHABET[(bits % radix) as usize]));
        bits /= radix;
    }
    id
}

/// Builds a doctor from one search hit. `None` when no name survives cleaning.
pub fn doctor_from_hit(title: &str, description: &str, url: &str, specialty: &str) -> Option<Doctor> {
    let name = clean_name(title);
    if name.is_empty() {
        return None;
    }

    Some(Doctor {
        id: short_id(),
        name,
        specialty: specialty.to_string(),
        description: description.to_string(),
        address: extract_address(description),
        url: url.to_string(),
        image: String::new(),
        distance: Some(NEARBY.to_string()),
    })
}
