//! Doctor record returned by the search service.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A practitioner found by a doctor search.
///
/// Never mutated after creation apart from the avatar fallback applied by
/// [`Doctor::with_fallback_image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

impl Doctor {
    /// Fills `image` with a generated avatar when the source left it blank.
    pub fn with_fallback_image(mut self) -> Self {
        if self.image.trim().is_empty() {
            self.image = avatar_url(&self.name);
        }
        self
    }
}

/// Generated initials avatar for a name. The name is percent-encoded, so
/// spaces become `%20`.
pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=16A34A&color=fff",
        urlencoding::encode(name)
    )
}

/// Drops later records whose id was already seen, keeping order.
pub fn dedupe_by_id(doctors: Vec<Doctor>) -> Vec<Doctor> {
    let mut seen = HashSet::new();
    doctors
        .into_iter()
        .filter(|doctor| seen.insert(doctor.id.clone()))
        .collect()
}

#[cfg(test)]
pub(crate) fn sample(id: &str, name: &str) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: "Neurologist".to_string(),
        description: String::new(),
        address: "Address not available".to_string(),
        url: format!("https://example.org/{}", id),
        image: String::new(),
        distance: Some("Nearby".to_string()),
    }
}
