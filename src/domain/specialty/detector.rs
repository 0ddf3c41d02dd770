//! Specialty detection over free text.

use serde::{Deserialize, Serialize};

use super::Specialty;

/// How specialty names are matched inside text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring. "ENT" matches inside "treatment".
    #[default]
    Substring,
    /// Case-insensitive, and the match may not touch an alphanumeric
    /// character on either side.
    WordBoundary,
}

/// Returns the first specialty, in canonical order, found in `text`.
pub fn detect_specialty(text: &str, mode: MatchMode) -> Option<Specialty> {
    let haystack = text.to_lowercase();
    Specialty::ALL.iter().copied().find(|specialty| {
        let needle = specialty.name().to_lowercase();
        match mode {
            MatchMode::Substring => haystack.contains(&needle),
            MatchMode::WordBoundary => contains_word(&haystack, &needle),
        }
    })
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Detector bound to a configured [`MatchMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialtyDetector {
    mode: MatchMode,
}

impl SpecialtyDetector {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn detect(&self, text: &str) -> Option<Specialty> {
        detect_specialty(text, self.mode)
    }
}
