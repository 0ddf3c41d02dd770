//! The closed set of recognized medical specialties.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A recognized medical specialty.
///
/// Declaration order is the canonical priority order used by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Specialty {
    Cardiologist,
    Dermatologist,
    Neurologist,
    Orthopedic,
    Pediatrician,
    Psychiatrist,
    Ophthalmologist,
    Ent,
    Gynecologist,
    Urologist,
    Endocrinologist,
    Gastroenterologist,
    Rheumatologist,
    Nephrologist,
    Pulmonologist,
    Oncologist,
    Hematologist,
    Immunologist,
    Surgeon,
    FamilyMedicine,
}

impl Specialty {
    /// All specialties in priority order.
    pub const ALL: [Specialty; 20] = [
        Specialty::Cardiologist,
        Specialty::Dermatologist,
        Specialty::Neurologist,
        Specialty::Orthopedic,
        Specialty::Pediatrician,
        Specialty::Psychiatrist,
        Specialty::Ophthalmologist,
        Specialty::Ent,
        Specialty::Gynecologist,
        Specialty::Urologist,
        Specialty::Endocrinologist,
        Specialty::Gastroenterologist,
        Specialty::Rheumatologist,
        Specialty::Nephrologist,
        Specialty::Pulmonologist,
        Specialty::Oncologist,
        Specialty::Hematologist,
        Specialty::Immunologist,
        Specialty::Surgeon,
        Specialty::FamilyMedicine,
    ];

    /// Display name, as sent to the search service.
    pub fn name(&self) -> &'static str {
        match self {
            Specialty::Cardiologist => "Cardiologist",
            Specialty::Dermatologist => "Dermatologist",
            Specialty::Neurologist => "Neurologist",
            Specialty::Orthopedic => "Orthopedic",
            Specialty::Pediatrician => "Pediatrician",
            Specialty::Psychiatrist => "Psychiatrist",
            Specialty::Ophthalmologist => "Ophthalmologist",
            Specialty::Ent => "ENT",
            Specialty::Gynecologist => "Gynecologist",
            Specialty::Urologist => "Urologist",
            Specialty::Endocrinologist => "Endocrinologist",
            Specialty::Gastroenterologist => "Gastroenterologist",
            Specialty::Rheumatologist => "Rheumatologist",
            Specialty::Nephrologist => "Nephrologist",
            Specialty::Pulmonologist => "Pulmonologist",
            Specialty::Oncologist => "Oncologist",
            Specialty::Hematologist => "Hematologist",
            Specialty::Immunologist => "Immunologist",
            Specialty::Surgeon => "Surgeon",
            Specialty::FamilyMedicine => "Family Medicine",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Specialty {
    type Err = ValidationError;

    /// Case-insensitive, exact name match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Specialty::ALL
            .iter()
            .copied()
            .find(|sp| sp.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format("specialty", format!("unknown specialty '{}'", s))
            })
    }
}

impl TryFrom<String> for Specialty {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Specialty> for String {
    fn from(value: Specialty) -> Self {
        value.name().to_string()
    }
}
