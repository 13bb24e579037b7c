use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Entity, ValidationError, contact};

/// A practitioner record.
///
/// All fields are required; [`validate`](Self::validate) enforces the field
/// rules before the registry commits a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Opaque unique identifier, minted by the registry. Empty on a record
    /// that has not been stored yet.
    pub id: String,
    /// Full display name.
    pub name: String,
    /// The provider's specialty.
    pub specialty: Specialty,
    /// Contact address.
    pub email: String,
}

impl Provider {
    /// Checks the record's field rules: a non-empty name and a well-formed
    /// email address. The specialty is closed at the type level and needs no
    /// check.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !contact::is_email(&self.email) {
            return Err(ValidationError::Email(self.email.clone()));
        }
        Ok(())
    }
}

impl Entity for Provider {
    const COLLECTION: &'static str = "providers";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// The closed set of specialties a provider can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    /// General dentistry.
    #[serde(rename = "General Dentistry")]
    GeneralDentistry,
    /// Orthodontics.
    Orthodontics,
    /// Endodontics.
    Endodontics,
    /// Maxillofacial surgery.
    #[serde(rename = "Maxillofacial Surgery")]
    MaxillofacialSurgery,
    /// Pediatric dentistry.
    #[serde(rename = "Pediatric Dentistry")]
    PediatricDentistry,
}

impl Specialty {
    /// Every specialty, in display order.
    pub const ALL: [Self; 5] = [
        Self::GeneralDentistry,
        Self::Orthodontics,
        Self::Endodontics,
        Self::MaxillofacialSurgery,
        Self::PediatricDentistry,
    ];

    /// The display label for this specialty.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralDentistry => "General Dentistry",
            Self::Orthodontics => "Orthodontics",
            Self::Endodontics => "Endodontics",
            Self::MaxillofacialSurgery => "Maxillofacial Surgery",
            Self::PediatricDentistry => "Pediatric Dentistry",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = ParseSpecialtyError;

    /// Parses a specialty from user input, case-insensitively. Single-word
    /// shorthands ("general", "surgery", "pediatric") are accepted alongside
    /// the full labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" | "general dentistry" => Ok(Self::GeneralDentistry),
            "orthodontics" => Ok(Self::Orthodontics),
            "endodontics" => Ok(Self::Endodontics),
            "surgery" | "maxillofacial surgery" => Ok(Self::MaxillofacialSurgery),
            "pediatric" | "pediatric dentistry" => Ok(Self::PediatricDentistry),
            _ => Err(ParseSpecialtyError(s.to_string())),
        }
    }
}

/// Error returned when a string names no known specialty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown specialty '{0}'; expected one of: general, orthodontics, endodontics, surgery, pediatric"
)]
pub struct ParseSpecialtyError(String);
