use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, ValidationError};

/// Fixed length of every appointment, in hours.
///
/// The duration is never stored; interval ends are derived from it at
/// validation time.
pub const SLOT_HOURS: i64 = 2;

/// Derives the end instant of a slot beginning at `start`.
#[must_use]
pub fn slot_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + TimeDelta::hours(SLOT_HOURS)
}

/// A scheduled booking linking one provider, one patient and a start
/// instant.
///
/// There is no stored status field: past appointments simply age out of the
/// conflict and deletion-guard scans by their timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Opaque unique identifier, minted by the registry. Empty on a record
    /// that has not been stored yet.
    pub id: String,
    /// Id of the provider delivering the appointment.
    pub provider_id: String,
    /// Id of the patient attending.
    pub patient_id: String,
    /// Start instant; offsets are normalized to UTC on deserialization.
    pub start: DateTime<Utc>,
    /// Free-text reason for the visit.
    pub reason: String,
}

impl Appointment {
    /// When the appointment ends: `start` plus the fixed slot length.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        slot_end(self.start)
    }

    /// Open-interval overlap test against another appointment's slot.
    ///
    /// Strict comparisons: intervals that only touch at an endpoint do not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && self.end() > other.start
    }

    /// Checks the record's field rules: a non-empty reason. Whether the
    /// referenced provider and patient exist is the registry's check, not
    /// the record's.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyReason`] for a blank reason.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reason.trim().is_empty() {
            return Err(ValidationError::EmptyReason);
        }
        Ok(())
    }
}

impl Entity for Appointment {
    const COLLECTION: &'static str = "appointments";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
