//! Crew availability domain model.
//!
//! An availability records whether one person can fly on one half-day slot.
//! The owning person is deliberately absent from the model: an availability
//! is always handled in the context of "the current person", and the linkage
//! lives only in the storage schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UNSET_ID;

/// Half-day slot an availability applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    /// Morning flight window.
    Am,
    /// Evening flight window.
    Pm,
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Am => write!(f, "am"),
            Self::Pm => write!(f, "pm"),
        }
    }
}

/// What the person declared for the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Available for flight duty.
    Ok,
    /// Possibly available, to be confirmed.
    Maybe,
    /// Not available.
    No,
}

/// One person's declared availability for one date and slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Persistence identifier; [`UNSET_ID`] until the entity is stored.
    pub id: String,
    /// Calendar date the declaration applies to.
    pub date: NaiveDate,
    /// Half-day slot the declaration applies to.
    pub slot: TimeSlot,
    /// Declared status for the slot.
    pub status: AvailabilityStatus,
}

impl Availability {
    /// Create a new, not-yet-persisted availability.
    #[must_use]
    pub fn new(date: NaiveDate, slot: TimeSlot, status: AvailabilityStatus) -> Self {
        Self {
            id: UNSET_ID.to_string(),
            date,
            slot,
            status,
        }
    }

    /// Create an availability with a known persistence identifier.
    #[must_use]
    pub fn with_id(
        id: impl Into<String>,
        date: NaiveDate,
        slot: TimeSlot,
        status: AvailabilityStatus,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            slot,
            status,
        }
    }

    /// Whether this availability has been assigned a real identifier.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != UNSET_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()
    }

    #[test]
    fn test_new_uses_unset_id() {
        let avail = Availability::new(sample_date(), TimeSlot::Pm, AvailabilityStatus::Maybe);
        assert_eq!(avail.id, UNSET_ID);
        assert!(!avail.is_persisted());
    }

    #[test]
    fn test_with_id_is_persisted() {
        let avail = Availability::with_id(
            "3",
            sample_date(),
            TimeSlot::Am,
            AvailabilityStatus::Ok,
        );
        assert_eq!(avail.id, "3");
        assert!(avail.is_persisted());
    }

    #[test]
    fn test_time_slot_display() {
        assert_eq!(TimeSlot::Am.to_string(), "am");
        assert_eq!(TimeSlot::Pm.to_string(), "pm");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AvailabilityStatus::Maybe).unwrap();
        assert_eq!(json, "\"maybe\"");
        let back: AvailabilityStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AvailabilityStatus::Maybe);
    }
}
