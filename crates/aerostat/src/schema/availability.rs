//! Storage schema for crew availabilities.

use chrono::{DateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{DocumentSchema, SchemaError};
use crate::model::{Availability, AvailabilityStatus, TimeSlot};
use crate::store::DocumentId;

/// Flat storage record for one availability declaration.
///
/// The owning person lives only here, not in the model: an availability is
/// always read in the context of one person, so the linkage is pure storage
/// metadata. The date is stored as an epoch-millisecond instant of midnight
/// UTC, the store's native timestamp shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySchema {
    /// Identifier of the person this declaration belongs to.
    pub person_id: String,
    /// Declaration date as epoch milliseconds of midnight UTC.
    pub date: i64,
    /// Half-day slot.
    pub slot: TimeSlot,
    /// Declared status.
    pub status: AvailabilityStatus,
}

impl DocumentSchema for AvailabilitySchema {
    type Model = Availability;
    type Context = String;

    const COLLECTION: &'static str = "availabilities";

    fn from_model(person_id: &String, model: &Availability) -> Self {
        Self {
            person_id: person_id.clone(),
            date: model
                .date
                .and_time(NaiveTime::MIN)
                .and_utc()
                .timestamp_millis(),
            slot: model.slot,
            status: model.status,
        }
    }

    fn to_model(&self, id: DocumentId) -> Result<Availability, SchemaError> {
        let date = DateTime::from_timestamp_millis(self.date)
            .ok_or_else(|| SchemaError::new(format!("date instant out of range: {}", self.date)))?
            .date_naive();

        Ok(Availability {
            id,
            date,
            slot: self.slot,
            status: self.status,
        })
    }
}
