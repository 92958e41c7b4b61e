//! Storage schema for flight traces.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::{DocumentSchema, SchemaError};
use crate::model::{FlightTrace, TracePoint};
use crate::store::DocumentId;

/// One GPS sample flattened for storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePointRecord {
    /// Capture time as epoch milliseconds.
    pub timestamp: i64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Flat storage record for one flight trace.
///
/// The owning flight lives only here; a trace model is always handled in
/// the context of one flight. Sample order in `points` is capture order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightTraceSchema {
    /// Identifier of the flight this trace belongs to.
    pub flight_id: String,
    /// Samples in capture order.
    pub points: Vec<TracePointRecord>,
}

impl DocumentSchema for FlightTraceSchema {
    type Model = FlightTrace;
    type Context = String;

    const COLLECTION: &'static str = "traces";

    fn from_model(flight_id: &String, model: &FlightTrace) -> Self {
        Self {
            flight_id: flight_id.clone(),
            points: model
                .points
                .iter()
                .map(|p| TracePointRecord {
                    timestamp: p.timestamp.timestamp_millis(),
                    latitude: p.latitude,
                    longitude: p.longitude,
                })
                .collect(),
        }
    }

    fn to_model(&self, id: DocumentId) -> Result<FlightTrace, SchemaError> {
        let mut points = Vec::with_capacity(self.points.len());
        for record in &self.points {
            let timestamp = DateTime::from_timestamp_millis(record.timestamp).ok_or_else(|| {
                SchemaError::new(format!(
                    "sample instant out of range: {}",
                    record.timestamp
                ))
            })?;
            points.push(TracePoint::new(
                timestamp,
                record.latitude,
                record.longitude,
            ));
        }

        Ok(FlightTrace { id, points })
    }
}
