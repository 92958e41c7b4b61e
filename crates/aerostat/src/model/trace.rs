//! Flight trace domain model.
//!
//! A trace is an ordered sequence of timestamped GPS samples captured during
//! a flight. Sample order is capture order and is semantically meaningful;
//! timestamps are expected to be monotonically non-decreasing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSET_ID;

/// One GPS sample of a flight trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    /// When the sample was captured.
    pub timestamp: DateTime<Utc>,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl TracePoint {
    /// Create a sample from a timestamp and a coordinate pair.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
        }
    }
}

/// An ordered GPS trace of one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightTrace {
    /// Persistence identifier; [`UNSET_ID`] until the entity is stored.
    pub id: String,
    /// Samples in capture order.
    pub points: Vec<TracePoint>,
}

impl FlightTrace {
    /// Create a new, not-yet-persisted trace.
    #[must_use]
    pub fn new(points: Vec<TracePoint>) -> Self {
        Self {
            id: UNSET_ID.to_string(),
            points,
        }
    }

    /// Create a trace with a known persistence identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>, points: Vec<TracePoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    /// Number of samples in the trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trace contains no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
