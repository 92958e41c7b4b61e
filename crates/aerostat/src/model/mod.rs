//! Rich domain models for flight operations.
//!
//! Models are the business-facing representation of each entity: validated
//! types, calendar dates, enums. Their flat storage-native counterparts live
//! in [`crate::schema`]; the two are connected by pure conversion functions
//! in both directions.

pub mod availability;
pub mod trace;
pub mod user;

pub use availability::{Availability, AvailabilityStatus, TimeSlot};
pub use trace::{FlightTrace, TracePoint};
pub use user::{Role, User};

/// Sentinel identifier for an entity that has not been persisted yet.
///
/// Every entity carries a `String` identifier. A freshly constructed model
/// uses this sentinel until a [`crate::table::Table`] add assigns a real one.
/// "Unset-but-present" and "absent" are distinct domain states, so the
/// identifier is deliberately not an `Option`.
pub const UNSET_ID: &str = "";
