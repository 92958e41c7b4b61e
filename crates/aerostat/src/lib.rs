//! `aerostat` - Scheduling and flight-log core for hot-air balloon operations
//!
//! This library isolates the domain objects of a flight-operations scheduler
//! (crew, availabilities, GPS flight traces) from the underlying document
//! database. It provides the generic table/repository contract and schema
//! mapping used by the application layer, an in-memory document store for
//! tests, and the GPS trace anomaly-correction algorithm used by live
//! tracking.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod config;
pub mod correction;
pub mod error;
pub mod logging;
pub mod model;
pub mod schema;
pub mod store;
pub mod table;

pub use config::{Config, TraceConfig};
pub use correction::correct_trace;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use schema::DocumentSchema;
pub use store::{DocumentId, DocumentStore, MemoryStore};
pub use table::Table;
