//! Flat, storage-native schemas and the model mapping contract.
//!
//! Each entity is dual-represented: a rich model in [`crate::model`] and a
//! flat schema here. Schemas are what actually travels through the document
//! store: serialization-friendly records with dates as epoch instants and
//! cross-entity linkage (owner identifiers) that the models never carry.
//!
//! # Invariants
//! - `S::from_model(ctx, &m).to_model(id)` reconstructs `m` for every valid
//!   model (round-trip law; identifier aside when unset).
//! - `to_model` only fails on corrupted stored data; well-formed records
//!   always map cleanly.

pub mod availability;
pub mod trace;
pub mod user;

pub use availability::AvailabilitySchema;
pub use trace::{FlightTraceSchema, TracePointRecord};
pub use user::UserSchema;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::DocumentId;

/// Conversion failure from a stored schema record to its domain model.
///
/// Carried as the message of [`crate::Error::Mapping`] by the table layer,
/// which knows the document path of the offending record.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SchemaError {
    /// Description of the field or value that could not be converted.
    pub message: String,
}

impl SchemaError {
    /// Create a conversion failure with the given description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Binds one schema type to one model type and one collection path.
///
/// Implementations are plain data records with pure conversion functions in
/// both directions; the [`crate::table::Table`] repository is generic over
/// this trait.
pub trait DocumentSchema: Serialize + DeserializeOwned {
    /// The rich domain representation of this entity.
    type Model;

    /// External context required to flatten a model, such as the owning
    /// person identifier. `()` when the schema is self-contained.
    type Context: Sync;

    /// The collection path owned by this entity type.
    const COLLECTION: &'static str;

    /// Flatten a model into its storage-native record.
    ///
    /// The model's own identifier is not stored; it is the document's path
    /// key and is reattached on read.
    fn from_model(ctx: &Self::Context, model: &Self::Model) -> Self;

    /// Reconstruct the domain model, reattaching its path identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored values are corrupted (for example an
    /// out-of-range instant); this never fails for records produced by
    /// [`DocumentSchema::from_model`].
    fn to_model(&self, id: DocumentId) -> Result<Self::Model, SchemaError>;
}
