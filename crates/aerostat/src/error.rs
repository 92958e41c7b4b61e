//! Error types for aerostat.
//!
//! This module defines all error types used throughout the aerostat crate,
//! providing detailed context for debugging and user-friendly error messages.
//! Errors are always delivered through the `Result` of the operation that
//! produced them; no operation in this crate panics on expected failure.

use thiserror::Error;

/// The main error type for aerostat operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// No document exists at the requested path.
    #[error("document not found at {path}")]
    NotFound {
        /// Full document path that was requested.
        path: String,
    },

    /// A document could not be converted between its stored and domain
    /// representations.
    ///
    /// On the read side this indicates corrupted or version-mismatched data
    /// in the store; well-formed stored data always maps cleanly.
    #[error("failed to map document at {path}: {message}")]
    Mapping {
        /// Full document path of the offending record.
        path: String,
        /// Description of what went wrong during conversion.
        message: String,
    },

    /// The underlying document store reported a failure.
    ///
    /// Connectivity, permission, and quota problems from a real backend
    /// all surface through this variant.
    #[error("document store failure: {message}")]
    Driver {
        /// Description of the driver-level failure.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for aerostat operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given document path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a mapping error for the given document path.
    #[must_use]
    pub fn mapping(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a driver-level failure.
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Check if this error means the requested document was absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error indicates corrupted stored data.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. })
    }
}
