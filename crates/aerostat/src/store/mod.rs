//! Document-store driver contract.
//!
//! This module defines the abstract, path-addressed access contract that
//! isolates the rest of the crate from any concrete document database. A
//! real backend adapter implements it against the network; the in-memory
//! [`memory::MemoryStore`] implements it for tests and offline tooling.
//!
//! # Invariants
//! - Every operation resolves to exactly one terminal outcome, delivered
//!   once through its `Result`; nothing in this contract panics or hangs
//!   on expected failure.
//! - No ordering is guaranteed between concurrent calls to the same path;
//!   the last write observed by the store wins.
//! - Writes replace the full document at its path; there are no partial
//!   updates, transactions, or retries at this layer.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::Result;

/// Identifier of a document within its collection.
pub type DocumentId = String;

/// Buffer size of change-feed channels handed out by [`DocumentStore::listen`].
pub(crate) const LISTEN_BUFFER: usize = 32;

/// Build the full path of a document within a collection.
#[must_use]
pub fn document_path(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

/// Abstract, path-addressed document store.
///
/// Documents are flat [`serde_json::Value`] records keyed by
/// `{collection}/{id}` path strings. All operations are asynchronous from
/// the caller's perspective; an implementation may resolve them
/// synchronously (the in-memory store does) but callers must not assume so.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when no document exists at `path`,
    /// or [`crate::Error::Driver`] when the store itself fails.
    async fn get(&self, path: &str) -> Result<Value>;

    /// Fetch all direct children of the collection at `path`.
    ///
    /// Returns `(id, document)` pairs in a deterministic order. An empty or
    /// absent collection yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Driver`] when the store itself fails.
    async fn get_collection(&self, path: &str) -> Result<Vec<(DocumentId, Value)>>;

    /// Upsert the document at `path`, creating or overwriting it whole.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Driver`] when the store itself fails.
    async fn set(&self, path: &str, value: Value) -> Result<()>;

    /// Store a new document under `collection`, minting a fresh identifier.
    ///
    /// The document lands at `{collection}/{id}` and the minted id is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Driver`] when the store itself fails.
    async fn add(&self, collection: &str, value: Value) -> Result<DocumentId>;

    /// Remove the document at `path`.
    ///
    /// Deleting an absent document is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Driver`] when the store itself fails.
    async fn delete(&self, path: &str) -> Result<()>;

    /// Open a change feed for the document at `path`.
    ///
    /// The receiver first yields the current document if one exists, then
    /// every subsequent write at that path. The feed ends when the caller
    /// drops the receiver or the store shuts down.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Driver`] when the feed cannot be opened.
    async fn listen(&self, path: &str) -> Result<mpsc::Receiver<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path() {
        assert_eq!(document_path("availabilities", "7"), "availabilities/7");
        assert_eq!(document_path("users", ""), "users/");
    }
}
