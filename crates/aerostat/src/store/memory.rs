//! Deterministic in-memory document store.
//!
//! This is the test double for the driver contract: a path-keyed map with a
//! sequential identifier counter. It resolves every operation synchronously
//! but delivers results through the same async contract as a real backend,
//! so callers cannot come to depend on synchronicity.
//!
//! It serializes all operations and makes no attempt to reproduce
//! real-backend race conditions; it targets single-process test use.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use super::{document_path, DocumentId, DocumentStore, LISTEN_BUFFER};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    /// Full document path to stored record.
    documents: BTreeMap<String, Value>,
    /// Counter minting the next identifier handed out by `add`.
    next_id: u64,
    /// Live change-feed senders per document path.
    listeners: HashMap<String, Vec<mpsc::Sender<Value>>>,
}

/// In-memory [`DocumentStore`] with sequential identifier assignment.
///
/// The first `add` against a fresh (or cleared) store assigns `"0"`, the
/// next `"1"`, and so on, which keeps test fixtures readable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only copy of the full backing map, for test assertions.
    ///
    /// State inspection only; not part of the production driver contract.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.lock().documents.clone()
    }

    /// Wipe all documents and listeners and reset the identifier counter.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.documents.clear();
        inner.next_id = 0;
        // Dropping the senders closes every outstanding change feed.
        inner.listeners.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` at `path` and fan it out to live listeners.
    async fn write(&self, path: String, value: Value) {
        let senders: Vec<mpsc::Sender<Value>> = {
            let mut inner = self.lock();
            inner.documents.insert(path.clone(), value.clone());
            inner.listeners.get(&path).cloned().unwrap_or_default()
        };

        for sender in &senders {
            // A dropped receiver just ends that feed; pruned below.
            let _ = sender.send(value.clone()).await;
        }

        if !senders.is_empty() {
            let mut inner = self.lock();
            let emptied = match inner.listeners.get_mut(&path) {
                Some(list) => {
                    list.retain(|s| !s.is_closed());
                    list.is_empty()
                }
                None => false,
            };
            if emptied {
                inner.listeners.remove(&path);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Value> {
        self.lock()
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::not_found(path))
    }

    async fn get_collection(&self, path: &str) -> Result<Vec<(DocumentId, Value)>> {
        let prefix = format!("{path}/");
        let inner = self.lock();

        // Direct children only: nested subcollection documents are not part
        // of the collection itself.
        let documents = inner
            .documents
            .iter()
            .filter_map(|(key, value)| {
                let id = key.strip_prefix(&prefix)?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some((id.to_string(), value.clone()))
            })
            .collect();

        Ok(documents)
    }

    async fn set(&self, path: &str, value: Value) -> Result<()> {
        debug!("set {path}");
        self.write(path.to_string(), value).await;
        Ok(())
    }

    async fn add(&self, collection: &str, value: Value) -> Result<DocumentId> {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id.to_string();
            inner.next_id += 1;
            id
        };

        let path = document_path(collection, &id);
        debug!("add {path}");
        self.write(path, value).await;
        Ok(id)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        // Removing an absent document is a documented no-op.
        if self.lock().documents.remove(path).is_some() {
            debug!("delete {path}");
        }
        Ok(())
    }

    async fn listen(&self, path: &str) -> Result<mpsc::Receiver<Value>> {
        let (tx, rx) = mpsc::channel(LISTEN_BUFFER);

        let mut inner = self.lock();
        if let Some(current) = inner.documents.get(path) {
            // Fresh channel with non-zero capacity, the send cannot fail.
            let _ = tx.try_send(current.clone());
        }
        inner
            .listeners
            .entry(path.to_string())
            .or_default()
            .push(tx);

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_sequential_identifier_assignment() {
        let store = MemoryStore::new();

        let first = store.add("availabilities", json!({"slot": "am"})).await.unwrap();
        let second = store.add("availabilities", json!({"slot": "pm"})).await.unwrap();

        assert_eq!(first, "0");
        assert_eq!(second, "1");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("users/7", json!({"name": "Ada"})).await.unwrap();

        let value = store.get("users/7").await.unwrap();
        assert_eq!(value, json!({"name": "Ada"}));
    }

    #[tokio::test]
    async fn test_get_absent_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("users/404").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_document() {
        let store = MemoryStore::new();
        store.set("users/0", json!({"name": "Ada", "roles": ["pilot"]})).await.unwrap();
        store.set("users/0", json!({"name": "Ada B."})).await.unwrap();

        assert_eq!(store.get("users/0").await.unwrap(), json!({"name": "Ada B."}));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let store = MemoryStore::new();
        store.set("traces/3", json!({"points": []})).await.unwrap();

        store.delete("traces/3").await.unwrap();
        assert!(store.get("traces/3").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let store = MemoryStore::new();
        assert!(store.delete("traces/404").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_collection_returns_direct_children_only() {
        let store = MemoryStore::new();
        store.set("availabilities/0", json!({"slot": "am"})).await.unwrap();
        store.set("availabilities/1", json!({"slot": "pm"})).await.unwrap();
        store.set("availabilities/1/history/0", json!({})).await.unwrap();
        store.set("users/0", json!({"name": "Ada"})).await.unwrap();

        let documents = store.get_collection("availabilities").await.unwrap();
        let ids: Vec<&str> = documents.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1"]);
    }

    #[tokio::test]
    async fn test_get_collection_empty() {
        let store = MemoryStore::new();
        assert!(store.get_collection("flights").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_documents_and_counter() {
        let store = MemoryStore::new();
        store.add("users", json!({"name": "Ada"})).await.unwrap();
        store.add("users", json!({"name": "Bert"})).await.unwrap();

        store.clear();

        assert!(store.snapshot().is_empty());
        let id = store.add("users", json!({"name": "Cleo"})).await.unwrap();
        assert_eq!(id, "0");
    }

    #[tokio::test]
    async fn test_snapshot_exposes_backing_map() {
        let store = MemoryStore::new();
        store.set("users/0", json!({"name": "Ada"})).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["users/0"], json!({"name": "Ada"}));
    }

    #[tokio::test]
    async fn test_listen_yields_current_then_updates() {
        let store = MemoryStore::new();
        store.set("traces/0", json!({"rev": 1})).await.unwrap();

        let mut feed = store.listen("traces/0").await.unwrap();
        assert_eq!(feed.recv().await.unwrap(), json!({"rev": 1}));

        store.set("traces/0", json!({"rev": 2})).await.unwrap();
        assert_eq!(feed.recv().await.unwrap(), json!({"rev": 2}));
    }

    #[tokio::test]
    async fn test_listen_on_absent_document_waits_for_first_write() {
        let store = MemoryStore::new();
        let mut feed = store.listen("traces/9").await.unwrap();

        store.set("traces/9", json!({"rev": 1})).await.unwrap();
        assert_eq!(feed.recv().await.unwrap(), json!({"rev": 1}));
    }

    #[tokio::test]
    async fn test_dropped_listener_is_pruned() {
        let store = MemoryStore::new();
        let feed = store.listen("users/0").await.unwrap();
        drop(feed);

        // The write after the drop must not error or hang.
        store.set("users/0", json!({"name": "Ada"})).await.unwrap();
        store.set("users/0", json!({"name": "Bert"})).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_closes_feeds() {
        let store = MemoryStore::new();
        let mut feed = store.listen("users/0").await.unwrap();

        store.clear();
        assert!(feed.recv().await.is_none());
    }
}
