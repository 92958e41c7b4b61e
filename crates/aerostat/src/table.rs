//! Generic repository over one schema/model pair.
//!
//! A [`Table`] binds one [`DocumentSchema`] implementation (and therefore
//! one model type and one collection path) to a shared document-store
//! driver, exposing typed CRUD to the rest of the application.
//!
//! # Invariants
//! - Every call is a single round trip to the driver: no caching, retries,
//!   or transactions at this layer. Callers decide recovery policy.
//! - Every call resolves to exactly one terminal outcome through its
//!   `Result`.
//! - `get_all` is fail-fast: one corrupt record fails the whole batch,
//!   because partial domain state is worse than an explicit failure.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::schema::DocumentSchema;
use crate::store::{document_path, DocumentId, DocumentStore, LISTEN_BUFFER};

/// Typed CRUD repository for one entity type.
pub struct Table<S: DocumentSchema> {
    store: Arc<dyn DocumentStore>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: DocumentSchema> std::fmt::Debug for Table<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("collection", &S::COLLECTION)
            .finish_non_exhaustive()
    }
}

impl<S: DocumentSchema> Clone for Table<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _schema: PhantomData,
        }
    }
}

impl<S: DocumentSchema> Table<S> {
    /// Create a table over the given driver.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _schema: PhantomData,
        }
    }

    /// The collection path this table is bound to.
    #[must_use]
    pub fn collection() -> &'static str {
        S::COLLECTION
    }

    fn path(id: &str) -> String {
        document_path(S::COLLECTION, id)
    }

    /// Decode a stored document into the domain model, reattaching its id.
    fn decode(path: &str, value: Value, id: DocumentId) -> Result<S::Model> {
        let schema: S = serde_json::from_value(value)
            .map_err(|err| Error::mapping(path, err.to_string()))?;
        schema
            .to_model(id)
            .map_err(|err| Error::mapping(path, err.to_string()))
    }

    /// Encode a model for storage.
    fn encode(ctx: &S::Context, model: &S::Model) -> Result<Value> {
        let schema = S::from_model(ctx, model);
        serde_json::to_value(&schema)
            .map_err(|err| Error::mapping(S::COLLECTION, err.to_string()))
    }

    /// Fetch one entity by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no entity exists under `id`,
    /// [`Error::Mapping`] when the stored record is corrupt, or the driver
    /// failure passed through.
    pub async fn get(&self, id: &str) -> Result<S::Model> {
        let path = Self::path(id);
        let value = self.store.get(&path).await?;
        Self::decode(&path, value, id.to_string())
    }

    /// Fetch every entity in the collection.
    ///
    /// Fail-fast: a single record that cannot be mapped fails the whole
    /// call rather than being silently skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mapping`] when any stored record is corrupt, or the
    /// driver failure passed through.
    pub async fn get_all(&self) -> Result<Vec<S::Model>> {
        let documents = self.store.get_collection(S::COLLECTION).await?;

        let mut models = Vec::with_capacity(documents.len());
        for (id, value) in documents {
            let path = Self::path(&id);
            models.push(Self::decode(&path, value, id)?);
        }
        Ok(models)
    }

    /// Persist a new entity, minting its identifier.
    ///
    /// The model is expected to carry the unset sentinel identifier; the
    /// assigned identifier is returned and the stored record is written at
    /// `{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mapping`] when the model cannot be encoded, or the
    /// driver failure passed through.
    pub async fn add(&self, ctx: &S::Context, model: &S::Model) -> Result<DocumentId> {
        let value = Self::encode(ctx, model)?;
        let id = self.store.add(S::COLLECTION, value).await?;
        debug!("added {}", Self::path(&id));
        Ok(id)
    }

    /// Overwrite the entity stored under `id`.
    ///
    /// Last-write-wins: prior existence is not verified, and the full
    /// record at the path is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mapping`] when the model cannot be encoded, or the
    /// driver failure passed through.
    pub async fn update(&self, ctx: &S::Context, id: &str, model: &S::Model) -> Result<()> {
        let value = Self::encode(ctx, model)?;
        self.store.set(&Self::path(id), value).await
    }

    /// Remove the entity stored under `id`.
    ///
    /// Deleting an absent entity is a no-op, mirroring the driver contract.
    ///
    /// # Errors
    ///
    /// Returns the driver failure passed through.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&Self::path(id)).await
    }
}

impl<S> Table<S>
where
    S: DocumentSchema + 'static,
    S::Model: Send + 'static,
{
    /// Open a typed change feed for the entity stored under `id`.
    ///
    /// Yields the mapped model for the current record (if any) and for
    /// every subsequent write at that path. Mapping failures are forwarded
    /// on the feed, not swallowed: a live view must learn that its record
    /// went bad.
    ///
    /// # Errors
    ///
    /// Returns the driver failure passed through when the feed cannot be
    /// opened.
    pub async fn listen(&self, id: &str) -> Result<mpsc::Receiver<Result<S::Model>>> {
        let path = Self::path(id);
        let mut raw = self.store.listen(&path).await?;

        let id = id.to_string();
        let (tx, rx) = mpsc::channel(LISTEN_BUFFER);
        tokio::spawn(async move {
            while let Some(value) = raw.recv().await {
                let item = Self::decode(&path, value, id.clone());
                if let Err(err) = &item {
                    warn!("change feed at {path}: {err}");
                }
                if tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }
}
