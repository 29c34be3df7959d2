//! Document store abstraction.
//!
//! Handlers never talk to MongoDB directly: they receive a typed
//! [`Collection`] built on top of the shared [`DocumentStore`] handle that
//! lives in the application state.

mod memory;
mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use serde::de::DeserializeOwned;

/// Errors raised by the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database is not connected: {0}")]
    Disconnected(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Serialize(#[from] bson::ser::Error),

    #[error("failed to decode document: {0}")]
    Deserialize(#[from] bson::de::Error),
}

/// Raw document operations over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Applies `changes` as a `$set` and returns the document after the update.
    /// An empty `changes` document leaves the record untouched.
    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Removes the document and returns it, or `None` if nothing matched.
    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError>;
}

/// A record type persisted in its own collection.
pub trait Model: DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// Fields every newly created document starts with.
    fn defaults() -> Document {
        Document::new()
    }
}

/// Typed view of one collection.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _model: PhantomData,
        }
    }
}

impl<T: Model> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _model: PhantomData,
        }
    }

    pub async fn find(&self, filter: Document) -> Result<Vec<T>, StoreError> {
        self.store
            .find(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(|document| bson::from_document(document).map_err(StoreError::from))
            .collect()
    }

    /// Inserts a new document with a freshly generated id.
    pub async fn create(&self, fields: Document) -> Result<T, StoreError> {
        let mut document = doc! { "_id": ObjectId::new() };
        for (key, value) in T::defaults().into_iter().chain(fields) {
            document.insert(key, value);
        }

        self.store.insert_one(T::COLLECTION, document.clone()).await?;

        Ok(bson::from_document(document)?)
    }

    pub async fn update(&self, id: ObjectId, changes: Document) -> Result<Option<T>, StoreError> {
        self.store
            .find_by_id_and_update(T::COLLECTION, id, changes)
            .await?
            .map(bson::from_document::<T>)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Removes the record; `false` if no record had this id.
    /// The removed document is not decoded, so malformed records can still be deleted.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, StoreError> {
        let removed = self.store.find_by_id_and_delete(T::COLLECTION, id).await?;
        Ok(removed.is_some())
    }
}
