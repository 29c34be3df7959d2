//! In-memory document store.
//!
//! Mirrors the MongoDB store for the operations the handlers use: top-level
//! exact-match filters, `$set` updates and removal by `_id`.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn has_id(document: &Document, id: ObjectId) -> bool {
    document.get("_id") == Some(&Bson::ObjectId(id))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| has_id(document, id)))
        else {
            return Ok(None);
        };

        for (key, value) in changes {
            document.insert(key, value);
        }

        Ok(Some(document.clone()))
    }

    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(None);
        };

        Ok(documents
            .iter()
            .position(|document| has_id(document, id))
            .map(|index| documents.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn find_applies_every_filter_key() {
        let store = InMemoryStore::new();
        store
            .insert_one("questions", doc! { "_id": ObjectId::new(), "branch": "CS", "subject": "DS" })
            .await
            .unwrap();
        store
            .insert_one("questions", doc! { "_id": ObjectId::new(), "branch": "CS", "subject": "OS" })
            .await
            .unwrap();
        store
            .insert_one("questions", doc! { "_id": ObjectId::new(), "branch": "EE", "subject": "DS" })
            .await
            .unwrap();

        let both = store
            .find("questions", doc! { "branch": "CS", "subject": "DS" })
            .await
            .unwrap();
        assert_eq!(both.len(), 1);

        let branch_only = store.find("questions", doc! { "branch": "CS" }).await.unwrap();
        assert_eq!(branch_only.len(), 2);

        let all = store.find("questions", Document::new()).await.unwrap();
        assert_eq!(all.len(), 3);

        let other_collection = store.find("users", Document::new()).await.unwrap();
        assert!(other_collection.is_empty());
    }

    #[tokio::test]
    async fn update_sets_only_the_given_fields() {
        let store = InMemoryStore::new();
        let id = ObjectId::new();
        store
            .insert_one("users", doc! { "_id": id, "name": "Ada", "role": "student" })
            .await
            .unwrap();

        let updated = store
            .find_by_id_and_update("users", id, doc! { "role": "admin" })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.get_str("name").unwrap(), "Ada");
        assert_eq!(updated.get_str("role").unwrap(), "admin");

        let missing = store
            .find_by_id_and_update("users", ObjectId::new(), doc! { "role": "admin" })
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_returns_the_removed_document_once() {
        let store = InMemoryStore::new();
        let id = ObjectId::new();
        store
            .insert_one("users", doc! { "_id": id, "name": "Grace" })
            .await
            .unwrap();

        let removed = store.find_by_id_and_delete("users", id).await.unwrap();
        assert_eq!(removed.unwrap().get_str("name").unwrap(), "Grace");

        let again = store.find_by_id_and_delete("users", id).await.unwrap();
        assert!(again.is_none());
        assert!(store.find("users", Document::new()).await.unwrap().is_empty());
    }
}
