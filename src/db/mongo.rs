//! MongoDB client wrapper.

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{Client, Database, options::ReturnDocument};
use tracing::{error, info};

use super::{DocumentStore, StoreError};
use crate::config::Config;

const DEFAULT_DB_NAME: &str = "test";

#[derive(Debug, Clone)]
enum Connection {
    Ready(Database),
    Unavailable(String),
}

/// Process-wide MongoDB handle.
#[derive(Debug, Clone)]
pub struct MongoStore {
    connection: Connection,
}

impl MongoStore {
    /// Connects once and pings the server.
    ///
    /// Failures are logged and never retried. When no client could be built
    /// the returned store fails every query with [`StoreError::Disconnected`];
    /// when only the ping failed, queries go through the driver and fail (or
    /// succeed) on their own.
    pub async fn connect(config: &Config) -> Self {
        let Some(uri) = config.mongo_uri.as_deref() else {
            error!("MongoDB connection error: MONGO_URI is not set");
            return Self::unavailable("MONGO_URI is not set");
        };

        let client = match Client::with_uri_str(uri).await {
            Ok(client) => client,
            Err(e) => {
                error!("MongoDB connection error: {}", e);
                return Self::unavailable(e.to_string());
            }
        };

        let database = client.default_database().unwrap_or_else(|| {
            client.database(config.mongo_db_name.as_deref().unwrap_or(DEFAULT_DB_NAME))
        });

        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!("MongoDB connected successfully (database '{}')", database.name()),
            Err(e) => error!("MongoDB connection error: {}", e),
        }

        Self {
            connection: Connection::Ready(database),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            connection: Connection::Unavailable(reason.into()),
        }
    }

    fn collection(&self, name: &str) -> Result<mongodb::Collection<Document>, StoreError> {
        match &self.connection {
            Connection::Ready(database) => Ok(database.collection::<Document>(name)),
            Connection::Unavailable(reason) => Err(StoreError::Disconnected(reason.clone())),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection)?.find(filter).await?;
        Ok(cursor.try_collect::<Vec<Document>>().await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.collection(collection)?.insert_one(document).await?;
        Ok(())
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collection = self.collection(collection)?;

        // `$set` with an empty document is rejected by the server
        if changes.is_empty() {
            return Ok(collection.find_one(doc! { "_id": id }).await?);
        }

        Ok(collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn find_by_id_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collection(collection)?
            .find_one_and_delete(doc! { "_id": id })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_uri_yields_a_disconnected_store() {
        let config = Config {
            mongo_uri: None,
            mongo_db_name: None,
            port: 0,
            public_dir: "public".into(),
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
        };

        let store = MongoStore::connect(&config).await;
        let result = store.find("users", Document::new()).await;

        assert!(matches!(result, Err(StoreError::Disconnected(_))));
    }

    #[tokio::test]
    async fn invalid_uri_yields_a_disconnected_store() {
        let config = Config {
            mongo_uri: Some("not-a-mongo-uri".to_string()),
            mongo_db_name: None,
            port: 0,
            public_dir: "public".into(),
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
        };

        let store = MongoStore::connect(&config).await;
        let result = store
            .find_by_id_and_delete("questions", ObjectId::new())
            .await;

        assert!(matches!(result, Err(StoreError::Disconnected(_))));
    }
}
