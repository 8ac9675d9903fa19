//! Document stores for molecule records.
//!
//! [`Database`] talks to MongoDB; [`InMemoryStore`] keeps documents in the
//! process and is used for dry runs and offline tests.

use async_trait::async_trait;
use mongodb::Client;
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::models::{InsertSummary, MoleculeRecord, StoredMolecule};

pub const DEFAULT_DATABASE: &str = "DrugXpert";
pub const DEFAULT_COLLECTION: &str = "molecules";

/// A collection of molecule documents.
#[async_trait]
pub trait MoleculeStore: Send + Sync {
    /// Appends all records in one bulk write. Nothing is matched or replaced.
    async fn insert_many(&self, records: &[MoleculeRecord]) -> Result<InsertSummary, StoreError>;

    /// Number of documents in the collection.
    async fn count(&self) -> Result<u64, StoreError>;

    /// All documents whose `moleculeName` equals `name`.
    async fn find_by_name(&self, name: &str) -> Result<Vec<StoredMolecule>, StoreError>;
}

#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
    collection: String,
}

impl Database {
    /// Connects to `uri`, verifies the server answers a ping, and selects
    /// `database`. Molecules are written to `collection`.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Connected to MongoDB, using {database}.{collection}");
        Ok(Self::new(client.database(database), collection))
    }

    pub fn new(db: mongodb::Database, collection: impl Into<String>) -> Self {
        Self {
            db,
            collection: collection.into(),
        }
    }

    /// The underlying driver handle.
    pub fn handle(&self) -> &mongodb::Database {
        &self.db
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub async fn drop_database(&self) -> Result<(), StoreError> {
        self.db.drop().await?;
        Ok(())
    }
}

#[async_trait]
impl MoleculeStore for Database {
    async fn insert_many(&self, records: &[MoleculeRecord]) -> Result<InsertSummary, StoreError> {
        // The driver rejects an empty batch.
        if records.is_empty() {
            return Ok(InsertSummary::default());
        }

        let result = self
            .db
            .collection::<MoleculeRecord>(&self.collection)
            .insert_many(records)
            .await?;

        let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);

        debug!("Inserted {} documents into {}", ids.len(), self.collection);

        Ok(InsertSummary {
            inserted_ids: ids.into_iter().map(|(_, id)| id).collect(),
        })
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count = self
            .db
            .collection::<Document>(&self.collection)
            .count_documents(doc! {})
            .await?;
        Ok(count)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<StoredMolecule>, StoreError> {
        let mut cursor = self
            .db
            .collection::<StoredMolecule>(&self.collection)
            .find(doc! { "moleculeName": name })
            .await?;

        let mut molecules = Vec::new();
        while cursor.advance().await? {
            molecules.push(cursor.deserialize_current()?);
        }
        Ok(molecules)
    }
}

/// Process-local store holding BSON documents the way the server would.
#[derive(Default)]
pub struct InMemoryStore {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every stored document, `_id` included.
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.lock().await.clone()
    }
}

#[async_trait]
impl MoleculeStore for InMemoryStore {
    async fn insert_many(&self, records: &[MoleculeRecord]) -> Result<InsertSummary, StoreError> {
        let mut encoded = Vec::with_capacity(records.len());
        let mut inserted_ids = Vec::with_capacity(records.len());

        for record in records {
            let id = Bson::ObjectId(ObjectId::new());
            let mut document = doc! { "_id": id.clone() };
            document.extend(bson::to_document(record)?);
            encoded.push(document);
            inserted_ids.push(id);
        }

        self.documents.lock().await.extend(encoded);
        Ok(InsertSummary { inserted_ids })
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.documents.lock().await.len() as u64)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<StoredMolecule>, StoreError> {
        let documents = self.documents.lock().await;
        let mut molecules = Vec::new();
        for document in documents.iter() {
            if document.get_str("moleculeName").ok() == Some(name) {
                molecules.push(bson::from_document(document.clone())?);
            }
        }
        Ok(molecules)
    }
}
