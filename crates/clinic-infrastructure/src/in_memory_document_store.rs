//! In-memory document store.

use async_trait::async_trait;
use clinic_core::document::{Document, DocumentSnapshot, DocumentStore};
use clinic_core::{ClinicError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// Document store holding named collections in memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document under a generated id and returns that id.
    pub fn add(&self, collection: &str, document: Document) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert(collection, &id, document);
        id
    }

    /// Inserts or replaces a document without going through the async trait.
    pub fn insert(&self, collection: &str, id: &str, document: Document) {
        self.write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.read().get(collection).map_or(0, BTreeMap::len)
    }

    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.read()
            .get(collection)
            .is_some_and(|docs| docs.contains_key(id))
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<DocumentSnapshot>> {
        let collections = self.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|(_, doc)| doc.get(field) == Some(value))
            .map(|(id, doc)| DocumentSnapshot::new(id.clone(), doc.clone()))
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()> {
        self.insert(collection, id, document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| ClinicError::not_found("document", format!("{}/{}", collection, id)))
    }
}
