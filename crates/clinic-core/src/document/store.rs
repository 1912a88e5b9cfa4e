//! Document store trait.

use super::model::{Document, DocumentSnapshot};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// An abstract document database organised in named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection` whose `field` equals `value`.
    ///
    /// # Returns
    ///
    /// - `Ok(vec![])`: No document matched
    /// - `Ok(docs)`: All matching documents, in unspecified order
    /// - `Err(_)`: Error occurred during the query
    async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<DocumentSnapshot>>;

    /// Gets a document by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(doc))`: Document found
    /// - `Ok(None)`: Document not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Creates or replaces a document.
    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<()>;

    /// Deletes a document.
    ///
    /// Returns `NotFound` when no document with that id exists.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
