//! Generic document representation.
//!
//! Records are stored field-per-attribute: every serde field of a record
//! becomes one key of the document.

use crate::error::{ClinicError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A key-value document as held by the document database.
pub type Document = Map<String, Value>;

/// A document together with the id it is stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub id: String,
    pub data: Document,
}

impl DocumentSnapshot {
    pub fn new(id: impl Into<String>, data: Document) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decodes the document body into a record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode(&self.data)
    }
}

/// Encodes a record into a document.
///
/// Fails with `Decode` when the record does not serialize to a JSON object.
pub fn encode<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(ClinicError::Decode(format!(
            "record must encode to an object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decodes a document into a record.
pub fn decode<T: DeserializeOwned>(document: &Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document.clone()))?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
