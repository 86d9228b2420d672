//! Conversion between JSON request/response bodies and store documents.
//!
//! Object ids render as their hex string and dates as RFC 3339 strings,
//! which is how storefront clients expect to receive them. Everything else
//! uses relaxed extended JSON.

use bson::{Bson, Document};
use serde_json::{Map, Value};

/// A JSON body that cannot be stored as a document.
#[derive(thiserror::Error, Debug)]
#[error("body cannot be stored as a document: {0}")]
pub struct DocumentError(#[from] bson::ser::Error);

/// Convert a JSON object into a store document.
///
/// # Errors
///
/// Returns `DocumentError` if a value is not representable, for example an
/// unsigned integer larger than `i64::MAX`.
pub fn document_from_json(body: &Map<String, Value>) -> Result<Document, DocumentError> {
    Ok(bson::to_document(body)?)
}

/// Render a store document as a JSON object.
#[must_use]
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Render a single store value as JSON.
#[must_use]
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(at) => at
            .try_to_rfc3339_string()
            .map_or_else(|_| Bson::DateTime(at).into_relaxed_extjson(), Value::String),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
