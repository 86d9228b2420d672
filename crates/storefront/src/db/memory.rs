//! In-process document store.
//!
//! Implements the subset of the query language the storefront issues:
//! top-level field equality (numbers compare by value, arrays match when
//! any element matches), `null` matching missing fields, `$eq`, and
//! `$regex` with the `i` option. Updates are `$set` merges of top-level
//! fields. Documents are kept in insertion order, which is the natural
//! order `find` returns.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bson::{Bson, Document};
use regex::RegexBuilder;
use tokio::sync::RwLock;

use electron_core::{
    Collection, DeleteAck, DocumentId, ID_FIELD, InsertAck, Pagination, UpdateAck, bson_to_json,
};

use super::{DocumentStore, StoreError};

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while offline every operation fails with
    /// [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        page: Option<Pagination>,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut matched = Vec::new();
        for document in documents {
            if matches(document, &filter)? {
                matched.push(document.clone());
            }
        }

        Ok(match page {
            Some(page) => matched
                .into_iter()
                .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
                .collect(),
            None => matched,
        })
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;
        for document in collections.get(&collection).into_iter().flatten() {
            if matches(document, &filter)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, StoreError> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        let stored = if document.contains_key(ID_FIELD) {
            document
        } else {
            let mut stored = Document::new();
            stored.insert(ID_FIELD, DocumentId::generate().as_object_id());
            stored.extend(document);
            stored
        };

        let id = stored.get(ID_FIELD).cloned().unwrap_or(Bson::Null);
        if documents
            .iter()
            .any(|existing| existing.get(ID_FIELD).is_some_and(|other| bson_eq(other, &id)))
        {
            return Err(StoreError::DuplicateKey(format!(
                "{collection} already holds _id {id}"
            )));
        }

        documents.push(stored);
        Ok(InsertAck::new(bson_to_json(id)))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        patch: Document,
    ) -> Result<UpdateAck, StoreError> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(UpdateAck::new(0, 0));
        };

        for document in documents.iter_mut() {
            if !matches(document, &filter)? {
                continue;
            }

            if let Some(new_id) = patch.get(ID_FIELD)
                && document.get(ID_FIELD) != Some(new_id)
            {
                return Err(StoreError::InvalidQuery(
                    "the _id field is immutable".to_owned(),
                ));
            }

            let mut modified = false;
            for (field, value) in patch {
                if document.get(&field) != Some(&value) {
                    document.insert(field, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck::new(1, u64::from(modified)));
        }

        Ok(UpdateAck::new(0, 0))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, StoreError> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteAck::new(0));
        };

        let mut position = None;
        for (index, document) in documents.iter().enumerate() {
            if matches(document, &filter)? {
                position = Some(index);
                break;
            }
        }

        Ok(match position {
            Some(index) => {
                documents.remove(index);
                DeleteAck::new(1)
            }
            None => DeleteAck::new(0),
        })
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, StoreError> {
        self.check_online()?;
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteAck::new(0));
        };

        let mut kept = Vec::with_capacity(documents.len());
        let mut deleted: u64 = 0;
        for document in documents.drain(..) {
            if matches(&document, &filter)? {
                deleted += 1;
            } else {
                kept.push(document);
            }
        }
        *documents = kept;

        Ok(DeleteAck::new(deleted))
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.check_online()?;
        let collections = self.collections.read().await;
        let len = collections.get(&collection).map_or(0, Vec::len);
        Ok(u64::try_from(len).unwrap_or(u64::MAX))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

/// Evaluate `filter` against `document`.
fn matches(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (field, condition) in filter {
        let value = document.get(field);
        let matched = match condition {
            Bson::Document(operators) if is_operator_document(operators) => {
                matches_operators(value, operators)?
            }
            expected => matches_value(value, expected),
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn is_operator_document(document: &Document) -> bool {
    document.keys().next().is_some_and(|key| key.starts_with('$'))
}

fn matches_operators(value: Option<&Bson>, operators: &Document) -> Result<bool, StoreError> {
    for (operator, operand) in operators {
        let matched = match operator.as_str() {
            "$eq" => matches_value(value, operand),
            "$regex" => {
                let options = operators.get_str("$options").unwrap_or_default();
                matches_regex(value, operand, options)?
            }
            "$options" => true,
            other => {
                return Err(StoreError::InvalidQuery(format!(
                    "unsupported operator {other}"
                )));
            }
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_regex(value: Option<&Bson>, pattern: &Bson, options: &str) -> Result<bool, StoreError> {
    let Bson::String(pattern) = pattern else {
        return Err(StoreError::InvalidQuery("$regex needs a string".to_owned()));
    };
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .multi_line(options.contains('m'))
        .build()
        .map_err(|e| StoreError::InvalidQuery(e.to_string()))?;

    Ok(match value {
        Some(Bson::String(text)) => regex.is_match(text),
        Some(Bson::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Bson::String(text) if regex.is_match(text))),
        _ => false,
    })
}

fn matches_value(value: Option<&Bson>, expected: &Bson) -> bool {
    match (value, expected) {
        (None | Some(Bson::Null), Bson::Null) => true,
        (None, _) => false,
        (Some(Bson::Array(items)), expected) if !matches!(expected, Bson::Array(_)) => {
            items.iter().any(|item| bson_eq(item, expected))
        }
        (Some(actual), expected) => bson_eq(actual, expected),
    }
}

/// Equality with numeric values compared across integer and double types.
fn bson_eq(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(l), Some(r)) => (l - r).abs() < f64::EPSILON,
        _ => left == right,
    }
}

#[allow(clippy::cast_precision_loss)] // Equality on stored numbers, not arithmetic
fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(*n as f64),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}
