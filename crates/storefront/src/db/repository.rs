//! Generic collection repository.
//!
//! One repository type serves every collection. Collection-specific
//! behaviour (product search, user lookup) lives in thin wrappers that
//! compose this one.

use bson::Document;

use electron_core::{Collection, DeleteAck, DocumentId, ID_FIELD, InsertAck, Pagination, UpdateAck};

use super::{DocumentStore, StoreError};

/// Repository for one document collection.
#[derive(Clone, Copy)]
pub struct CollectionRepository<'a> {
    store: &'a dyn DocumentStore,
    collection: Collection,
}

impl<'a> CollectionRepository<'a> {
    /// Create a repository bound to `collection`.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore, collection: Collection) -> Self {
        Self { store, collection }
    }

    /// List every document in store order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn list(&self) -> Result<Vec<Document>, StoreError> {
        self.find(Document::new(), None).await
    }

    /// List documents matching `filter`, optionally windowed by `page`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn find(
        &self,
        filter: Document,
        page: Option<Pagination>,
    ) -> Result<Vec<Document>, StoreError> {
        self.store.find(self.collection, filter, page).await
    }

    /// Find the first document matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        self.store.find_one(self.collection, filter).await
    }

    /// Total number of documents, ignoring any filter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(self.collection).await
    }

    /// Insert `document` as given.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateKey` if the body carries an `_id` that
    /// is already taken, or another `StoreError` if the insert fails.
    pub async fn create(&self, document: Document) -> Result<InsertAck, StoreError> {
        tracing::debug!(collection = %self.collection, "Inserting document");
        self.store.insert_one(self.collection, document).await
    }

    /// Merge `patch` into the document with `id`.
    ///
    /// The identifier is immutable, so an `_id` in the patch is dropped.
    /// A missing document is reported as `matched_count == 0`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn update(&self, id: DocumentId, mut patch: Document) -> Result<UpdateAck, StoreError> {
        patch.remove(ID_FIELD);
        tracing::debug!(collection = %self.collection, %id, "Updating document");
        self.store.update_one(self.collection, id.filter(), patch).await
    }

    /// Delete the document with `id`.
    ///
    /// A missing document is reported as `deleted_count == 0`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn delete(&self, id: DocumentId) -> Result<DeleteAck, StoreError> {
        tracing::debug!(collection = %self.collection, %id, "Deleting document");
        self.store.delete_one(self.collection, id.filter()).await
    }

    /// Delete every document in the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn clear(&self) -> Result<DeleteAck, StoreError> {
        tracing::debug!(collection = %self.collection, "Clearing collection");
        self.store.delete_many(self.collection, Document::new()).await
    }
}
