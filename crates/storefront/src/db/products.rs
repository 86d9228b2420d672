//! Product repository: filtered, paginated listing and counting.

use bson::Document;

use electron_core::{Collection, ProductQuery};

use super::{CollectionRepository, DocumentStore, StoreError};

/// Repository for the `Products` collection.
pub struct ProductRepository<'a> {
    inner: CollectionRepository<'a>,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            inner: CollectionRepository::new(store, Collection::Products),
        }
    }

    /// List products matching the query's filters, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn search(&self, query: &ProductQuery) -> Result<Vec<Document>, StoreError> {
        let filter = query.filter();
        let page = query.page().resolve();
        tracing::debug!(?filter, skip = page.skip, limit = page.limit, "Searching products");

        self.inner.find(filter.to_document(), Some(page)).await
    }

    /// Total number of products, independent of any filter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn count(&self) -> Result<u64, StoreError> {
        self.inner.count().await
    }
}
