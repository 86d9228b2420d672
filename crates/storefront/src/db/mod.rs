//! Document store access for the storefront.
//!
//! # Store: `Electron`
//!
//! All state lives in the document store; handlers reach it through the
//! [`DocumentStore`] trait held in the application state.
//!
//! ## Collections
//!
//! - `Products` - Catalog, filtered and paginated by the listing endpoint
//! - `users` - Site users, looked up by email
//! - `testimonials`, `blogPosts`, `featuredCategories`, `specialOffers`,
//!   `newsLetter`, `featuredBrands` - Pass-through content documents
//!
//! # Implementations
//!
//! - [`MongoStore`] - production store over the `MongoDB` driver
//! - [`MemoryStore`] - in-process store used as a test double

pub mod memory;
pub mod mongo;
pub mod products;
pub mod repository;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;
use secrecy::SecretString;
use thiserror::Error;

use electron_core::{Collection, DeleteAck, InsertAck, Pagination, UpdateAck};

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use products::ProductRepository;
pub use repository::CollectionRepository;
pub use users::UserRepository;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the `MongoDB` driver.
    #[error("database error: {0}")]
    Database(#[source] mongodb::error::Error),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A document with the same `_id` already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The store rejected the filter or update.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Operations the storefront needs from a document store.
///
/// Filters are plain predicate documents: top-level field equality plus
/// the `$regex`/`$options` operator pair. Updates carry the fields to
/// `$set`; fields not mentioned are left unchanged.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find documents matching `filter` in store order, optionally windowed.
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        page: Option<Pagination>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Find the first document matching `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a new document; the store assigns `_id` when absent.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, StoreError>;

    /// Merge `patch` into the first document matching `filter`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        patch: Document,
    ) -> Result<UpdateAck, StoreError>;

    /// Remove the first document matching `filter`.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, StoreError>;

    /// Remove every document matching `filter`.
    async fn delete_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, StoreError>;

    /// Total number of documents in the collection.
    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Round trip to the store to verify connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Shared handle to the process-wide store.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Connect to `MongoDB` and verify the connection with a ping.
///
/// # Arguments
///
/// * `database_url` - `MongoDB` connection string (wrapped in `SecretString`)
/// * `database` - Name of the database holding the collections
///
/// # Errors
///
/// Returns `StoreError` if the connection string is invalid or the server
/// does not answer the ping.
pub async fn connect(database_url: &SecretString, database: &str) -> Result<MongoStore, StoreError> {
    MongoStore::connect(database_url, database).await
}
