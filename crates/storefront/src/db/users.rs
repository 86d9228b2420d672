//! User repository: lookup by email.

use bson::{Document, doc};

use electron_core::Collection;

use super::{CollectionRepository, DocumentStore, StoreError};

/// Field users are keyed by.
pub const EMAIL_FIELD: &str = "email";

/// Repository for the `users` collection.
pub struct UserRepository<'a> {
    inner: CollectionRepository<'a>,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            inner: CollectionRepository::new(store, Collection::Users),
        }
    }

    /// Get a user by exact email match.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store operation fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Document>, StoreError> {
        self.inner.find_one(doc! { EMAIL_FIELD: email }).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn test_create_then_get_by_email() {
        let store = MemoryStore::new();
        CollectionRepository::new(&store, Collection::Users)
            .create(doc! { "email": "ada@example.com", "role": "admin" })
            .await
            .unwrap();

        let user = UserRepository::new(&store)
            .get_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.get_str("role").unwrap(), "admin");
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let store = MemoryStore::new();
        CollectionRepository::new(&store, Collection::Users)
            .create(doc! { "email": "ada@example.com" })
            .await
            .unwrap();

        let repo = UserRepository::new(&store);
        assert!(repo.get_by_email("ADA@example.com").await.unwrap().is_none());
        assert!(repo.get_by_email("ada").await.unwrap().is_none());
    }
}
