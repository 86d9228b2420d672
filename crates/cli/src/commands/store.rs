//! Store inspection commands.

use electron_core::Collection;
use electron_storefront::db::{CollectionRepository, DocumentStore};

/// Connect and ping the store.
///
/// # Errors
///
/// Returns an error if configuration is missing or the store does not answer.
pub async fn ping() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;
    store.ping().await?;
    tracing::info!("Store is reachable");
    Ok(())
}

/// Log the number of documents in `collection`.
///
/// # Errors
///
/// Returns an error if configuration is missing or the count fails.
pub async fn count(collection: Collection) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;
    let count = CollectionRepository::new(&store, collection).count().await?;
    tracing::info!(%collection, count, "Document count");
    Ok(())
}
