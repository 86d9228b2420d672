//! CLI command implementations.

pub mod seed;
pub mod store;

use electron_storefront::config::StorefrontConfig;
use electron_storefront::db::{self, MongoStore};

/// Load the storefront configuration and connect to its store.
async fn connect() -> Result<MongoStore, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!(database = %config.database_name, "Connecting to store...");
    let store = db::connect(&config.database_url, &config.database_name).await?;
    Ok(store)
}
