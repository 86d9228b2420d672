//! Seed a collection from a fixture file.
//!
//! Fixtures are arrays of JSON objects. Files ending in `.json` are read as
//! JSON; anything else is read as YAML.

use std::path::Path;

use bson::Document;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use electron_core::{Collection, document_from_json};
use electron_storefront::db::CollectionRepository;

/// Errors reading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Fixture must be an array of documents")]
    NotAnArray,
    #[error("Entry {0} is not an object")]
    NotAnObject(usize),
    #[error("Entry {0} cannot be stored: {1}")]
    Unstorable(usize, String),
}

/// Insert every document in `file` into `collection`.
///
/// # Arguments
///
/// * `collection` - Target collection
/// * `file` - Path to a YAML or JSON array of documents
/// * `clear` - If true, delete the existing documents first
///
/// # Errors
///
/// Returns an error if the file cannot be parsed, environment variables are
/// missing, or a store operation fails. The file is validated before
/// connecting.
pub async fn documents(
    collection: Collection,
    file: &Path,
    clear: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %file.display(), %collection, "Loading fixture");
    let documents = load_fixture(file).await?;
    info!(documents = documents.len(), "Parsed fixture");

    let store = super::connect().await?;
    let repo = CollectionRepository::new(&store, collection);

    if clear {
        let ack = repo.clear().await?;
        warn!(deleted = ack.deleted_count, "Cleared existing documents");
    }

    let mut inserted = 0_usize;
    for document in documents {
        repo.create(document).await?;
        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Documents inserted: {inserted}");
    Ok(())
}

/// Read and validate a fixture file.
async fn load_fixture(file: &Path) -> Result<Vec<Document>, FixtureError> {
    if !file.exists() {
        return Err(FixtureError::NotFound(file.display().to_string()));
    }

    let content = tokio::fs::read_to_string(file).await?;
    let is_json = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_fixture(&content, is_json)
}

fn parse_fixture(content: &str, is_json: bool) -> Result<Vec<Document>, FixtureError> {
    let value: Value = if is_json {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };

    let Value::Array(entries) = value else {
        return Err(FixtureError::NotAnArray);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => document_from_json(&fields)
                .map_err(|e| FixtureError::Unstorable(index, e.to_string())),
            _ => Err(FixtureError::NotAnObject(index)),
        })
        .collect()
}
