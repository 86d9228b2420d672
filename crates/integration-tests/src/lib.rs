//! Integration tests for the Electron storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront against a scratch database
//! STOREFRONT_DATABASE_NAME=ElectronTest cargo run -p electron-storefront
//!
//! # Run integration tests
//! cargo test -p electron-integration-tests -- --ignored
//! ```
//!
//! Tests create their own documents with unique markers and delete them
//! afterwards, so they can run against a shared database. Point them at a
//! server other than `http://localhost:5000` with `STOREFRONT_BASE_URL`.

use reqwest::Client;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Build a URL for `path` on the storefront under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", storefront_base_url().trim_end_matches('/'))
}

/// HTTP client for the tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique marker for documents created by one test.
#[must_use]
pub fn marker() -> String {
    format!("it-{}", uuid::Uuid::new_v4())
}
