//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Database (one of)
//! - `STOREFRONT_DATABASE_URL` - `MongoDB` connection string
//! - `DATABASE_URL` - Generic fallback for the connection string
//! - `DB_USER`, `DB_PASSWORD`, `DB_CLUSTER` - Credentials and cluster host
//!   for a `mongodb+srv://` connection string
//!
//! ## Optional
//! - `STOREFRONT_DATABASE_NAME` - Database holding the collections (default: Electron)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` or `PORT` - Listen port (default: 5000)
//! - `STOREFRONT_CORS_ORIGINS` - Comma-separated allowed origins
//!   (default: <http://localhost:5173>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_NAME: &str = "Electron";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `MongoDB` connection URL (contains credentials)
    pub database_url: SecretString,
    /// Database holding the storefront collections
    pub database_name: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<HeaderValue>,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when absent
    pub dsn: Option<String>,
    /// Environment tag attached to events
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Transaction sample rate
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = database_url(&lookup)?;
        let database_name = lookup("STOREFRONT_DATABASE_NAME")
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        let host = lookup("STOREFRONT_HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string()))?;
        let (port_var, port) = ["STOREFRONT_PORT", "PORT"]
            .into_iter()
            .find_map(|key| lookup(key).map(|value| (key, value)))
            .unwrap_or(("STOREFRONT_PORT", DEFAULT_PORT.to_string()));
        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar(port_var.to_string(), e.to_string()))?;

        let cors_origins = parse_origins(
            &lookup("STOREFRONT_CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        )?;

        let sentry = SentryConfig {
            dsn: lookup("SENTRY_DSN"),
            environment: lookup("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        };

        Ok(Self {
            database_url,
            database_name,
            host,
            port,
            cors_origins,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve the connection string.
///
/// An explicit URL wins; otherwise one is composed from the cluster
/// credentials, which are percent-encoded.
fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> Result<SecretString, ConfigError> {
    if let Some(url) = lookup("STOREFRONT_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
        return Ok(SecretString::from(url));
    }

    let required = |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));
    let user = required("DB_USER")?;
    let password = required("DB_PASSWORD")?;
    let cluster = required("DB_CLUSTER")?;

    Ok(SecretString::from(format!(
        "mongodb+srv://{}:{}@{cluster}/?retryWrites=true&w=majority",
        urlencoding::encode(&user),
        urlencoding::encode(&password),
    )))
}

/// Parse a comma-separated list of origins.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_CORS_ORIGINS".to_string(), e.to_string())
            })
        })
        .collect()
}

/// Parse a sample rate in `[0.0, 1.0]`.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}
