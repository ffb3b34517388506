//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the catalog service (e.g.
//!   `https://shop.example.com`)
//! - `CATALOG_API_TOKEN` - Bearer token for the admin API
//!
//! ## Optional
//! - `CATALOG_LOCALE` - Locale sent with create requests (default: en)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_LOCALE: &str = "en";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Catalog service API configuration.
    pub catalog: CatalogConfig,
}

/// Catalog service API configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    pub base_url: String,
    /// Bearer token for the admin API.
    pub token: SecretString,
    /// Locale sent with brand/category/attribute create requests.
    pub locale: String,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("locale", &self.locale)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or the base
    /// URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            catalog: CatalogConfig::from_env()?,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("CATALOG_API_URL")?;
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            // Trailing slashes would double up when joining paths.
            base_url: base_url.trim_end_matches('/').to_string(),
            token: SecretString::from(get_required_env("CATALOG_API_TOKEN")?),
            locale: get_env_or_default("CATALOG_LOCALE", DEFAULT_LOCALE),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
