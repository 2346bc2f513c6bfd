//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the catalog service
//!   (e.g., `http://localhost:3333`)
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory for the persisted cart mirror
//!   (default: `.rocketshoes`)
//! - `CART_STORAGE_KEY` - Storage key for the cart slot
//!   (default: `@RocketShoes:cart`)
//! - `CATALOG_TIMEOUT_SECS` - Catalog request timeout in seconds
//!   (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";
const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog service configuration
    pub catalog: CatalogConfig,
    /// Directory holding the persisted cart mirror
    pub storage_dir: PathBuf,
    /// Storage key for the cart slot
    pub storage_key: String,
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl CartConfig {
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

        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            storage_dir: PathBuf::from(get_env_or_default("CART_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
            storage_key: get_env_or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("CATALOG_BASE_URL")?;
        validate_base_url(&base_url, "CATALOG_BASE_URL")?;

        let timeout_secs = get_env_or_default("CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
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

/// Validate that a base URL parses and uses an http scheme.
fn validate_base_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_http() {
        assert!(validate_base_url("http://localhost:3333", "TEST_VAR").is_ok());
        assert!(validate_base_url("https://catalog.example.com/api", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_base_url_rejects_garbage() {
        let result = validate_base_url("not a url", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_base_url_rejects_non_http_scheme() {
        let result = validate_base_url("ftp://catalog.example.com", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("CATALOG_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: CATALOG_BASE_URL"
        );
    }
}
