//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults target the public demo API.
//!
//! - `STOREFRONT_API_BASE_URL` - Base URL of the catalog/auth REST API
//!   (default: `https://api.escuelajs.co/api/v1`)
//! - `STOREFRONT_PAGE_SIZE` - Products per catalog page (default: 12)
//! - `STOREFRONT_CATALOG_FETCH_LIMIT` - How many products to fetch up front
//!   for client-side filtering (default: 100)
//! - `STOREFRONT_STATE_DIR` - Directory for persisted state; when unset,
//!   state lives in memory only and does not survive the process

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base URL of the remote catalog/auth API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// Default number of products shown per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Default number of products fetched up front for client-side filtering.
pub const DEFAULT_CATALOG_FETCH_LIMIT: u32 = 100;

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
    /// Base URL of the remote catalog/auth API.
    pub api_base_url: Url,
    /// Products per catalog page.
    pub page_size: usize,
    /// Products fetched up front for client-side filtering.
    pub catalog_fetch_limit: u32,
    /// Directory for persisted state, if any.
    pub state_dir: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but fails to parse or
    /// validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("STOREFRONT_API_BASE_URL", DEFAULT_API_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_API_BASE_URL".to_string(), e.to_string())
            })?;

        let page_size = parse_env_or(
            "STOREFRONT_PAGE_SIZE",
            DEFAULT_PAGE_SIZE,
            validate_page_size,
        )?;
        let catalog_fetch_limit = parse_env_or(
            "STOREFRONT_CATALOG_FETCH_LIMIT",
            DEFAULT_CATALOG_FETCH_LIMIT,
            validate_fetch_limit,
        )?;

        let state_dir = get_optional_env("STOREFRONT_STATE_DIR").map(PathBuf::from);

        Ok(Self {
            api_base_url,
            page_size,
            catalog_fetch_limit,
            state_dir,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            // The default is a compile-time constant and always parses.
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default API base URL is valid")),
            page_size: DEFAULT_PAGE_SIZE,
            catalog_fetch_limit: DEFAULT_CATALOG_FETCH_LIMIT,
            state_dir: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default when unset and
/// running a validation hook on the result.
fn parse_env_or<T>(
    key: &str,
    default: T,
    validate: fn(&str, T) -> Result<T, ConfigError>,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Copy,
    T::Err: std::fmt::Display,
{
    let value = match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?,
        Err(_) => default,
    };
    validate(key, value)
}

/// Page size must be at least 1, or pagination degenerates.
fn validate_page_size(key: &str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(value)
}

/// Fetch limit must be at least 1 so the catalog has something to show.
fn validate_fetch_limit(key: &str, value: u32) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(value)
}
