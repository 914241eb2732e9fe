//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROCKETSHOES_API_URL` - Base URL of the product/stock API
//!
//! ## Optional
//! - `ROCKETSHOES_STORAGE_PATH` - Storage file (default: rocketshoes-storage.json)
//! - `ROCKETSHOES_STORAGE_KEY` - Key the cart is stored under (default: @RocketShoes:cart)
//! - `ROCKETSHOES_PRODUCT_CACHE_TTL_SECS` - Product data cache TTL (default: 300, max: one year)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use rocketshoes_cart::{DEFAULT_STORAGE_KEY, MAX_PRODUCT_TTL};
use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_PATH: &str = "rocketshoes-storage.json";
const DEFAULT_PRODUCT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Product/stock API root
    pub api_url: Url,
    /// JSON file the cart is persisted to
    pub storage_path: PathBuf,
    /// Key the cart blob is stored under
    pub storage_key: String,
    /// How long product display data stays cached
    pub product_cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl CliConfig {
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

    /// Load configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("ROCKETSHOES_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("ROCKETSHOES_API_URL".to_string()))?;
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ROCKETSHOES_API_URL".to_string(), e.to_string())
        })?;

        let storage_path = PathBuf::from(
            lookup("ROCKETSHOES_STORAGE_PATH").unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string()),
        );
        let storage_key =
            lookup("ROCKETSHOES_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ROCKETSHOES_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let ttl_secs = match lookup("ROCKETSHOES_PRODUCT_CACHE_TTL_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "ROCKETSHOES_PRODUCT_CACHE_TTL_SECS".to_string(),
                    e.to_string(),
                )
            })?,
            None => DEFAULT_PRODUCT_CACHE_TTL_SECS,
        };
        let product_cache_ttl = Duration::from_secs(ttl_secs);
        if product_cache_ttl > MAX_PRODUCT_TTL {
            return Err(ConfigError::InvalidEnvVar(
                "ROCKETSHOES_PRODUCT_CACHE_TTL_SECS".to_string(),
                format!("must be at most {} seconds", MAX_PRODUCT_TTL.as_secs()),
            ));
        }

        Ok(Self {
            api_url,
            storage_path,
            storage_key,
            product_cache_ttl,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}
