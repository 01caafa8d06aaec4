//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CART_API_BASE_URL` - Base url of the inventory API serving `stock/{id}` and `products/{id}`
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: `@RocketShoes:cart`)
//! - `CART_STORE_PATH` - JSON file backing the persisted store (default: `cart.json`)
//! - `CART_REQUEST_TIMEOUT_SECS` - Timeout for inventory requests, none when unset

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::modules::cart::adapters::outbound::cart_repository::DEFAULT_STORAGE_KEY;

const DEFAULT_STORE_PATH: &str = "cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Inventory API base url
    pub api_base_url: Url,
    /// Key of the cart inside the persisted store
    pub storage_key: String,
    /// Location of the JSON store file
    pub store_path: PathBuf,
    /// Per request timeout for inventory calls
    pub request_timeout: Option<Duration>,
}

impl CartConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let raw_url = get("CART_API_BASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("CART_API_BASE_URL".to_string()))?;
        let api_base_url = Url::parse(raw_url.trim()).map_err(|err| {
            ConfigError::InvalidEnvVar("CART_API_BASE_URL".to_string(), err.to_string())
        })?;

        let request_timeout = get("CART_REQUEST_TIMEOUT_SECS")
            .map(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidEnvVar(
                    "CART_REQUEST_TIMEOUT_SECS".to_string(),
                    format!("expected a positive number of seconds, got {raw:?}"),
                )),
            })
            .transpose()?;

        Ok(Self {
            api_base_url,
            storage_key: get("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            store_path: get("CART_STORE_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
            request_timeout,
        })
    }
}
