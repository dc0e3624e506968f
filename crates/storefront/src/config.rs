//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SELECTURA_API_URL` - Base URL of the commerce backend (e.g., <https://shop.example.com>)
//! - `SELECTURA_CONSUMER_KEY` - REST API consumer key
//! - `SELECTURA_CONSUMER_SECRET` - REST API consumer secret
//!
//! ## Optional
//! - `SELECTURA_API_VERSION` - Versioned catalog API path (default: wc/v3)
//! - `SELECTURA_AUTH_URL` - Base URL for the login/register endpoints
//!   (default: the backend base URL)
//!
//! An invalid or missing base URL is fatal: no request can be served without
//! it, so `from_env` fails before any client is constructed.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Path prefix of the versioned catalog/order REST API.
const REST_PREFIX: &str = "wp-json";

/// Path of the session-scoped cart API (cookie-authenticated, no key/secret).
const CART_API_PATH: &str = "wp-json/wc/store/v1";

/// Path of the same-origin auth endpoints.
const AUTH_API_PATH: &str = "wp-json/selectura/v1/auth";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid backend base URL {0:?}: {1}")]
    InvalidBaseUrl(String, String),
}

/// Storefront commerce configuration.
///
/// Implements `Debug` manually to redact the consumer secret.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the commerce backend.
    pub base_url: Url,
    /// Versioned catalog API path under `wp-json` (e.g., `wc/v3`).
    pub api_version: String,
    /// REST API consumer key (appears in request URLs).
    pub consumer_key: String,
    /// REST API consumer secret.
    pub consumer_secret: SecretString,
    /// Base URL for the auth endpoints.
    pub auth_url: Url,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url.as_str())
            .finish()
    }
}

impl StoreConfig {
    /// Build a configuration from explicit values.
    ///
    /// Used by tests and by callers that manage their own configuration
    /// source; production code goes through [`StoreConfig::from_env`].
    #[must_use]
    pub fn new(base_url: Url, consumer_key: String, consumer_secret: SecretString) -> Self {
        let auth_url = base_url.clone();
        Self {
            base_url,
            api_version: "wc/v3".to_string(),
            consumer_key,
            consumer_secret,
            auth_url,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or the
    /// backend base URL is not a valid http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_required_env("SELECTURA_API_URL")?)?;
        let api_version = get_env_or_default("SELECTURA_API_VERSION", "wc/v3");
        let consumer_key = get_required_env("SELECTURA_CONSUMER_KEY")?;
        let consumer_secret = SecretString::from(get_required_env("SELECTURA_CONSUMER_SECRET")?);
        let auth_url = match get_optional_env("SELECTURA_AUTH_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => base_url.clone(),
        };

        Ok(Self {
            base_url,
            api_version,
            consumer_key,
            consumer_secret,
            auth_url,
        })
    }

    /// Root of the authenticated catalog/order REST API, with trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the configured pieces do not
    /// join into a valid URL.
    pub fn rest_url(&self) -> Result<Url, ConfigError> {
        self.join_base(&format!("{REST_PREFIX}/{}/", self.api_version))
    }

    /// Root of the session-scoped cart API, with trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the configured pieces do not
    /// join into a valid URL.
    pub fn cart_url(&self) -> Result<Url, ConfigError> {
        self.join_base(&format!("{CART_API_PATH}/"))
    }

    /// Root of the auth endpoints, with trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the configured pieces do not
    /// join into a valid URL.
    pub fn auth_api_url(&self) -> Result<Url, ConfigError> {
        self.auth_url
            .join(&format!("{AUTH_API_PATH}/"))
            .map_err(|e| invalid_base_url(&self.auth_url, &e))
    }

    fn join_base(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path)
            .map_err(|e| invalid_base_url(&self.base_url, &e))
    }
}

fn invalid_base_url(url: &Url, err: &url::ParseError) -> ConfigError {
    ConfigError::InvalidBaseUrl(url.as_str().to_string(), err.to_string())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate the backend base URL.
///
/// Only absolute http(s) URLs with a host are serviceable; anything else is a
/// fatal configuration error.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidBaseUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(
            raw.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(
            raw.to_string(),
            "missing host".to_string(),
        ));
    }

    Ok(url)
}
