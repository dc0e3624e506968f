//! WooCommerce REST API clients.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local sync, direct API calls
//! - Catalog/order endpoints are authenticated with consumer key/secret
//!   query parameters; the cart API is session-scoped via cookies
//! - Responses are cached in-process with a per-request TTL (5 minute
//!   default for reads, zero for writes)
//!
//! # APIs
//!
//! ## Catalog API
//! - Products, categories, reviews, shipping, payment gateways
//! - Read-through cached, key/secret authenticated
//!
//! ## Checkout API
//! - Orders and customers
//! - Writes bypass the cache entirely
//!
//! ## Cart API
//! - Session-scoped line items, identified by a browser cookie
//! - Separate base path, never authenticated with key/secret
//!
//! # Example
//!
//! ```rust,ignore
//! use selectura_storefront::config::StoreConfig;
//! use selectura_storefront::woo::WooClient;
//!
//! let client = WooClient::new(&StoreConfig::from_env()?)?;
//!
//! // Get a product
//! let product = client.get_product_by_slug("linen-shirt").await?;
//!
//! // Reviews for it
//! let reviews = client.get_product_reviews(product.id).await?;
//! ```

mod cache;
mod cart;
mod catalog;
mod checkout;
mod client;
pub mod helpers;
pub mod types;

pub use cache::{Clock, RequestKey, ResponseCache, SystemClock};
pub use cart::CartClient;
pub use checkout::CreatedCustomer;
pub use client::{DEFAULT_CACHE_TTL, NO_CACHE, WooClient};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the commerce backend.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text (truncated).
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Endpoint path did not resolve to a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Client-side configuration problem.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl WooError {
    /// Whether the backend rejected a customer creation because the email
    /// address is already registered.
    #[must_use]
    pub fn is_duplicate_email(&self) -> bool {
        match self {
            Self::Api { message, .. } => {
                message.contains("registration-error-email-exists")
                    || message.contains("already registered")
            }
            _ => false,
        }
    }
}
