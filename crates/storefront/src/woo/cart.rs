//! Session-scoped cart client.
//!
//! The cart API lives on its own base path and identifies the shopper with
//! a session cookie, never with the catalog key/secret credentials. Cart
//! state is mutable on the backend, so nothing here touches the response
//! cache.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use selectura_core::ProductId;

use crate::config::StoreConfig;

use super::WooError;
use super::types::Cart;

/// Client for the cookie-authenticated cart endpoints.
///
/// Holds its own HTTP client with a cookie store, so the backend's session
/// cookie set on the first request identifies the cart on every following
/// one.
#[derive(Clone)]
pub struct CartClient {
    inner: Arc<CartClientInner>,
}

struct CartClientInner {
    http: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for CartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CartClient {
    /// Create a new cart client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL does not resolve to a
    /// valid cart API root, or the HTTP client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, WooError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            inner: Arc::new(CartClientInner {
                http,
                base_url: config.cart_url()?,
            }),
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<T, WooError> {
        let url = self.inner.base_url.join(endpoint)?;

        let mut request = self
            .inner
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(WooError::Api {
                status: status.as_u16(),
                message: text.chars().take(500).collect(),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get the current session's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails; the error is logged here
    /// before propagating.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Cart, WooError> {
        self.request(Method::GET, "cart", None)
            .await
            .inspect_err(|error| tracing::error!(%error, "failed to fetch cart"))
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the line (e.g. out of
    /// stock) or the request fails; the error is logged here before
    /// propagating.
    #[instrument(skip(self), fields(product = %product_id, quantity))]
    pub async fn add_item(&self, product_id: ProductId, quantity: u32) -> Result<Cart, WooError> {
        self.request(
            Method::POST,
            "cart/add-item",
            Some(&json!({ "id": product_id, "quantity": quantity })),
        )
        .await
        .inspect_err(|error| tracing::error!(%error, product = %product_id, "failed to add item to cart"))
    }

    /// Change the quantity of a cart line, addressed by its opaque key.
    ///
    /// # Errors
    ///
    /// Returns an error if the line key is unknown or the request fails;
    /// the error is logged here before propagating.
    #[instrument(skip(self), fields(key = %key, quantity))]
    pub async fn update_item(&self, key: &str, quantity: u32) -> Result<Cart, WooError> {
        self.request(
            Method::POST,
            "cart/update-item",
            Some(&json!({ "key": key, "quantity": quantity })),
        )
        .await
        .inspect_err(|error| tracing::error!(%error, key, "failed to update cart item"))
    }

    /// Remove a cart line, addressed by its opaque key.
    ///
    /// # Errors
    ///
    /// Returns an error if the line key is unknown or the request fails;
    /// the error is logged here before propagating.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn remove_item(&self, key: &str) -> Result<Cart, WooError> {
        self.request(
            Method::POST,
            "cart/remove-item",
            Some(&json!({ "key": key })),
        )
        .await
        .inspect_err(|error| tracing::error!(%error, key, "failed to remove cart item"))
    }
}
