//! Authenticated HTTP client for the catalog/order REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::StoreConfig;

use super::WooError;
use super::cache::{RequestKey, ResponseCache};

/// Default staleness window for read endpoints.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// TTL for write operations: a zero window is never fresh, so responses are
/// stored but never served from cache.
pub const NO_CACHE: Duration = Duration::ZERO;

/// Truncation limit for backend error bodies carried in [`WooError::Api`].
const ERROR_BODY_LIMIT: usize = 500;

// =============================================================================
// WooClient
// =============================================================================

/// Client for the authenticated commerce REST API.
///
/// Builds key/secret-authenticated request URLs, decodes JSON responses, and
/// consults the in-process response cache before touching the network.
/// Cheaply cloneable; clones share the underlying HTTP pool and cache.
#[derive(Clone)]
pub struct WooClient {
    inner: Arc<WooClientInner>,
}

struct WooClientInner {
    http: reqwest::Client,
    rest_url: Url,
    consumer_key: String,
    consumer_secret: SecretString,
    cache: ResponseCache,
}

impl std::fmt::Debug for WooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooClient")
            .field("rest_url", &self.inner.rest_url.as_str())
            .field("cache", &self.inner.cache)
            .finish_non_exhaustive()
    }
}

impl WooClient {
    /// Create a new client with a fresh cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL does not resolve to a
    /// valid REST root.
    pub fn new(config: &StoreConfig) -> Result<Self, WooError> {
        Self::with_cache(config, ResponseCache::new())
    }

    /// Create a new client around an existing cache.
    ///
    /// The cache is construction-injected so tests can drive freshness with
    /// a manual clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL does not resolve to a
    /// valid REST root.
    pub fn with_cache(config: &StoreConfig, cache: ResponseCache) -> Result<Self, WooError> {
        Ok(Self {
            inner: Arc::new(WooClientInner {
                http: reqwest::Client::new(),
                rest_url: config.rest_url()?,
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                cache,
            }),
        })
    }

    /// Build the fully-qualified, authenticated URL for an endpoint.
    ///
    /// `endpoint` is a relative path with optional query (e.g.
    /// `products?featured=true`); the consumer key/secret pair is appended
    /// to whatever query is already present.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, WooError> {
        let mut url = self.inner.rest_url.join(endpoint)?;
        url.query_pairs_mut()
            .append_pair("consumer_key", &self.inner.consumer_key)
            .append_pair(
                "consumer_secret",
                self.inner.consumer_secret.expose_secret(),
            )
            .finish();
        Ok(url)
    }

    /// Execute a request against the catalog/order API.
    ///
    /// Consults the cache first; on a miss, performs the fetch and stores
    /// the decoded body - timestamped at completion - whether or not any
    /// read will ever want it (writes pass [`NO_CACHE`] and simply never
    /// get a fresh hit).
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        cache_ttl: Duration,
    ) -> Result<T, WooError> {
        let url = self.endpoint_url(endpoint)?;
        let key = RequestKey::new(method.as_str(), url.as_str(), body);

        if let Some(cached) = self.inner.cache.get(&key, cache_ttl) {
            debug!(endpoint, "cache hit");
            return Ok(serde_json::from_value(cached)?);
        }

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
            tracing::error!(
                status = %status,
                endpoint,
                body = %text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "commerce API returned non-success status"
            );
            return Err(WooError::Api {
                status: status.as_u16(),
                message: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let value: Value = serde_json::from_str(&text)?;
        let decoded = serde_json::from_value(value.clone())?;
        self.inner.cache.insert(key, value);

        Ok(decoded)
    }

    /// GET an endpoint with the given staleness window.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        cache_ttl: Duration,
    ) -> Result<T, WooError> {
        self.request(Method::GET, endpoint, None, cache_ttl).await
    }

    /// POST to an endpoint; the response is never served from cache.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<T, WooError> {
        self.request(Method::POST, endpoint, Some(body), NO_CACHE)
            .await
    }

    /// Drop every cached response under an endpoint prefix.
    ///
    /// Resolves `endpoint` (e.g. `products`) against the REST root and
    /// removes entries whose URL starts with the result; entries for other
    /// endpoints are untouched. Not called automatically after mutations -
    /// callers opt in.
    pub fn invalidate_endpoint(&self, endpoint: &str) -> usize {
        match self.inner.rest_url.join(endpoint) {
            Ok(url) => self.inner.cache.invalidate_prefix(url.as_str()),
            Err(_) => 0,
        }
    }

    /// Number of responses currently held by the cache (fresh or stale).
    #[must_use]
    pub fn cached_responses(&self) -> usize {
        self.inner.cache.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client() -> WooClient {
        let config = StoreConfig::new(
            Url::parse("https://shop.example.com").unwrap(),
            "ck_test".to_string(),
            SecretString::from("cs_test"),
        );
        WooClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_url_appends_credentials() {
        let url = client().endpoint_url("products").unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example.com/wp-json/wc/v3/products?consumer_key=ck_test&consumer_secret=cs_test"
        );
    }

    #[test]
    fn test_endpoint_url_preserves_existing_query() {
        let url = client()
            .endpoint_url("products?featured=true&per_page=8")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example.com/wp-json/wc/v3/products?featured=true&per_page=8&consumer_key=ck_test&consumer_secret=cs_test"
        );
    }

    #[test]
    fn test_endpoint_url_handles_subresources() {
        let url = client().endpoint_url("products/42/reviews").unwrap();
        assert!(
            url.as_str()
                .starts_with("https://shop.example.com/wp-json/wc/v3/products/42/reviews?")
        );
    }

    #[test]
    fn test_invalidate_endpoint_on_empty_cache() {
        assert_eq!(client().invalidate_endpoint("products"), 0);
    }
}
