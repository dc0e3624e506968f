//! TTL response cache for commerce API requests.
//!
//! A best-effort, process-scoped read-through cache: it collapses duplicate
//! reads within one request lifecycle or short-lived process, nothing more.
//! Entries are never actively purged - a stale entry is ignored at read time
//! and overwritten by the next successful fetch. There is no cross-process
//! coordination and no in-flight coalescing; two concurrent identical
//! requests may both fetch, and the second write wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

/// Source of "now" for freshness checks.
///
/// Injected so TTL behavior can be tested with a manual clock instead of
/// sleeping.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}

/// Identity of a request: method, fully-qualified URL, canonical JSON body.
///
/// The body is canonicalized through `serde_json::Value`, whose object maps
/// keep keys sorted, so two semantically identical bodies produce the same
/// key regardless of field order at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    method: String,
    url: String,
    body: Option<String>,
}

impl RequestKey {
    /// Build a key from the request's method, full URL, and optional body.
    #[must_use]
    pub fn new(method: &str, url: &str, body: Option<&Value>) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            body: body.and_then(|value| serde_json::to_string(value).ok()),
        }
    }

    /// The fully-qualified request URL this key was built from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A cached response with its storage timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    /// Epoch milliseconds at the moment the response was stored.
    stored_at: u64,
}

/// In-process response cache keyed by request identity.
pub struct ResponseCache {
    entries: Mutex<HashMap<RequestKey, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Create a cache backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Look up a fresh entry.
    ///
    /// An entry is fresh iff `now - stored_at < ttl`; a zero TTL can never
    /// be satisfied, which is how write operations opt out of cache reads.
    /// Stale entries are left in place for the next fetch to overwrite.
    #[must_use]
    pub fn get(&self, key: &RequestKey, ttl: Duration) -> Option<Value> {
        let now = self.clock.now_millis();
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let entries = self.lock();
        let entry = entries.get(key)?;
        if now.saturating_sub(entry.stored_at) < ttl_millis {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    /// Store a response, overwriting any previous entry for the key and
    /// stamping it with the current time.
    pub fn insert(&self, key: RequestKey, data: Value) {
        let stored_at = self.clock.now_millis();
        self.lock().insert(key, CacheEntry { data, stored_at });
    }

    /// Remove every entry whose URL starts with `url_prefix`.
    ///
    /// Returns the number of entries removed. Entries for unrelated
    /// endpoints are untouched.
    pub fn invalidate_prefix(&self, url_prefix: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.url.starts_with(url_prefix));
        before - entries.len()
    }

    /// Number of entries currently stored, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RequestKey, CacheEntry>> {
        // The map is only ever touched under this lock and no panic can
        // happen while it is held, so a poisoned lock still has a usable map.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use serde_json::json;

    use super::*;

    /// Test clock advanced by hand.
    #[derive(Debug, Default)]
    pub(crate) struct ManualClock(AtomicU64);

    impl ManualClock {
        pub(crate) fn advance(&self, millis: u64) {
            self.0.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    const TTL: Duration = Duration::from_secs(300);

    fn products_key() -> RequestKey {
        RequestKey::new(
            "GET",
            "https://shop.example.com/wp-json/wc/v3/products?per_page=8",
            None,
        )
    }

    #[test]
    fn test_hit_within_ttl() {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::with_clock(clock.clone());

        cache.insert(products_key(), json!([{"id": 1}]));
        clock.advance(299_999);
        assert_eq!(cache.get(&products_key(), TTL), Some(json!([{"id": 1}])));
    }

    #[test]
    fn test_stale_after_ttl_but_not_purged() {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::with_clock(clock.clone());

        cache.insert(products_key(), json!([{"id": 1}]));
        clock.advance(300_000);
        assert_eq!(cache.get(&products_key(), TTL), None);
        // Ignored, not evicted
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_never_fresh() {
        let cache = ResponseCache::with_clock(Arc::new(ManualClock::default()));
        cache.insert(products_key(), json!({"ok": true}));
        assert_eq!(cache.get(&products_key(), Duration::ZERO), None);
    }

    #[test]
    fn test_overwrite_refreshes_timestamp() {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::with_clock(clock.clone());

        cache.insert(products_key(), json!("old"));
        clock.advance(400_000);
        cache.insert(products_key(), json!("new"));
        clock.advance(100_000);
        assert_eq!(cache.get(&products_key(), TTL), Some(json!("new")));
    }

    #[test]
    fn test_distinct_bodies_are_distinct_entries() {
        let cache = ResponseCache::new();
        let url = "https://shop.example.com/wp-json/wc/v3/orders";
        let a = RequestKey::new("POST", url, Some(&json!({"total": "10.00"})));
        let b = RequestKey::new("POST", url, Some(&json!({"total": "20.00"})));

        cache.insert(a.clone(), json!(1));
        cache.insert(b.clone(), json!(2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_body_key_is_field_order_independent() {
        let url = "https://shop.example.com/wp-json/wc/v3/orders";
        // serde_json::Value objects sort keys, so these are the same body
        let a = RequestKey::new("POST", url, Some(&json!({"a": 1, "b": 2})));
        let b = RequestKey::new("POST", url, Some(&json!({"b": 2, "a": 1})));
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalidate_prefix_is_scoped() {
        let cache = ResponseCache::new();
        let products = "https://shop.example.com/wp-json/wc/v3/products";
        cache.insert(
            RequestKey::new("GET", &format!("{products}?per_page=8"), None),
            json!([]),
        );
        cache.insert(
            RequestKey::new("GET", &format!("{products}/42"), None),
            json!({}),
        );
        cache.insert(
            RequestKey::new(
                "GET",
                "https://shop.example.com/wp-json/wc/v3/orders?customer=7",
                None,
            ),
            json!([]),
        );

        assert_eq!(cache.invalidate_prefix(products), 2);
        assert_eq!(cache.len(), 1);
        assert!(
            cache
                .get(
                    &RequestKey::new(
                        "GET",
                        "https://shop.example.com/wp-json/wc/v3/orders?customer=7",
                        None,
                    ),
                    TTL,
                )
                .is_some()
        );
    }
}
