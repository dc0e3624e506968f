//! Integration tests for Selectura.
//!
//! Each test file boots an in-process mock of the commerce backend (axum on
//! an ephemeral port) and drives the real clients over HTTP, so caching,
//! invalidation, and session behavior are exercised end to end without
//! external credentials.
//!
//! # Test Categories
//!
//! - `catalog_cache` - response cache TTL/invalidation properties
//! - `checkout_customers` - order creation and the duplicate-email fallback
//! - `cart_session` - cookie-scoped cart operations
//! - `auth_flow` - login/register payload handling

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use secrecy::SecretString;
use url::Url;

use selectura_storefront::config::StoreConfig;
use selectura_storefront::woo::Clock;

/// Test consumer key; mock handlers assert its presence on catalog routes.
pub const TEST_CONSUMER_KEY: &str = "ck_test";

/// Test consumer secret.
pub const TEST_CONSUMER_SECRET: &str = "cs_test";

/// Serve a router on an ephemeral localhost port and return its base URL.
pub async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });

    Url::parse(&format!("http://{addr}/")).expect("mock backend URL")
}

/// Configuration pointing every client at the mock backend.
#[must_use]
pub fn test_config(base_url: &Url) -> StoreConfig {
    StoreConfig::new(
        base_url.clone(),
        TEST_CONSUMER_KEY.to_string(),
        SecretString::from(TEST_CONSUMER_SECRET),
    )
}

/// Manually advanced clock for driving cache TTLs without sleeping.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    /// Shared handle starting at time zero.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Advance the clock.
    pub fn advance(&self, millis: u64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
