//! Session cart flow: cookie-scoped identity, no key/secret credentials.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::response::{AppendHeaders, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use selectura_core::ProductId;
use selectura_integration_tests::{init_tracing, serve, test_config};
use selectura_storefront::woo::CartClient;

const SESSION_COOKIE: &str = "selectura_cart=9f8e7d6c; Path=/";
const ITEM_KEY: &str = "9bf31c7ff062936a96d3c8bd1f8f2ff3";

#[derive(Default)]
struct CartState {
    cookie_seen: AtomicBool,
    credentials_seen: AtomicBool,
    quantity: AtomicUsize,
}

impl CartState {
    fn observe(&self, headers: &HeaderMap, query: Option<&str>) {
        if headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|cookies| cookies.contains("selectura_cart=9f8e7d6c"))
        {
            self.cookie_seen.store(true, Ordering::SeqCst);
        }
        if query.is_some_and(|q| q.contains("consumer_key")) {
            self.credentials_seen.store(true, Ordering::SeqCst);
        }
    }

    fn cart_json(&self) -> Value {
        let quantity = self.quantity.load(Ordering::SeqCst);
        if quantity == 0 {
            return json!({
                "items": [],
                "items_count": 0,
                "totals": { "total_items": "0.00", "total_price": "0.00", "currency_code": "EUR" }
            });
        }
        json!({
            "items": [{
                "key": ITEM_KEY,
                "id": 42,
                "name": "Linen Shirt",
                "quantity": quantity,
                "prices": { "price": "19.90", "regular_price": "19.90", "sale_price": "" }
            }],
            "items_count": quantity,
            "totals": {
                "total_items": format!("{}.00", quantity * 19),
                "total_price": format!("{}.00", quantity * 19),
                "currency_code": "EUR"
            }
        })
    }
}

fn backend(state: Arc<CartState>) -> Router {
    Router::new()
        .route("/wp-json/wc/store/v1/cart", get(get_cart))
        .route("/wp-json/wc/store/v1/cart/add-item", post(add_item))
        .route("/wp-json/wc/store/v1/cart/update-item", post(update_item))
        .route("/wp-json/wc/store/v1/cart/remove-item", post(remove_item))
        .with_state(state)
}

async fn get_cart(
    State(state): State<Arc<CartState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    state.observe(&headers, query.as_deref());
    (
        AppendHeaders([(SET_COOKIE, SESSION_COOKIE)]),
        Json(state.cart_json()),
    )
}

async fn add_item(
    State(state): State<Arc<CartState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.observe(&headers, query.as_deref());
    assert_eq!(body["id"], 42);
    let quantity = body["quantity"].as_u64().expect("quantity") as usize;
    state.quantity.fetch_add(quantity, Ordering::SeqCst);
    Json(state.cart_json())
}

async fn update_item(
    State(state): State<Arc<CartState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.observe(&headers, query.as_deref());
    assert_eq!(body["key"], ITEM_KEY);
    let quantity = body["quantity"].as_u64().expect("quantity") as usize;
    state.quantity.store(quantity, Ordering::SeqCst);
    Json(state.cart_json())
}

async fn remove_item(
    State(state): State<Arc<CartState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.observe(&headers, query.as_deref());
    assert_eq!(body["key"], ITEM_KEY);
    state.quantity.store(0, Ordering::SeqCst);
    Json(state.cart_json())
}

#[tokio::test]
async fn test_cart_flow_rides_the_session_cookie() {
    init_tracing();
    let state = Arc::new(CartState::default());
    let base = serve(backend(state.clone())).await;
    let client = CartClient::new(&test_config(&base)).expect("cart client");

    // First contact: backend issues the session cookie
    let cart = client.get_cart().await.expect("empty cart");
    assert!(cart.items.is_empty());

    // Add two, then drop to one, then remove
    let cart = client
        .add_item(ProductId::new(42), 2)
        .await
        .expect("add item");
    assert_eq!(cart.items_count, 2);
    assert_eq!(cart.items.first().expect("line").key, ITEM_KEY);

    let cart = client.update_item(ITEM_KEY, 1).await.expect("update item");
    assert_eq!(cart.items_count, 1);

    let cart = client.remove_item(ITEM_KEY).await.expect("remove item");
    assert!(cart.items.is_empty());

    // The cookie issued on first contact identified every later request
    assert!(state.cookie_seen.load(Ordering::SeqCst));
    // Cart routes never carry catalog credentials
    assert!(!state.credentials_seen.load(Ordering::SeqCst));
}
