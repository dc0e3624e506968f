//! Login/register payload handling against the same-origin auth endpoints.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use selectura_integration_tests::{init_tracing, serve, test_config};
use selectura_storefront::auth::{AuthClient, AuthError, Credentials, Registration};

async fn login(Json(body): Json<Value>) -> Json<Value> {
    if body["password"] == "correct-horse" {
        Json(json!({
            "user": { "id": 7, "email": body["email"], "display_name": "Ada" }
        }))
    } else {
        // Rejections come back as 200 with an error string
        Json(json!({ "error": "Invalid credentials" }))
    }
}

async fn register(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "user": { "id": 8, "email": body["email"], "display_name": body["first_name"] }
    }))
}

fn backend() -> Router {
    Router::new()
        .route("/wp-json/selectura/v1/auth/login", post(login))
        .route("/wp-json/selectura/v1/auth/register", post(register))
}

#[tokio::test]
async fn test_login_success_returns_user() {
    init_tracing();
    let base = serve(backend()).await;
    let client = AuthClient::new(&test_config(&base)).expect("auth client");

    let user = client
        .login(&Credentials {
            email: "ada@example.com".to_string(),
            password: "correct-horse".to_string(),
        })
        .await
        .expect("login");

    assert_eq!(user.id, 7);
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn test_login_rejection_carries_backend_message() {
    init_tracing();
    let base = serve(backend()).await;
    let client = AuthClient::new(&test_config(&base)).expect("auth client");

    let err = client
        .login(&Credentials {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .expect_err("must be rejected");

    match err {
        AuthError::Rejected(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_returns_new_user() {
    init_tracing();
    let base = serve(backend()).await;
    let client = AuthClient::new(&test_config(&base)).expect("auth client");

    let user = client
        .register(&Registration {
            email: "new@example.com".to_string(),
            password: "correct-horse".to_string(),
            first_name: "New".to_string(),
            last_name: "Customer".to_string(),
        })
        .await
        .expect("register");

    assert_eq!(user.id, 8);
}
