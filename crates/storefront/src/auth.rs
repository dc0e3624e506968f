//! Same-origin authentication client.
//!
//! Two endpoints - login and register - POSTed as JSON. The collaborator
//! behind them owns session establishment and cookie issuance; this client
//! only reports whether the backend accepted the credentials. Rejections
//! arrive as a 200 with an `error` string in the payload, so both the HTTP
//! status and the payload are inspected.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::StoreConfig;

/// Errors that can occur during login or registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text (truncated).
        message: String,
    },

    /// The backend rejected the credentials or registration data.
    #[error("{0}")]
    Rejected(String),

    /// The response carried neither a user nor an error.
    #[error("Malformed auth response")]
    Malformed,

    /// Client-side configuration problem.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Authenticated user as reported by the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// Raw auth endpoint payload: a success carries `user`, a rejection
/// carries `error`.
#[derive(Debug, Deserialize)]
struct AuthPayload {
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the login/register endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured auth URL is invalid or the HTTP
    /// client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: config.auth_api_url()?,
        })
    }

    /// Log a customer in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the backend's message if the
    /// credentials are refused, or another error if the request fails.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        self.post("login", credentials).await
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the backend's message if the
    /// registration is refused, or another error if the request fails.
    pub async fn register(&self, registration: &Registration) -> Result<AuthUser, AuthError> {
        self.post("register", registration).await
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<AuthUser, AuthError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|_| AuthError::Malformed)?;

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message: String = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, endpoint, "auth endpoint returned non-success status");
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: message.chars().take(500).collect(),
            });
        }

        let payload: AuthPayload = response.json().await?;
        if let Some(error) = payload.error {
            tracing::warn!(endpoint, error = %error, "auth request rejected");
            return Err(AuthError::Rejected(error));
        }

        payload.user.ok_or(AuthError::Malformed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_payload_decodes_success() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{"user":{"id":7,"email":"user@example.com","display_name":"User"}}"#,
        )
        .unwrap();
        assert!(payload.error.is_none());
        assert_eq!(payload.user.unwrap().id, 7);
    }

    #[test]
    fn test_auth_payload_decodes_rejection() {
        let payload: AuthPayload =
            serde_json::from_str(r#"{"error":"Invalid credentials"}"#).unwrap();
        assert_eq!(payload.error.as_deref(), Some("Invalid credentials"));
        assert!(payload.user.is_none());
    }

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::Rejected("Invalid credentials".to_string());
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
