//! Backend token service HTTP adapter.
//!
//! Implements the `TokenService` port against the backend worker's JSON
//! endpoints: `/auth/login`, `/auth/refresh`, `/auth/forgot-password`.
//! Non-2xx responses are mapped to `ServiceError::Rejected` when the body
//! carries a server-supplied `error` message, otherwise to
//! `ServiceError::Status`.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::domain::identity::{RenewedTokens, TokenRecord};
use crate::ports::{LoginCredentials, ServiceError, TokenService};

/// Default request timeout for all token endpoints.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the backend token service.
pub struct BackendTokenService {
    base_url: String,
    http_client: reqwest::Client,
}

impl BackendTokenService {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends a POST and decodes the response body, applying the shared
    /// non-2xx policy.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(path);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Token service request failed");
                ServiceError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            // The backend reports user-facing failures as {"error": "..."}.
            if let Ok(rejection) = serde_json::from_slice::<ErrorBody>(&bytes) {
                if let Some(message) = rejection.error {
                    tracing::debug!(url = %url, status = status.as_u16(), "Token service rejected request");
                    return Err(ServiceError::Rejected(message));
                }
            }
            tracing::warn!(url = %url, status = status.as_u16(), "Token service returned error status");
            return Err(ServiceError::Status(status.as_u16()));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Token service response was not valid JSON");
            ServiceError::Malformed(e.to_string())
        })
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordBody<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ForgotPasswordResponse {
    message: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl TokenService for BackendTokenService {
    async fn login(&self, credentials: LoginCredentials) -> Result<TokenRecord, ServiceError> {
        let body = LoginBody {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        let response: TokenResponse = self.post_json("auth/login", &body).await?;

        if let Some(message) = response.error {
            return Err(ServiceError::Rejected(message));
        }

        match (response.id_token, response.access_token, response.refresh_token) {
            (Some(id_token), Some(access_token), Some(refresh_token)) => {
                Ok(TokenRecord::new(access_token, id_token, refresh_token))
            }
            _ => Err(ServiceError::MissingToken),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RenewedTokens, ServiceError> {
        let body = RefreshBody { refresh_token };
        let response: TokenResponse = self.post_json("auth/refresh", &body).await?;

        if let Some(message) = response.error {
            return Err(ServiceError::Rejected(message));
        }

        let id_token = response.id_token.ok_or(ServiceError::MissingToken)?;
        Ok(RenewedTokens {
            id_token,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        })
    }

    async fn forgot_password(&self, email: &str) -> Result<String, ServiceError> {
        let body = ForgotPasswordBody { email };
        let response: ForgotPasswordResponse =
            self.post_json("auth/forgot-password", &body).await?;

        if let Some(message) = response.error {
            return Err(ServiceError::Rejected(message));
        }

        response
            .message
            .ok_or_else(|| ServiceError::Malformed("missing confirmation message".into()))
    }
}

impl std::fmt::Debug for BackendTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendTokenService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
