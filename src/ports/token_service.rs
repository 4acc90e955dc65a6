//! Backend token service port.
//!
//! The backend worker that fronts the provider's password grant. Three
//! opaque JSON endpoints: login, refresh, and forgot-password. Non-2xx or
//! missing-token responses are failures.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::identity::{RenewedTokens, TokenRecord};

/// Faults at the token service boundary.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The service could not be reached at all.
    #[error("Token service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-2xx status and no error message.
    #[error("Token service returned status {0}")]
    Status(u16),

    /// The service rejected the request with a user-facing message
    /// (e.g. "Invalid credentials").
    #[error("{0}")]
    Rejected(String),

    /// A 2xx response that did not include the expected tokens.
    #[error("Token service response did not include the expected tokens")]
    MissingToken,

    /// The response body could not be parsed.
    #[error("Token service response was malformed: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// Returns true if a retry might succeed without user action.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ServiceError::Unreachable(_) | ServiceError::Status(500..=599)
        )
    }

    /// Message suitable for rendering in the sign-in form's error area.
    ///
    /// Only server-supplied rejections are shown verbatim; everything else
    /// collapses to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Rejected(message) => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Validated sign-in credentials.
///
/// Construction is the validation seam: empty fields never reach the
/// network. The password is wrapped so it cannot leak through `Debug`.
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl LoginCredentials {
    /// Validates and builds credentials.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        let password = password.into();
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self {
            email,
            password: SecretString::new(password),
        })
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Backend token service collaborator.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Exchanges credentials for a full token record.
    async fn login(&self, credentials: LoginCredentials) -> Result<TokenRecord, ServiceError>;

    /// Renews a stale token set. Only the ID token is guaranteed in the
    /// response; the caller merges it into the stored record.
    async fn refresh(&self, refresh_token: &str) -> Result<RenewedTokens, ServiceError>;

    /// Requests a password-reset email, returning the confirmation message.
    async fn forgot_password(&self, email: &str) -> Result<String, ServiceError>;
}
