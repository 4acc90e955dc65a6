//! Shared helpers for the integration tests: token minting, claim payload
//! builders, and a scripted token service.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use herald_access::domain::identity::{
    RenewedTokens, TokenRecord, CUSTOMER_ID_CLAIM, PLANS_CLAIM, SUBSCRIBER_CLAIM,
};
use herald_access::domain::foundation::CustomerId;
use herald_access::ports::{
    BillingPortal, LoginCredentials, PortalError, PortalSession, ServiceError, TokenService,
};

/// Expiry far enough out that tokens minted with it never go stale in a
/// test run.
pub const FAR_FUTURE_EXP: i64 = 9_999_999_999;

/// Mints a structurally valid JWT carrying the given payload. The signing
/// key is irrelevant: claims are decoded without verification.
pub fn mint_token(payload: &Value) -> String {
    encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(b"integration-test"),
    )
    .unwrap()
}

/// Payload for an entitled subscriber.
pub fn entitled_subscriber_payload(exp: i64) -> Value {
    json!({
        "sub": "auth0|subscriber",
        "exp": exp,
        "name": "Ada Lovelace",
        SUBSCRIBER_CLAIM: true,
        PLANS_CLAIM: ["catholic-herald-digital-only"],
        CUSTOMER_ID_CLAIM: "cus_42",
    })
}

/// Payload for a signed-in viewer with no subscription.
pub fn plain_viewer_payload(exp: i64) -> Value {
    json!({
        "sub": "auth0|viewer",
        "exp": exp,
        "name": "Grace Hopper",
    })
}

/// Payload for a subscriber whose plan only resembles an entitled one.
pub fn lookalike_plan_payload(exp: i64) -> Value {
    json!({
        "sub": "auth0|lookalike",
        "exp": exp,
        SUBSCRIBER_CLAIM: true,
        PLANS_CLAIM: ["catholic-herald-digital"],
    })
}

/// `TokenService` double for full page-load and form scenarios.
pub struct ScriptedTokenService {
    login_response: Result<TokenRecord, ServiceError>,
    refresh_response: Result<RenewedTokens, ServiceError>,
    forgot_response: Result<String, ServiceError>,
    login_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl ScriptedTokenService {
    /// A service where nothing is scripted; every call fails.
    pub fn unused() -> Self {
        Self {
            login_response: Err(ServiceError::Unreachable("login not scripted".into())),
            refresh_response: Err(ServiceError::Unreachable("refresh not scripted".into())),
            forgot_response: Err(ServiceError::Unreachable("forgot not scripted".into())),
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_login(mut self, response: Result<TokenRecord, ServiceError>) -> Self {
        self.login_response = response;
        self
    }

    pub fn with_refresh(mut self, response: Result<RenewedTokens, ServiceError>) -> Self {
        self.refresh_response = response;
        self
    }

    pub fn with_forgot_password(mut self, response: Result<String, ServiceError>) -> Self {
        self.forgot_response = response;
        self
    }

    pub fn login_call_count(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_call_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenService for ScriptedTokenService {
    async fn login(&self, _credentials: LoginCredentials) -> Result<TokenRecord, ServiceError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_response.clone()
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<RenewedTokens, ServiceError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_response.clone()
    }

    async fn forgot_password(&self, _email: &str) -> Result<String, ServiceError> {
        self.forgot_response.clone()
    }
}

/// `BillingPortal` double playing back one scripted response.
pub struct ScriptedPortal {
    response: Result<PortalSession, PortalError>,
}

impl ScriptedPortal {
    pub fn returning(access_url: &str) -> Self {
        Self {
            response: Ok(PortalSession {
                access_url: access_url.to_string(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Err(PortalError::Status(502)),
        }
    }
}

#[async_trait]
impl BillingPortal for ScriptedPortal {
    async fn create_portal_session(
        &self,
        _customer_id: &CustomerId,
        _redirect_url: &str,
    ) -> Result<PortalSession, PortalError> {
        self.response.clone()
    }
}
