//! Identity claims decoded from a provider-issued ID token.
//!
//! # Trust boundary
//!
//! Claims from a locally cached token are decoded **without** signature
//! verification. The token was signature-verified by the backend token
//! service at issuance/refresh time; re-verifying client-side was never
//! part of the contract and would change failure behavior, so implementers
//! must not add it here. Expiry is likewise not enforced during decoding -
//! the session resolver owns staleness and decides whether to refresh.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::{CustomerId, Timestamp};

/// Claim URI carrying the strict-boolean subscriber flag.
pub const SUBSCRIBER_CLAIM: &str = "https://catholicherald.com/claims/subscriber";

/// Claim URI carrying the purchased plan identifiers.
pub const PLANS_CLAIM: &str = "https://catholicherald.com/claims/plans";

/// Claim URI carrying the billing customer identifier.
pub const CUSTOMER_ID_CLAIM: &str = "https://catholicherald.com/claims/customer_id";

/// Errors raised while decoding a token payload into claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not a structurally valid JWT.
    #[error("Token is not a well-formed JWT: {0}")]
    Malformed(String),

    /// The payload decoded but lacks a claim we require.
    #[error("Token payload is missing the '{0}' claim")]
    MissingClaim(&'static str),
}

/// Claims about the authenticated subject, obtained from either the
/// identity provider or the locally cached ID token.
///
/// Created once per page load by the session resolver and never mutated.
/// The full claims map is retained so late-loading page scripts can read
/// provider-specific claims through [`IdentityClaims::get`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityClaims {
    subject: String,
    expires_at: Timestamp,
    claims: Map<String, Value>,
}

impl IdentityClaims {
    /// Builds claims from a decoded JSON payload.
    ///
    /// Requires `sub` and `exp`; everything else is optional and exposed
    /// through the typed accessors below.
    pub fn from_value(value: Value) -> Result<Self, TokenError> {
        let claims = match value {
            Value::Object(map) => map,
            other => {
                return Err(TokenError::Malformed(format!(
                    "expected object payload, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .ok_or(TokenError::MissingClaim("sub"))?
            .to_string();

        let exp = claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::MissingClaim("exp"))?;

        Ok(Self {
            subject,
            expires_at: Timestamp::from_unix_secs(exp),
            claims,
        })
    }

    /// Decodes the payload of an ID token without verifying its signature.
    ///
    /// See the module docs for why signature and expiry validation are
    /// deliberately disabled here.
    pub fn from_id_token(token: &str) -> Result<Self, TokenError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        Self::from_value(data.claims)
    }

    /// The unique subject identifier from the provider.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The token expiry. Sole authority for local-token staleness.
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Returns true if the expiry is at or before `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        !self.expires_at.is_after(&now)
    }

    /// The subscriber flag. Only a strict boolean `true` counts; absence or
    /// any other value is `false`.
    pub fn is_subscriber(&self) -> bool {
        matches!(self.claims.get(SUBSCRIBER_CLAIM), Some(Value::Bool(true)))
    }

    /// Purchased plan identifiers. A missing or non-array claim yields an
    /// empty list; non-string entries are skipped.
    pub fn plan_ids(&self) -> Vec<&str> {
        match self.claims.get(PLANS_CLAIM) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The billing customer identifier, when the claims carry one.
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.claims
            .get(CUSTOMER_ID_CLAIM)
            .and_then(Value::as_str)
            .and_then(|s| CustomerId::new(s).ok())
    }

    /// The user's display name from the standard `name` claim.
    pub fn display_name(&self) -> Option<&str> {
        self.claims.get("name").and_then(Value::as_str)
    }

    /// Raw access to any claim by name, for late-loading page scripts.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
