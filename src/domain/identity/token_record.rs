//! Locally persisted token record.

use serde::{Deserialize, Serialize};

/// The persisted token set from a successful self-hosted login.
///
/// Owned exclusively by the session resolver: created on login, replaced
/// wholesale on refresh, deleted on logout. No TTL bookkeeping is kept
/// alongside it - the decoded `id_token` expiry is the sole staleness
/// authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

impl TokenRecord {
    /// Creates a new token record.
    pub fn new(
        access_token: impl Into<String>,
        id_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: id_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Builds the replacement record after a refresh.
    ///
    /// Tokens present in the response replace the stored ones; the original
    /// refresh token is retained unless the response supplies a new one.
    pub fn refreshed(&self, renewed: RenewedTokens) -> TokenRecord {
        TokenRecord {
            access_token: renewed.access_token.unwrap_or_else(|| self.access_token.clone()),
            id_token: renewed.id_token,
            refresh_token: renewed
                .refresh_token
                .unwrap_or_else(|| self.refresh_token.clone()),
        }
    }
}

/// Token set returned by the refresh collaborator.
///
/// Only the ID token is guaranteed; the backend may rotate the other two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewedTokens {
    pub id_token: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}
