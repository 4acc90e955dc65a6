//! Identity provider port.
//!
//! The provider (an Auth0-style hosted login) is opaque to the core: the
//! crate only ever sees this capability set. Redirect URIs are stable per
//! environment and the callback route is a fixed, configured path.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::PageLocation;
use crate::domain::identity::IdentityClaims;

/// Faults at the provider boundary.
///
/// All of these are caught at the call site, logged, and downgraded to
/// "no identity" - they must never break page rendering.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The session query failed (network, SDK initialization, etc.).
    #[error("Provider session unavailable: {0}")]
    SessionUnavailable(String),

    /// A session exists but the claims could not be fetched.
    #[error("Provider claims unavailable: {0}")]
    ClaimsUnavailable(String),

    /// The authorization-code exchange on the callback route failed.
    #[error("Callback exchange failed: {0}")]
    CallbackFailed(String),

    /// Starting the login or logout redirect failed.
    #[error("Provider redirect failed: {0}")]
    RedirectFailed(String),
}

/// Result of completing an authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallbackExchange {
    /// Caller-supplied return path carried through the provider's
    /// application state, if any.
    pub return_to: Option<String>,
}

/// Capability set of the identity provider collaborator.
///
/// # Contract
///
/// Implementations must:
/// - Report an active session only when claims can subsequently be fetched
/// - Complete the code exchange exactly once per callback load
/// - Honor the return target passed to `login_redirect` and `logout`
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns true if the provider currently holds an active session.
    async fn has_active_session(&self) -> Result<bool, ProviderError>;

    /// Fetches the claims for the active session.
    async fn get_claims(&self) -> Result<IdentityClaims, ProviderError>;

    /// Completes the authorization-code exchange for a callback load.
    async fn exchange_callback(
        &self,
        location: &PageLocation,
    ) -> Result<CallbackExchange, ProviderError>;

    /// Starts the hosted login flow, carrying `return_to` so the user
    /// lands back where they started.
    async fn login_redirect(&self, return_to: &str) -> Result<(), ProviderError>;

    /// Ends the provider session, returning the browser to `return_to`.
    async fn logout(&self, return_to: &str) -> Result<(), ProviderError>;
}
