//! Scripted identity provider.
//!
//! In-memory implementation of the `IdentityProvider` port. The real
//! provider is an opaque hosted SDK whose protocol is out of scope here;
//! this adapter plays back a configured session state and records every
//! call so tests (and the demo binary) can drive and inspect full page
//! loads without the provider.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::PageLocation;
use crate::domain::identity::IdentityClaims;
use crate::ports::{CallbackExchange, IdentityProvider, ProviderError};

/// A recorded call against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    SessionQueried,
    ClaimsFetched,
    CallbackExchanged,
    LoginRedirect { return_to: String },
    Logout { return_to: String },
}

/// `IdentityProvider` that plays back a configured script.
#[derive(Default)]
pub struct ScriptedIdentityProvider {
    session_claims: Option<IdentityClaims>,
    fault: Option<String>,
    callback_return_to: Option<String>,
    callback_fault: Option<String>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl ScriptedIdentityProvider {
    /// A provider with no active session.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A provider holding an active session with the given claims.
    pub fn signed_in(claims: IdentityClaims) -> Self {
        Self {
            session_claims: Some(claims),
            ..Self::default()
        }
    }

    /// A provider whose session and claims calls fail.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fault: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sets the return path carried through the provider's application
    /// state during a callback exchange.
    pub fn with_callback_return_to(mut self, return_to: impl Into<String>) -> Self {
        self.callback_return_to = Some(return_to.into());
        self
    }

    /// Makes the callback exchange fail.
    pub fn with_failing_callback(mut self, message: impl Into<String>) -> Self {
        self.callback_fault = Some(message.into());
        self
    }

    /// Every call made against this provider, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().expect("provider lock poisoned").clone()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().expect("provider lock poisoned").push(call);
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentityProvider {
    async fn has_active_session(&self) -> Result<bool, ProviderError> {
        self.record(ProviderCall::SessionQueried);
        if let Some(message) = &self.fault {
            return Err(ProviderError::SessionUnavailable(message.clone()));
        }
        Ok(self.session_claims.is_some())
    }

    async fn get_claims(&self) -> Result<IdentityClaims, ProviderError> {
        self.record(ProviderCall::ClaimsFetched);
        if let Some(message) = &self.fault {
            return Err(ProviderError::ClaimsUnavailable(message.clone()));
        }
        self.session_claims
            .clone()
            .ok_or_else(|| ProviderError::ClaimsUnavailable("no active session".into()))
    }

    async fn exchange_callback(
        &self,
        _location: &PageLocation,
    ) -> Result<CallbackExchange, ProviderError> {
        self.record(ProviderCall::CallbackExchanged);
        if let Some(message) = &self.callback_fault {
            return Err(ProviderError::CallbackFailed(message.clone()));
        }
        Ok(CallbackExchange {
            return_to: self.callback_return_to.clone(),
        })
    }

    async fn login_redirect(&self, return_to: &str) -> Result<(), ProviderError> {
        self.record(ProviderCall::LoginRedirect {
            return_to: return_to.to_string(),
        });
        Ok(())
    }

    async fn logout(&self, return_to: &str) -> Result<(), ProviderError> {
        self.record(ProviderCall::Logout {
            return_to: return_to.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims() -> IdentityClaims {
        IdentityClaims::from_value(json!({ "sub": "auth0|abc", "exp": 4_102_444_800_i64 }))
            .unwrap()
    }

    #[tokio::test]
    async fn signed_in_provider_reports_session_and_claims() {
        let provider = ScriptedIdentityProvider::signed_in(claims());
        assert!(provider.has_active_session().await.unwrap());
        assert_eq!(provider.get_claims().await.unwrap().subject(), "auth0|abc");
    }

    #[tokio::test]
    async fn signed_out_provider_has_no_session() {
        let provider = ScriptedIdentityProvider::signed_out();
        assert!(!provider.has_active_session().await.unwrap());
        assert!(provider.get_claims().await.is_err());
    }

    #[tokio::test]
    async fn failing_provider_errors_on_session_query() {
        let provider = ScriptedIdentityProvider::failing("sdk exploded");
        assert!(matches!(
            provider.has_active_session().await,
            Err(ProviderError::SessionUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let provider = ScriptedIdentityProvider::signed_out();
        let _ = provider.has_active_session().await;
        let _ = provider.login_redirect("/news").await;

        assert_eq!(
            provider.calls(),
            vec![
                ProviderCall::SessionQueried,
                ProviderCall::LoginRedirect {
                    return_to: "/news".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn callback_exchange_returns_configured_state() {
        let provider =
            ScriptedIdentityProvider::signed_out().with_callback_return_to("/saved-article");
        let exchange = provider
            .exchange_callback(&PageLocation::new("/auth/callback"))
            .await
            .unwrap();
        assert_eq!(exchange.return_to.as_deref(), Some("/saved-article"));
    }
}
