//! Session resolution - runs once per page load.
//!
//! Answers "who is viewing this page" from two sources, in order: an
//! active provider session, then the locally cached token record (with at
//! most one refresh attempt when it is stale). Callback loads short-circuit
//! resolution entirely: the authorization-code exchange is completed and
//! the caller is told where to redirect.
//!
//! Every collaborator fault is caught here, logged, and downgraded to
//! "no identity" so a broken provider or backend never breaks the page.

use std::sync::Arc;

use crate::domain::foundation::{PageLocation, Timestamp};
use crate::domain::identity::{IdentityClaims, TokenRecord};
use crate::ports::{IdentityProvider, TokenService, TokenStore};

/// Where a resolved identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// An active session at the identity provider.
    Provider,
    /// The locally cached token record.
    LocalToken,
}

/// The identity of the current viewer, settled for this page load.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIdentity {
    pub claims: IdentityClaims,
    pub source: IdentitySource,
}

/// Outcome of session resolution for one page load.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// This was a callback load; redirect to the given path and stop.
    /// Nothing else on the page is touched.
    CallbackRedirect { return_to: String },

    /// Resolution settled, with or without an identity.
    Settled(Option<ResolvedIdentity>),
}

/// Resolves the viewer's session once per page load.
pub struct SessionResolver {
    provider: Arc<dyn IdentityProvider>,
    token_service: Arc<dyn TokenService>,
    token_store: Arc<dyn TokenStore>,
    callback_path: String,
}

impl SessionResolver {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        token_service: Arc<dyn TokenService>,
        token_store: Arc<dyn TokenStore>,
        callback_path: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            token_service,
            token_store,
            callback_path: callback_path.into(),
        }
    }

    /// Resolves the session for the given page location.
    pub async fn resolve(&self, location: &PageLocation) -> SessionOutcome {
        self.resolve_at(location, Timestamp::now()).await
    }

    /// Resolution with an explicit clock, so staleness is testable.
    pub async fn resolve_at(&self, location: &PageLocation, now: Timestamp) -> SessionOutcome {
        if self.is_callback_load(location) {
            let return_to = self.complete_callback(location).await;
            return SessionOutcome::CallbackRedirect { return_to };
        }

        if let Some(identity) = self.provider_identity().await {
            return SessionOutcome::Settled(Some(identity));
        }

        SessionOutcome::Settled(self.local_token_identity(now).await)
    }

    fn is_callback_load(&self, location: &PageLocation) -> bool {
        location.path() == self.callback_path && location.has_authorization_response()
    }

    /// Completes the authorization-code exchange and picks the redirect
    /// target: provider application state, then the `return_to` query
    /// parameter, then the site root. A failed exchange still redirects -
    /// the user must never be stranded on the callback route.
    async fn complete_callback(&self, location: &PageLocation) -> String {
        let fallback = location.query_param("return_to").unwrap_or("/").to_string();

        match self.provider.exchange_callback(location).await {
            Ok(exchange) => exchange.return_to.unwrap_or(fallback),
            Err(error) => {
                tracing::warn!(error = %error, "Callback exchange failed, redirecting anyway");
                fallback
            }
        }
    }

    async fn provider_identity(&self) -> Option<ResolvedIdentity> {
        match self.provider.has_active_session().await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(error) => {
                tracing::warn!(error = %error, "Provider session query failed");
                return None;
            }
        }

        match self.provider.get_claims().await {
            Ok(claims) => {
                tracing::debug!(subject = claims.subject(), "Resolved provider session");
                Some(ResolvedIdentity {
                    claims,
                    source: IdentitySource::Provider,
                })
            }
            Err(error) => {
                tracing::warn!(error = %error, "Provider claims fetch failed");
                None
            }
        }
    }

    async fn local_token_identity(&self, now: Timestamp) -> Option<ResolvedIdentity> {
        let record = match self.token_store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(error = %error, "Token store read failed");
                return None;
            }
        };

        let claims = match IdentityClaims::from_id_token(&record.id_token) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::warn!(error = %error, "Stored ID token is malformed, discarding record");
                self.discard_record();
                return None;
            }
        };

        if !claims.is_expired_at(now) {
            tracing::debug!(subject = claims.subject(), "Resolved cached token");
            return Some(ResolvedIdentity {
                claims,
                source: IdentitySource::LocalToken,
            });
        }

        self.refresh_record(record, now).await
    }

    /// The single refresh attempt for a stale record. The merged record is
    /// persisted before the identity is reported, so a reload observes the
    /// renewed tokens.
    async fn refresh_record(&self, record: TokenRecord, now: Timestamp) -> Option<ResolvedIdentity> {
        let renewed = match self.token_service.refresh(&record.refresh_token).await {
            Ok(renewed) => renewed,
            Err(error) => {
                tracing::warn!(error = %error, "Token refresh failed");
                if !error.is_transient() {
                    // A rejected refresh token will never work again.
                    self.discard_record();
                }
                return None;
            }
        };

        let merged = record.refreshed(renewed);

        let claims = match IdentityClaims::from_id_token(&merged.id_token) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::warn!(error = %error, "Refreshed ID token is malformed");
                return None;
            }
        };

        if claims.is_expired_at(now) {
            tracing::warn!("Refreshed ID token is already expired");
            return None;
        }

        if let Err(error) = self.token_store.save(&merged) {
            tracing::warn!(error = %error, "Failed to persist refreshed token record");
        }

        tracing::debug!(subject = claims.subject(), "Resolved refreshed token");
        Some(ResolvedIdentity {
            claims,
            source: IdentitySource::LocalToken,
        })
    }

    fn discard_record(&self) {
        if let Err(error) = self.token_store.clear() {
            tracing::warn!(error = %error, "Failed to clear token record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use crate::adapters::provider::{ProviderCall, ScriptedIdentityProvider};
    use crate::adapters::storage::InMemoryTokenStore;
    use crate::domain::identity::RenewedTokens;
    use crate::ports::{LoginCredentials, ServiceError};

    const CALLBACK_PATH: &str = "/auth/callback";

    fn mint_id_token(subject: &str, exp: i64) -> String {
        encode(
            &Header::default(),
            &json!({ "sub": subject, "exp": exp }),
            &EncodingKey::from_secret(b"test-only"),
        )
        .unwrap()
    }

    fn provider_claims() -> IdentityClaims {
        IdentityClaims::from_value(json!({ "sub": "auth0|provider", "exp": 9_999_999_999_i64 }))
            .unwrap()
    }

    /// `TokenService` double that plays back a scripted refresh response
    /// and counts refresh calls.
    struct ScriptedTokenService {
        refresh_response: Result<RenewedTokens, ServiceError>,
        refresh_calls: AtomicUsize,
    }

    impl ScriptedTokenService {
        fn refreshing_to(renewed: RenewedTokens) -> Self {
            Self {
                refresh_response: Ok(renewed),
                refresh_calls: AtomicUsize::new(0),
            }
        }

        fn refusing(error: ServiceError) -> Self {
            Self {
                refresh_response: Err(error),
                refresh_calls: AtomicUsize::new(0),
            }
        }

        fn unused() -> Self {
            Self::refusing(ServiceError::Unreachable("not scripted".into()))
        }

        fn refresh_call_count(&self) -> usize {
            self.refresh_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenService for ScriptedTokenService {
        async fn login(&self, _credentials: LoginCredentials) -> Result<TokenRecord, ServiceError> {
            Err(ServiceError::Unreachable("login not scripted".into()))
        }

        async fn refresh(&self, _refresh_token: &str) -> Result<RenewedTokens, ServiceError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.refresh_response.clone()
        }

        async fn forgot_password(&self, _email: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Unreachable("forgot-password not scripted".into()))
        }
    }

    struct Fixture {
        provider: Arc<ScriptedIdentityProvider>,
        token_service: Arc<ScriptedTokenService>,
        token_store: Arc<InMemoryTokenStore>,
        resolver: SessionResolver,
    }

    fn fixture(
        provider: ScriptedIdentityProvider,
        token_service: ScriptedTokenService,
        token_store: InMemoryTokenStore,
    ) -> Fixture {
        let provider = Arc::new(provider);
        let token_service = Arc::new(token_service);
        let token_store = Arc::new(token_store);
        let resolver = SessionResolver::new(
            provider.clone(),
            token_service.clone(),
            token_store.clone(),
            CALLBACK_PATH,
        );
        Fixture {
            provider,
            token_service,
            token_store,
            resolver,
        }
    }

    fn settled_identity(outcome: SessionOutcome) -> Option<ResolvedIdentity> {
        match outcome {
            SessionOutcome::Settled(identity) => identity,
            other => panic!("expected settled outcome, got {other:?}"),
        }
    }

    // ════════════════════════════════════════════════════════════════
    // Callback loads
    // ════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn callback_load_redirects_to_provider_state_target() {
        let f = fixture(
            ScriptedIdentityProvider::signed_out().with_callback_return_to("/saved-article"),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::new(),
        );
        let location = PageLocation::new(CALLBACK_PATH)
            .with_query("code", "abc")
            .with_query("state", "xyz")
            .with_query("return_to", "/ignored");

        let outcome = f.resolver.resolve(&location).await;

        assert_eq!(
            outcome,
            SessionOutcome::CallbackRedirect {
                return_to: "/saved-article".into()
            }
        );
        assert_eq!(f.provider.calls(), vec![ProviderCall::CallbackExchanged]);
    }

    #[tokio::test]
    async fn callback_load_falls_back_to_query_then_root() {
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::new(),
        );

        let with_query = PageLocation::new(CALLBACK_PATH)
            .with_query("code", "abc")
            .with_query("state", "xyz")
            .with_query("return_to", "/news");
        assert_eq!(
            f.resolver.resolve(&with_query).await,
            SessionOutcome::CallbackRedirect {
                return_to: "/news".into()
            }
        );

        let bare = PageLocation::new(CALLBACK_PATH)
            .with_query("code", "abc")
            .with_query("state", "xyz");
        assert_eq!(
            f.resolver.resolve(&bare).await,
            SessionOutcome::CallbackRedirect {
                return_to: "/".into()
            }
        );
    }

    #[tokio::test]
    async fn failed_callback_exchange_still_redirects() {
        let f = fixture(
            ScriptedIdentityProvider::signed_out().with_failing_callback("state mismatch"),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::new(),
        );
        let location = PageLocation::new(CALLBACK_PATH)
            .with_query("code", "abc")
            .with_query("state", "xyz")
            .with_query("return_to", "/news");

        assert_eq!(
            f.resolver.resolve(&location).await,
            SessionOutcome::CallbackRedirect {
                return_to: "/news".into()
            }
        );
    }

    #[tokio::test]
    async fn callback_path_without_authorization_response_resolves_normally() {
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::new(),
        );

        let outcome = f.resolver.resolve(&PageLocation::new(CALLBACK_PATH)).await;
        assert_eq!(outcome, SessionOutcome::Settled(None));
    }

    // ════════════════════════════════════════════════════════════════
    // Provider sessions
    // ════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn provider_session_wins_over_cached_token() {
        let cached = TokenRecord::new("at", mint_id_token("auth0|cached", 9_999_999_999), "rt");
        let f = fixture(
            ScriptedIdentityProvider::signed_in(provider_claims()),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::with_record(cached),
        );

        let identity = settled_identity(f.resolver.resolve(&PageLocation::new("/")).await)
            .expect("identity expected");

        assert_eq!(identity.source, IdentitySource::Provider);
        assert_eq!(identity.claims.subject(), "auth0|provider");
        assert_eq!(f.token_service.refresh_call_count(), 0);
    }

    #[tokio::test]
    async fn provider_fault_falls_back_to_cached_token() {
        let cached = TokenRecord::new("at", mint_id_token("auth0|cached", 9_999_999_999), "rt");
        let f = fixture(
            ScriptedIdentityProvider::failing("sdk exploded"),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::with_record(cached),
        );

        let identity = settled_identity(f.resolver.resolve(&PageLocation::new("/")).await)
            .expect("identity expected");

        assert_eq!(identity.source, IdentitySource::LocalToken);
        assert_eq!(identity.claims.subject(), "auth0|cached");
    }

    #[tokio::test]
    async fn no_session_and_no_record_settles_anonymous() {
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::new(),
        );

        let outcome = f.resolver.resolve(&PageLocation::new("/")).await;
        assert_eq!(outcome, SessionOutcome::Settled(None));
    }

    // ════════════════════════════════════════════════════════════════
    // Cached token and refresh
    // ════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn fresh_cached_token_resolves_without_network() {
        let cached = TokenRecord::new("at", mint_id_token("auth0|cached", 2000), "rt");
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::with_record(cached.clone()),
        );

        let outcome = f
            .resolver
            .resolve_at(&PageLocation::new("/"), Timestamp::from_unix_secs(1000))
            .await;
        let identity = settled_identity(outcome).expect("identity expected");

        assert_eq!(identity.source, IdentitySource::LocalToken);
        assert_eq!(f.token_service.refresh_call_count(), 0);
        assert!(f.token_store.saves().is_empty());
        assert_eq!(f.token_store.current(), Some(cached));
    }

    #[tokio::test]
    async fn stale_token_refreshes_exactly_once_and_persists_merged_record() {
        let stale = TokenRecord::new("at-old", mint_id_token("auth0|cached", 1000), "rt-old");
        let renewed_id = mint_id_token("auth0|cached", 3000);
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::refreshing_to(RenewedTokens {
                id_token: renewed_id.clone(),
                access_token: Some("at-new".into()),
                refresh_token: None,
            }),
            InMemoryTokenStore::with_record(stale),
        );

        let outcome = f
            .resolver
            .resolve_at(&PageLocation::new("/"), Timestamp::from_unix_secs(2000))
            .await;
        let identity = settled_identity(outcome).expect("identity expected");

        assert_eq!(identity.source, IdentitySource::LocalToken);
        assert_eq!(f.token_service.refresh_call_count(), 1);

        // Merged record persisted: new tokens where supplied, original
        // refresh token retained.
        let expected = TokenRecord::new("at-new", renewed_id, "rt-old");
        assert_eq!(f.token_store.saves(), vec![expected.clone()]);
        assert_eq!(f.token_store.current(), Some(expected));
    }

    #[tokio::test]
    async fn rejected_refresh_discards_record() {
        let stale = TokenRecord::new("at", mint_id_token("auth0|cached", 1000), "rt");
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::refusing(ServiceError::Rejected("invalid grant".into())),
            InMemoryTokenStore::with_record(stale),
        );

        let outcome = f
            .resolver
            .resolve_at(&PageLocation::new("/"), Timestamp::from_unix_secs(2000))
            .await;

        assert_eq!(outcome, SessionOutcome::Settled(None));
        assert_eq!(f.token_store.current(), None);
    }

    #[tokio::test]
    async fn transient_refresh_failure_keeps_record() {
        let stale = TokenRecord::new("at", mint_id_token("auth0|cached", 1000), "rt");
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::refusing(ServiceError::Unreachable("refused".into())),
            InMemoryTokenStore::with_record(stale.clone()),
        );

        let outcome = f
            .resolver
            .resolve_at(&PageLocation::new("/"), Timestamp::from_unix_secs(2000))
            .await;

        assert_eq!(outcome, SessionOutcome::Settled(None));
        assert_eq!(f.token_store.current(), Some(stale));
    }

    #[tokio::test]
    async fn malformed_stored_token_is_discarded() {
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::unused(),
            InMemoryTokenStore::with_record(TokenRecord::new("at", "not-a-jwt", "rt")),
        );

        let outcome = f.resolver.resolve(&PageLocation::new("/")).await;

        assert_eq!(outcome, SessionOutcome::Settled(None));
        assert_eq!(f.token_store.current(), None);
        assert_eq!(f.token_service.refresh_call_count(), 0);
    }

    #[tokio::test]
    async fn failed_persist_still_reports_refreshed_identity() {
        let stale = TokenRecord::new("at", mint_id_token("auth0|cached", 1000), "rt");
        let f = fixture(
            ScriptedIdentityProvider::signed_out(),
            ScriptedTokenService::refreshing_to(RenewedTokens {
                id_token: mint_id_token("auth0|cached", 3000),
                access_token: None,
                refresh_token: None,
            }),
            InMemoryTokenStore::failing_writes_with(stale),
        );

        let outcome = f
            .resolver
            .resolve_at(&PageLocation::new("/"), Timestamp::from_unix_secs(2000))
            .await;
        let identity = settled_identity(outcome).expect("identity expected");

        assert_eq!(identity.claims.subject(), "auth0|cached");
    }
}
