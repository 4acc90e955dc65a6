//! Surface control - applies the settled session to the page.
//!
//! One synchronous pass over the page controls once resolution settles:
//! login/logout pairs, the username slot, the manage-subscription
//! affordance, the page events, and paywall removal when the entitlement
//! decision grants a bypass. Click handlers for login, logout, and the
//! billing portal live here too; their collaborator faults are logged and
//! swallowed so a dead backend never breaks the page.

use std::sync::Arc;

use crate::application::session_resolver::ResolvedIdentity;
use crate::domain::entitlement::{EntitlementDecision, EntitlementEvaluator};
use crate::ports::{
    auth_control_pairs, BillingPortal, Control, IdentityProvider, PageEvent, PageEvents,
    PageSurface, TokenStore,
};

/// Applies session state to the page surface and handles the auth clicks.
pub struct SurfaceController {
    surface: Arc<dyn PageSurface>,
    events: Arc<dyn PageEvents>,
    portal: Arc<dyn BillingPortal>,
    provider: Arc<dyn IdentityProvider>,
    token_store: Arc<dyn TokenStore>,
    evaluator: EntitlementEvaluator,
}

impl SurfaceController {
    pub fn new(
        surface: Arc<dyn PageSurface>,
        events: Arc<dyn PageEvents>,
        portal: Arc<dyn BillingPortal>,
        provider: Arc<dyn IdentityProvider>,
        token_store: Arc<dyn TokenStore>,
        evaluator: EntitlementEvaluator,
    ) -> Self {
        Self {
            surface,
            events,
            portal,
            provider,
            token_store,
            evaluator,
        }
    }

    /// One pass over the page for a settled session.
    ///
    /// Dispatches `session-ready` first, then exactly one of
    /// `entitled`/`not-entitled`. The paywall widget is removed only on the
    /// entitled path; anonymous viewers get the not-entitled decision
    /// without evaluation.
    pub fn apply(&self, identity: Option<&ResolvedIdentity>) -> EntitlementDecision {
        let signed_in = identity.is_some();

        for pair in auth_control_pairs() {
            self.surface.set_visible(pair.login, !signed_in);
            self.surface.set_visible(pair.logout, signed_in);
        }

        let display_name = identity.and_then(|i| i.claims.display_name());
        match display_name {
            Some(name) => {
                self.surface.set_text(Control::UsernameSlot, name);
                self.surface.set_visible(Control::UsernameSlot, true);
            }
            None => self.surface.set_visible(Control::UsernameSlot, false),
        }

        let has_customer = identity.and_then(|i| i.claims.customer_id()).is_some();
        self.surface
            .set_visible(Control::ManageSubscription, has_customer);

        self.events.dispatch(PageEvent::SessionReady);

        let decision = match identity {
            Some(identity) => self.evaluator.evaluate(&identity.claims),
            None => EntitlementDecision::none(),
        };

        if decision.grants_bypass() {
            self.surface.remove_paywall_widget();
            self.events.dispatch(PageEvent::Entitled);
        } else {
            self.events.dispatch(PageEvent::NotEntitled);
        }

        decision
    }

    /// Client-side redirect, used for callback loads.
    pub fn redirect(&self, to: &str) {
        self.surface.navigate(to);
    }

    /// Login click: hand the browser to the hosted login flow.
    pub async fn login_clicked(&self, return_to: &str) {
        if let Err(error) = self.provider.login_redirect(return_to).await {
            tracing::warn!(error = %error, "Login redirect failed");
        }
    }

    /// Logout click: drop the cached token record, then end the provider
    /// session. The record is cleared first so a failed provider logout
    /// cannot resurrect the local identity on the next load.
    pub async fn logout_clicked(&self, return_to: &str) {
        if let Err(error) = self.token_store.clear() {
            tracing::warn!(error = %error, "Failed to clear token record on logout");
        }
        if let Err(error) = self.provider.logout(return_to).await {
            tracing::warn!(error = %error, "Provider logout failed");
        }
    }

    /// Manage-subscription click: mint a portal session for the signed-in
    /// customer and navigate to it. A viewer without a customer id, or a
    /// portal fault, leaves the page untouched.
    pub async fn open_billing_portal(&self, identity: &ResolvedIdentity, current_url: &str) {
        let Some(customer_id) = identity.claims.customer_id() else {
            tracing::warn!(
                subject = identity.claims.subject(),
                "Manage-subscription clicked without a customer id"
            );
            return;
        };

        match self
            .portal
            .create_portal_session(&customer_id, current_url)
            .await
        {
            Ok(session) => self.surface.navigate(&session.access_url),
            Err(error) => {
                tracing::warn!(error = %error, "Billing portal session failed");
            }
        }
    }
}
