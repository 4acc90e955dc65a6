//! Page-load bootstrap.
//!
//! Ties resolution and surface control into the single entry point the
//! page runs once on load: resolve the session, then either redirect (a
//! callback load) or apply the settled state to the surface. The resolved
//! identity stays readable afterwards for late-loading page scripts.

use crate::application::session_resolver::{ResolvedIdentity, SessionOutcome, SessionResolver};
use crate::application::surface_controller::SurfaceController;
use crate::domain::foundation::PageLocation;

/// What a page load ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Callback load: the browser was redirected and nothing else ran.
    Redirected { to: String },

    /// Normal load: the surface was updated for the settled session.
    Applied {
        identity_present: bool,
        paywall_bypassed: bool,
    },
}

/// One page load, run once.
pub struct PageLoad {
    resolver: SessionResolver,
    controller: SurfaceController,
    identity: Option<ResolvedIdentity>,
}

impl PageLoad {
    pub fn new(resolver: SessionResolver, controller: SurfaceController) -> Self {
        Self {
            resolver,
            controller,
            identity: None,
        }
    }

    /// Resolves the session and applies it to the page.
    pub async fn run(&mut self, location: &PageLocation) -> LoadOutcome {
        match self.resolver.resolve(location).await {
            SessionOutcome::CallbackRedirect { return_to } => {
                tracing::info!(return_to = %return_to, "Callback load, redirecting");
                self.controller.redirect(&return_to);
                LoadOutcome::Redirected { to: return_to }
            }
            SessionOutcome::Settled(identity) => {
                self.identity = identity;
                let decision = self.controller.apply(self.identity.as_ref());
                tracing::info!(
                    identity_present = self.identity.is_some(),
                    paywall_bypassed = decision.grants_bypass(),
                    "Page load applied"
                );
                LoadOutcome::Applied {
                    identity_present: self.identity.is_some(),
                    paywall_bypassed: decision.grants_bypass(),
                }
            }
        }
    }

    /// The identity settled by [`PageLoad::run`], for late-loading scripts.
    /// Read-only: the session never changes within a page load.
    pub fn identity(&self) -> Option<&ResolvedIdentity> {
        self.identity.as_ref()
    }

    /// The surface controller, for wiring click handlers after the load.
    pub fn controller(&self) -> &SurfaceController {
        &self.controller
    }
}
