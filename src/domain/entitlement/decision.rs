//! Entitlement decision value object.

use serde::Serialize;

/// Outcome of evaluating identity claims against the plan allow-list.
///
/// Derived and transient; recomputed on every page load and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntitlementDecision {
    /// The subscriber claim was strictly `true`.
    pub is_subscriber: bool,

    /// At least one purchased plan id is on the allow-list.
    pub is_entitled: bool,
}

impl EntitlementDecision {
    /// Decision for an anonymous visitor: no subscription, no entitlement.
    pub fn none() -> Self {
        Self::default()
    }

    /// Paywall bypass is granted only when both flags hold.
    ///
    /// The conjunction matters: a customer record can carry a stale
    /// subscriber flag without a currently valid plan id (e.g. after a
    /// plan change), and that combination must not reproduce full access.
    pub fn grants_bypass(&self) -> bool {
        self.is_subscriber && self.is_entitled
    }
}
