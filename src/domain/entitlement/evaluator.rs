//! Entitlement evaluation against the plan allow-list.

use super::{EntitlementDecision, PlanAllowList};
use crate::domain::identity::IdentityClaims;

/// Computes the entitlement decision for a resolved identity.
///
/// Pure and synchronous: both flags are functions of the claims and the
/// configured allow-list alone.
#[derive(Debug, Clone)]
pub struct EntitlementEvaluator {
    allow_list: PlanAllowList,
}

impl EntitlementEvaluator {
    /// Creates an evaluator over a custom allow-list.
    pub fn new(allow_list: PlanAllowList) -> Self {
        Self { allow_list }
    }

    /// Creates an evaluator over the maintained list of known plans.
    pub fn with_known_plans() -> Self {
        Self::new(PlanAllowList::default())
    }

    /// Evaluates the claims.
    ///
    /// `is_subscriber` mirrors the strict subscriber flag;
    /// `is_entitled` is true when the purchased plans intersect the
    /// allow-list under exact string equality.
    pub fn evaluate(&self, claims: &IdentityClaims) -> EntitlementDecision {
        let is_subscriber = claims.is_subscriber();
        let is_entitled = self.allow_list.matches_any(claims.plan_ids());

        tracing::debug!(
            subject = claims.subject(),
            is_subscriber,
            is_entitled,
            "Evaluated entitlement"
        );

        EntitlementDecision {
            is_subscriber,
            is_entitled,
        }
    }
}

impl Default for EntitlementEvaluator {
    fn default() -> Self {
        Self::with_known_plans()
    }
}
