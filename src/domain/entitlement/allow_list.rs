//! Allow-list of entitlement-plan identifiers.

use once_cell::sync::Lazy;

/// Plan identifiers that currently grant full content access.
///
/// Maintained by the subscriptions team; order is irrelevant, membership
/// is everything.
pub const DEFAULT_PLAN_IDS: &[&str] = &[
    "catholic-herald-digital-only",
    "catholic-herald-print-and-digital",
    "catholic-herald-premium-digital",
];

static KNOWN_PLANS: Lazy<PlanAllowList> = Lazy::new(|| PlanAllowList::new(DEFAULT_PLAN_IDS.iter().copied()));

/// Static set of plan identifiers checked by exact, case-sensitive string
/// equality.
///
/// An earlier revision of the entitlement rule matched plan prefixes; that
/// behavior granted access to look-alike plan ids and is superseded. Exact
/// membership is the authoritative semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanAllowList {
    plan_ids: Vec<String>,
}

impl PlanAllowList {
    /// Creates an allow-list from the given identifiers.
    pub fn new<I, S>(plan_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            plan_ids: plan_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The maintained list of known entitled plans.
    pub fn known_plans() -> &'static PlanAllowList {
        &KNOWN_PLANS
    }

    /// Exact membership test. No prefix, suffix, or case-folding matches.
    pub fn contains(&self, plan_id: &str) -> bool {
        self.plan_ids.iter().any(|known| known == plan_id)
    }

    /// Returns true if any of the given plan ids is allow-listed.
    pub fn matches_any<'a, I>(&self, plan_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        plan_ids.into_iter().any(|id| self.contains(id))
    }

    /// Number of allow-listed plans.
    pub fn len(&self) -> usize {
        self.plan_ids.len()
    }

    /// Returns true if no plans are allow-listed.
    pub fn is_empty(&self) -> bool {
        self.plan_ids.is_empty()
    }
}

impl Default for PlanAllowList {
    fn default() -> Self {
        Self::known_plans().clone()
    }
}
