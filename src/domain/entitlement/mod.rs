//! Entitlement domain: the allow-list, the decision pair, and the
//! evaluator that derives one from the other.

mod allow_list;
mod decision;
mod evaluator;

pub use allow_list::{PlanAllowList, DEFAULT_PLAN_IDS};
pub use decision::EntitlementDecision;
pub use evaluator::EntitlementEvaluator;
