//! Paywall configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::entitlement::PlanAllowList;

/// Paywall configuration
///
/// The allow-list can be overridden per environment as a comma-separated
/// value; when unset, the maintained list of known plans applies.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaywallConfig {
    /// Comma-separated plan ids that grant a paywall bypass
    pub plan_allow_list: Option<String>,
}

impl PaywallConfig {
    /// Get the configured allow-list entries
    pub fn plan_allow_list_entries(&self) -> Vec<String> {
        self.plan_allow_list
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Build the allow-list: the override when configured, otherwise the
    /// maintained list of known plans
    pub fn allow_list(&self) -> PlanAllowList {
        let entries = self.plan_allow_list_entries();
        if entries.is_empty() {
            PlanAllowList::default()
        } else {
            PlanAllowList::new(entries)
        }
    }

    /// Validate paywall configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.plan_allow_list.is_some() && self.plan_allow_list_entries().is_empty() {
            return Err(ValidationError::EmptyAllowList);
        }
        Ok(())
    }
}
