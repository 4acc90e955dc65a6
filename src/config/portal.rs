//! Billing portal configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Billing portal configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PortalConfig {
    /// Endpoint that mints billing portal sessions
    pub endpoint_url: String,
}

impl PortalConfig {
    /// Validate billing portal configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint_url.is_empty() {
            return Err(ValidationError::MissingRequired("PORTAL_ENDPOINT_URL"));
        }
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("PORTAL_ENDPOINT_URL"));
        }
        Ok(())
    }
}
