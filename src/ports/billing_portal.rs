//! Billing portal port.
//!
//! Backend collaborator that mints customer-scoped billing portal
//! sessions. The core only ever navigates to the returned URL; portal
//! faults are logged and never block the rest of the page.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::CustomerId;

/// Faults at the billing portal boundary.
#[derive(Debug, Clone, Error)]
pub enum PortalError {
    /// The portal endpoint could not be reached.
    #[error("Billing portal unreachable: {0}")]
    Unreachable(String),

    /// The portal endpoint answered with a non-2xx status.
    #[error("Billing portal returned status {0}")]
    Status(u16),

    /// The response did not contain a portal session URL.
    #[error("Billing portal response was malformed: {0}")]
    Malformed(String),
}

/// A short-lived portal session the browser can be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSession {
    /// Absolute URL of the customer's billing portal.
    pub access_url: String,
}

/// Billing portal collaborator.
#[async_trait]
pub trait BillingPortal: Send + Sync {
    /// Requests a portal session for the customer; `redirect_url` is where
    /// the portal returns the user afterwards (the current page).
    async fn create_portal_session(
        &self,
        customer_id: &CustomerId,
        redirect_url: &str,
    ) -> Result<PortalSession, PortalError>;
}
