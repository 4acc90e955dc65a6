//! Billing portal HTTP adapter.
//!
//! Implements the `BillingPortal` port against the backend portal
//! endpoint. The response nests the session URL two envelopes deep
//! (`portalSession.portal_session.access_url`) - that shape is the
//! collaborator's contract, reproduced verbatim here.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::CustomerId;
use crate::ports::{BillingPortal, PortalError, PortalSession};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the billing portal endpoint.
pub struct PortalClient {
    endpoint_url: String,
    http_client: reqwest::Client,
}

impl PortalClient {
    /// Creates a client for the portal endpoint.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self::with_timeout(endpoint_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(endpoint_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint_url: endpoint_url.into(),
            http_client,
        }
    }
}

#[derive(Serialize)]
struct PortalRequest<'a> {
    portal: bool,
    customer_id: &'a str,
    redirect_url: &'a str,
}

#[derive(Deserialize)]
struct PortalResponse {
    #[serde(rename = "portalSession")]
    portal_session: PortalSessionEnvelope,
}

#[derive(Deserialize)]
struct PortalSessionEnvelope {
    portal_session: PortalSessionBody,
}

#[derive(Deserialize)]
struct PortalSessionBody {
    access_url: String,
}

#[async_trait]
impl BillingPortal for PortalClient {
    async fn create_portal_session(
        &self,
        customer_id: &CustomerId,
        redirect_url: &str,
    ) -> Result<PortalSession, PortalError> {
        let body = PortalRequest {
            portal: true,
            customer_id: customer_id.as_str(),
            redirect_url,
        };

        let response = self
            .http_client
            .post(&self.endpoint_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Billing portal request failed");
                PortalError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Billing portal returned error status");
            return Err(PortalError::Status(status.as_u16()));
        }

        let parsed: PortalResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Billing portal response was malformed");
            PortalError::Malformed(e.to_string())
        })?;

        Ok(PortalSession {
            access_url: parsed.portal_session.portal_session.access_url,
        })
    }
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("endpoint_url", &self.endpoint_url)
            .finish_non_exhaustive()
    }
}
