//! HTTP adapters for the backend collaborators.

mod billing_portal;
mod token_service;

pub use billing_portal::PortalClient;
pub use token_service::BackendTokenService;
