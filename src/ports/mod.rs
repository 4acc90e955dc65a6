//! Ports - interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IdentityProvider` - the OAuth-style provider (opaque SDK)
//! - `TokenService` - backend login/refresh/forgot-password endpoints
//! - `BillingPortal` - backend billing portal session factory
//! - `TokenStore` - the single persisted token record
//! - `PageSurface` - DOM control surface, navigation, paywall removal
//! - `PageEvents` - outbound page-wide notifications

mod billing_portal;
mod identity_provider;
mod page_events;
mod page_surface;
mod token_service;
mod token_store;

pub use billing_portal::{BillingPortal, PortalError, PortalSession};
pub use identity_provider::{CallbackExchange, IdentityProvider, ProviderError};
pub use page_events::{PageEvent, PageEvents};
pub use page_surface::{auth_control_pairs, Control, ControlPair, PageSurface};
pub use token_service::{LoginCredentials, ServiceError, TokenService};
pub use token_store::{StoreError, TokenStore};
