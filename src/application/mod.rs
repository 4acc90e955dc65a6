//! Application layer - the per-page-load orchestration.
//!
//! - `SessionResolver` - settles who is viewing the page
//! - `SurfaceController` - applies the settled session to the page
//! - `SignInForm` - the self-hosted login page flows
//! - `PageLoad` - the single entry point run once per load

pub mod bootstrap;
pub mod session_resolver;
pub mod signin_form;
pub mod surface_controller;

pub use bootstrap::{LoadOutcome, PageLoad};
pub use session_resolver::{IdentitySource, ResolvedIdentity, SessionOutcome, SessionResolver};
pub use signin_form::SignInForm;
pub use surface_controller::SurfaceController;
