//! Foundation types shared by every domain module.
//!
//! Value objects and cross-cutting contracts with no dependencies on the
//! rest of the crate: identifiers, timestamps, page location, validation
//! errors, and the state machine trait used by the sign-in form.

mod errors;
mod ids;
mod location;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::CustomerId;
pub use location::PageLocation;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
