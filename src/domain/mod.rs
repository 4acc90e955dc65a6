//! Domain layer: pure types and logic with no I/O.

pub mod entitlement;
pub mod foundation;
pub mod identity;
pub mod signin;
