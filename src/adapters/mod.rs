//! Adapters - implementations of the ports against real collaborators
//! (HTTP backends, the filesystem) or in-memory doubles for tests and the
//! demo binary.

pub mod events;
pub mod http;
pub mod provider;
pub mod storage;
pub mod surface;
