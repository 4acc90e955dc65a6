//! Identity provider adapters.

mod scripted;

pub use scripted::{ProviderCall, ScriptedIdentityProvider};
