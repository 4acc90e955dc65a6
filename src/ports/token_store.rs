//! Token store port.
//!
//! One persisted entry holding the serialized [`TokenRecord`], mirroring a
//! single browser local-storage key. Reads and writes are synchronous by
//! contract - local storage has no async API, and the resolver relies on
//! `save` completing before it reports an identity.

use thiserror::Error;

use crate::domain::identity::TokenRecord;

/// Faults at the storage boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Token store I/O failed: {0}")]
    Io(String),

    #[error("Stored token record could not be (de)serialized: {0}")]
    Serialization(String),
}

/// Persistence for the single token record.
///
/// # Contract
///
/// - `save` replaces the record wholesale and must be all-or-nothing: a
///   failed save leaves the previous record intact, never a half-written
///   one.
/// - `load` returns `Ok(None)` when no record has been stored.
/// - `clear` is idempotent.
pub trait TokenStore: Send + Sync {
    /// Loads the stored record, if any.
    fn load(&self) -> Result<Option<TokenRecord>, StoreError>;

    /// Replaces the stored record.
    fn save(&self, record: &TokenRecord) -> Result<(), StoreError>;

    /// Deletes the stored record.
    fn clear(&self) -> Result<(), StoreError>;
}
