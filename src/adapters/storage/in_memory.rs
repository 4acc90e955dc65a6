//! In-memory token store.
//!
//! Test and demo implementation of the `TokenStore` port. Also records
//! every save so resolution tests can assert that a refreshed record was
//! persisted exactly once, before the identity was reported.

use std::sync::{Mutex, RwLock};

use crate::domain::identity::TokenRecord;
use crate::ports::{StoreError, TokenStore};

/// In-memory `TokenStore` with save journaling.
#[derive(Default)]
pub struct InMemoryTokenStore {
    record: RwLock<Option<TokenRecord>>,
    saves: Mutex<Vec<TokenRecord>>,
    fail_writes: bool,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a record.
    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
            ..Self::default()
        }
    }

    /// Creates a store whose writes fail, for error-path tests.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Creates a pre-seeded store whose writes fail.
    pub fn failing_writes_with(record: TokenRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
            fail_writes: true,
            ..Self::default()
        }
    }

    /// The currently stored record.
    pub fn current(&self) -> Option<TokenRecord> {
        self.record.read().expect("token store lock poisoned").clone()
    }

    /// Every record passed to `save`, in order.
    pub fn saves(&self) -> Vec<TokenRecord> {
        self.saves.lock().expect("token store lock poisoned").clone()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<TokenRecord>, StoreError> {
        Ok(self.current())
    }

    fn save(&self, record: &TokenRecord) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io("simulated write failure".into()));
        }
        *self.record.write().expect("token store lock poisoned") = Some(record.clone());
        self.saves
            .lock()
            .expect("token store lock poisoned")
            .push(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io("simulated write failure".into()));
        }
        *self.record.write().expect("token store lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TokenRecord {
        TokenRecord::new("at", "it", "rt")
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = InMemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&record()).unwrap();
        assert_eq!(store.load().unwrap(), Some(record()));
        assert_eq!(store.saves().len(), 1);
    }

    #[test]
    fn clear_removes_record_and_is_idempotent() {
        let store = InMemoryTokenStore::with_record(record());
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn failing_store_keeps_previous_record() {
        let store = InMemoryTokenStore::failing_writes();
        assert!(store.save(&record()).is_err());
        assert_eq!(store.load().unwrap(), None);
    }
}
