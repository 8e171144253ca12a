//! In-memory backup store.
//!
//! Holds snapshots in a map. Nothing survives the process; this exists
//! for tests and for sessions that explicitly opt out of persistence.

use std::collections::BTreeMap;

use tether_types::Snapshot;

use crate::error::StoreError;
use crate::{BackupStore, validate_key};

/// A [`BackupStore`] backed by an in-process map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackupStore {
    entries: BTreeMap<String, Snapshot>,
}

impl MemoryBackupStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BackupStore for MemoryBackupStore {
    fn load(&self, key: &str) -> Result<Option<Snapshot>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.insert(key.to_owned(), snapshot.clone());
        Ok(())
    }
}
