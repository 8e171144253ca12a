//! Durable backup store for the Tether synchronization core.
//!
//! The store is a key-indexed, process-surviving home for the last
//! reconciled backup [`Snapshot`]. The synchronization core loads the
//! backup once at session start and writes it through whenever it
//! changes; it never asks the store for anything else.
//!
//! # Modules
//!
//! - [`error`] -- [`StoreError`](error::StoreError) taxonomy
//! - [`file`] -- [`FileBackupStore`](file::FileBackupStore), one JSON
//!   file per key with atomic replacement
//! - [`memory`] -- [`MemoryBackupStore`](memory::MemoryBackupStore),
//!   a map-backed store for tests and ephemeral sessions

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileBackupStore;
pub use memory::MemoryBackupStore;

use tether_types::Snapshot;

/// A key-indexed, process-surviving store of backup snapshots.
///
/// Implementations must make `save` followed by `load` of the same key
/// return the saved value, and must treat an unknown key as `Ok(None)`
/// rather than an error -- first-run hydration relies on that.
pub trait BackupStore {
    /// Load the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or the stored value
    /// cannot be read or decoded. A merely absent key is `Ok(None)`.
    fn load(&self, key: &str) -> Result<Option<Snapshot>, StoreError>;

    /// Persist `snapshot` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the key is invalid or the value cannot
    /// be written.
    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Validate a storage key.
///
/// Keys name files on disk in the file-backed store, so they are limited
/// to a conservative character set.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] if `key` is empty or contains a
/// character outside `[a-z0-9_-]`.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}
