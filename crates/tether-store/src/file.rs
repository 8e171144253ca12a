//! File-backed backup store.
//!
//! Each key maps to `<root>/<key>.json`. Saves write to a sibling
//! temporary file first and rename it into place, so a crash mid-write
//! leaves the previous backup intact rather than a truncated file.

use std::fs;
use std::path::{Path, PathBuf};

use tether_types::Snapshot;

use crate::error::StoreError;
use crate::{BackupStore, validate_key};

/// A [`BackupStore`] that keeps one JSON file per key under a root
/// directory.
#[derive(Debug, Clone)]
pub struct FileBackupStore {
    root: PathBuf,
}

impl FileBackupStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Path of the file that holds `key`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl BackupStore for FileBackupStore {
    fn load(&self, key: &str) -> Result<Option<Snapshot>, StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let snapshot = serde_json::from_str(&contents)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), "Saved backup snapshot");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tether_types::{ConfigEntry, StateDef};
    use uuid::Uuid;

    use super::*;

    fn snapshot_with_label(label: &str) -> Snapshot {
        Snapshot {
            states: vec![StateDef {
                id: Uuid::from_u128(9),
                label: label.to_owned(),
                transitions: Vec::new(),
            }],
            configuration: vec![ConfigEntry {
                key: "initial".to_owned(),
                value: label.to_owned(),
            }],
        }
    }

    #[test]
    fn missing_key_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBackupStore::open(dir.path()).unwrap();
        assert!(store.load("system").unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBackupStore::open(dir.path()).unwrap();
        let snapshot = snapshot_with_label("idle");
        store.save("system", &snapshot).unwrap();
        assert_eq!(store.load("system").unwrap(), Some(snapshot));
    }

    #[test]
    fn save_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBackupStore::open(dir.path()).unwrap();
        store.save("system", &snapshot_with_label("first")).unwrap();
        store.save("system", &snapshot_with_label("second")).unwrap();
        let loaded = store.load("system").unwrap().unwrap();
        assert_eq!(loaded.states.first().unwrap().label, "second");
    }

    #[test]
    fn corrupt_file_surfaces_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBackupStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("system.json"), "not json").unwrap();
        let result = store.load("system");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn unsafe_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBackupStore::open(dir.path()).unwrap();
        let result = store.save("../outside", &snapshot_with_label("x"));
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }
}
