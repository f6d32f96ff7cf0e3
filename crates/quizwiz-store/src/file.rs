//! JSON file key-value store.
//!
//! The whole store is one JSON object on disk, mirroring a browser storage
//! area: keys map to already-serialized record strings. Every mutation
//! rewrites the file through a temp file and an atomic rename, so a crash
//! mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use quizwiz_core::error::StoreError;
use quizwiz_core::store::KeyValueStore;

/// A key-value store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    StoreError::Serialization(format!("{}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "opened store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&entries) {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_until_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        assert!(!path.exists());

        store.put("quiz:1", "{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.put("quiz:1", r#"{"id":"1"}"#).unwrap();
            store.put("quiz:2", r#"{"id":"2"}"#).unwrap();
            store.remove("quiz:2").unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("quiz:1").unwrap().as_deref(), Some(r#"{"id":"1"}"#));
        assert!(store.get("quiz:2").unwrap().is_none());
        assert_eq!(store.keys().unwrap(), vec!["quiz:1"]);
    }

    #[test]
    fn remove_missing_key_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.remove("nothing").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let store = JsonFileStore::open(data.join("store.json")).unwrap();
        store.put("quiz:1", "old").unwrap();

        // Replace the store's directory with a plain file so every write fails.
        std::fs::remove_dir_all(&data).unwrap();
        std::fs::write(&data, "not a directory").unwrap();

        let err = store.put("quiz:1", "new").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(store.get("quiz:1").unwrap().as_deref(), Some("old"));

        assert!(matches!(
            store.put("quiz:2", "added").unwrap_err(),
            StoreError::Io(_)
        ));
        assert!(store.get("quiz:2").unwrap().is_none());

        let err = store.remove("quiz:1").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(store.get("quiz:1").unwrap().as_deref(), Some("old"));
        assert_eq!(store.keys().unwrap(), vec!["quiz:1"]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[not an object").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "").unwrap();
        assert!(JsonFileStore::open(&path).unwrap().keys().unwrap().is_empty());
    }
}
