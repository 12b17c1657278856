//! Persistent key-value storage for favorites lists.
//!
//! Values are strings, mirroring browser local storage. The file-backed
//! implementation keeps every key in one JSON object and rewrites it
//! atomically on each change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// String key-value storage.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All stored keys, in no guaranteed order.
    fn keys(&self) -> Vec<String>;
}

/// In-memory storage, used by tests and as a fallback when the storage file
/// cannot be opened.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-filled with `entries`.
    #[must_use]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Storage persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file at `path`; a missing file is empty storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read storage file: {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse storage file: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Location of the storage file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create storage directory: {}", parent.display())
                })?;
            }
        }

        let content =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize storage")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp storage file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename temp storage file to: {}", self.path.display())
        })?;

        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory and disk in step
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Opens file storage, falling back to memory storage with a warning.
#[must_use]
pub fn open_or_memory(path: &Path) -> Box<dyn KeyValueStorage> {
    match FileStorage::open(path) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!("Favorites will not be saved this session: {e:#}");
            Box::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::with_entries(&[("a", "1")]);
        assert_eq!(storage.get("a").as_deref(), Some("1"));

        storage.set("b", "2").unwrap();
        storage.remove("a").unwrap();
        storage.remove("missing").unwrap();
        assert_eq!(storage.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_file_storage_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        assert!(storage.keys().is_empty());
        storage.set("favorites:a", r#"["X1"]"#).unwrap();
        storage.set("favorites:b", "[]").unwrap();
        storage.remove("favorites:b").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("favorites:a").as_deref(), Some(r#"["X1"]"#));
        assert!(reopened.get("favorites:b").is_none());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        fs::write(&path, "[1,2").unwrap();

        assert!(FileStorage::open(&path).is_err());
        let mut fallback = open_or_memory(&path);
        fallback.set("k", "v").unwrap();
        assert_eq!(fallback.get("k").as_deref(), Some("v"));
        // Corrupt file is left untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2");
    }

    #[test]
    fn test_empty_file_is_empty_storage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("storage.json");
        fs::write(&path, "").unwrap();
        assert!(FileStorage::open(&path).unwrap().keys().is_empty());
    }
}
