//! Index of every named favorites list.
//!
//! The registry is built once by scanning storage keys and is then kept up to
//! date on every put/delete; storage is only its persistence sink. Names
//! iterate in lexicographic order.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::constants::{FAVORITES_KEY_PREFIX, LEGACY_FAVORITES_KEY};
use crate::favorites::storage::KeyValueStorage;

/// Storage key of a named list.
#[must_use]
pub fn list_key(name: &str) -> String {
    format!("{FAVORITES_KEY_PREFIX}{name}")
}

fn parse_labels(key: &str, raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(labels) => labels,
        Err(e) => {
            warn!("Stored value of {key:?} is not a label array, treating as empty: {e}");
            Vec::new()
        }
    }
}

/// All named lists, backed by key-value storage.
pub struct ListRegistry {
    storage: Box<dyn KeyValueStorage>,
    index: BTreeMap<String, Vec<String>>,
}

impl ListRegistry {
    /// Builds the index from `storage`.
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let index: BTreeMap<String, Vec<String>> = storage
            .keys()
            .into_iter()
            .filter_map(|key| {
                let name = key.strip_prefix(FAVORITES_KEY_PREFIX)?.to_string();
                let raw = storage.get(&key)?;
                Some((name, parse_labels(&key, &raw)))
            })
            .collect();

        debug!("Found {} favorites list(s) in storage", index.len());
        Self { storage, index }
    }

    /// Every list with its labels.
    #[must_use]
    pub const fn get_all(&self) -> &BTreeMap<String, Vec<String>> {
        &self.index
    }

    /// Labels of one list.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.index.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// List names in lexicographic order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.index.keys().cloned().collect()
    }

    /// Lexicographically first list name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.index.keys().next().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Stores `labels` under `name`, creating the list if needed.
    pub fn put(&mut self, name: &str, labels: &[String]) -> Result<()> {
        let key = list_key(name);
        let raw = serde_json::to_string(labels).context("Failed to serialize favorites")?;
        self.storage
            .set(&key, &raw)
            .with_context(|| format!("Failed to save favorites list '{name}'"))?;
        self.index.insert(name.to_string(), labels.to_vec());
        Ok(())
    }

    /// Removes a list. Returns false if it did not exist.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        if !self.index.contains_key(name) {
            return Ok(false);
        }
        self.storage
            .remove(&list_key(name))
            .with_context(|| format!("Failed to delete favorites list '{name}'"))?;
        self.index.remove(name);
        Ok(true)
    }

    /// Reads the pre-multi-list favorites entry without removing it.
    ///
    /// A malformed legacy entry is removed and reported as absent.
    pub fn legacy(&mut self) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.storage.get(LEGACY_FAVORITES_KEY) else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(labels) => Ok(Some(labels)),
            Err(e) => {
                warn!("Discarding malformed legacy favorites: {e}");
                self.remove_legacy()?;
                Ok(None)
            }
        }
    }

    /// Removes the pre-multi-list favorites entry.
    pub fn remove_legacy(&mut self) -> Result<()> {
        self.storage
            .remove(LEGACY_FAVORITES_KEY)
            .context("Failed to remove legacy favorites")
    }

    /// Whether the legacy entry is present.
    #[must_use]
    pub fn has_legacy(&self) -> bool {
        self.storage.get(LEGACY_FAVORITES_KEY).is_some()
    }
}

impl std::fmt::Debug for ListRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRegistry")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::storage::MemoryStorage;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_index_built_from_storage() {
        let storage = MemoryStorage::with_entries(&[
            ("favorites:zeta", r#"["A1"]"#),
            ("favorites:alpha", r#"["B1","B2"]"#),
            ("favorites:broken", "{not json"),
            ("favorites", r#"["L1"]"#),
            ("theme", "dark"),
        ]);
        let registry = ListRegistry::open(Box::new(storage));

        assert_eq!(registry.names(), labels(&["alpha", "broken", "zeta"]));
        assert_eq!(registry.first_name(), Some("alpha"));
        assert_eq!(registry.get("alpha").unwrap(), labels(&["B1", "B2"]).as_slice());
        assert!(registry.get("broken").unwrap().is_empty());
        assert!(registry.has_legacy());
    }

    #[test]
    fn test_put_and_delete_update_index() {
        let mut registry = ListRegistry::open(Box::new(MemoryStorage::new()));
        assert!(registry.is_empty());

        registry.put("b", &labels(&["X"])).unwrap();
        registry.put("a", &[]).unwrap();
        assert_eq!(registry.first_name(), Some("a"));
        assert_eq!(registry.get_all().len(), 2);

        assert!(registry.delete("a").unwrap());
        assert!(!registry.delete("a").unwrap());
        assert_eq!(registry.names(), labels(&["b"]));
    }

    #[test]
    fn test_legacy_read_then_removed() {
        let storage = MemoryStorage::with_entries(&[("favorites", r#"["X1","X2"]"#)]);
        let mut registry = ListRegistry::open(Box::new(storage));

        assert_eq!(registry.legacy().unwrap(), Some(labels(&["X1", "X2"])));
        // Reading alone keeps the entry
        assert!(registry.has_legacy());

        registry.remove_legacy().unwrap();
        assert!(!registry.has_legacy());
        assert_eq!(registry.legacy().unwrap(), None);
    }

    #[test]
    fn test_malformed_legacy_is_discarded() {
        let storage = MemoryStorage::with_entries(&[("favorites", "42")]);
        let mut registry = ListRegistry::open(Box::new(storage));

        assert_eq!(registry.legacy().unwrap(), None);
        assert!(!registry.has_legacy());
    }
}
