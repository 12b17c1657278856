//! Favorites store: list name → ordered set of booth labels.
//!
//! All writes go through [`FavoritesStore::commit`], which updates the
//! registry (and with it persistent storage), the in-memory active list and
//! the URL fragment in that order.

use anyhow::Result;
use tracing::{debug, warn};

use crate::favorites::fragment::{is_shareable_label, Fragment, LABEL_SEPARATOR};
use crate::favorites::location::Location;
use crate::favorites::registry::ListRegistry;

/// How a fragment rewrite enters history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Overwrite the current entry
    Replace,
    /// Add a new entry
    Push,
}

/// Removes duplicate labels, keeping the first occurrence.
#[must_use]
pub fn dedup_labels(labels: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !unique.contains(label) {
            unique.push(label.clone());
        }
    }
    unique
}

/// The active list mirrored across storage and the URL fragment.
pub struct FavoritesStore {
    registry: ListRegistry,
    location: Box<dyn Location>,
    active: Option<String>,
    active_labels: Vec<String>,
    last_written: Option<String>,
}

impl FavoritesStore {
    pub fn new(registry: ListRegistry, location: Box<dyn Location>) -> Self {
        Self {
            registry,
            location,
            active: None,
            active_labels: Vec::new(),
            last_written: None,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &ListRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ListRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn location(&self) -> &dyn Location {
        self.location.as_ref()
    }

    pub(crate) fn location_mut(&mut self) -> &mut dyn Location {
        self.location.as_mut()
    }

    /// Name of the active list.
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Labels of the active list, in insertion order.
    #[must_use]
    pub fn active_labels(&self) -> &[String] {
        &self.active_labels
    }

    /// Whether `label` is in the active list.
    #[must_use]
    pub fn is_favorite(&self, label: &str) -> bool {
        self.active_labels.iter().any(|l| l == label)
    }

    /// Stored labels of `list`; empty for unknown lists.
    #[must_use]
    pub fn load(&self, list: &str) -> Vec<String> {
        self.registry.get(list).map(<[String]>::to_vec).unwrap_or_default()
    }

    /// Replaces the labels of `list`, dropping duplicates and labels that
    /// cannot be shared.
    pub fn save(&mut self, list: &str, labels: &[String]) -> Result<()> {
        let labels = dedup_labels(labels)
            .into_iter()
            .filter(|label| {
                let shareable = is_shareable_label(label);
                if !shareable {
                    warn!("Dropping label {label:?} from list '{list}': it contains '{LABEL_SEPARATOR}'");
                }
                shareable
            })
            .collect();
        self.commit(list, labels)
    }

    /// Adds `label` to `list` if absent, removes it if present.
    ///
    /// Returns whether the label is a favorite afterwards.
    pub fn toggle(&mut self, list: &str, label: &str) -> Result<bool> {
        let mut labels = self.load(list);
        let added = if let Some(pos) = labels.iter().position(|l| l == label) {
            labels.remove(pos);
            false
        } else {
            if !is_shareable_label(label) {
                anyhow::bail!("Stand label {label:?} contains '{LABEL_SEPARATOR}' and cannot be saved");
            }
            labels.push(label.to_string());
            true
        };

        debug!(
            "{} '{label}' {} list '{list}'",
            if added { "Added" } else { "Removed" },
            if added { "to" } else { "from" }
        );
        self.commit(list, labels)?;
        Ok(added)
    }

    /// Single mutation path for list contents.
    fn commit(&mut self, list: &str, labels: Vec<String>) -> Result<()> {
        self.registry.put(list, &labels)?;
        if self.active.as_deref() == Some(list) {
            self.active_labels = labels;
            self.write_fragment(HistoryMode::Replace);
        }
        Ok(())
    }

    /// Makes `list` active with its stored labels and rewrites the fragment.
    pub(crate) fn activate(&mut self, list: Option<&str>, mode: HistoryMode) {
        self.active = list.map(String::from);
        self.active_labels = list.map(|name| self.load(name)).unwrap_or_default();
        self.write_fragment(mode);
    }

    /// Fragment describing the current state.
    #[must_use]
    pub fn current_fragment(&self) -> String {
        match &self.active {
            Some(name) => Fragment::for_list(name, &self.active_labels).to_string(),
            None => String::new(),
        }
    }

    /// Rewrites the location to match the current state.
    pub(crate) fn write_fragment(&mut self, mode: HistoryMode) {
        let fragment = self.current_fragment();
        if self.location.fragment() != fragment {
            match mode {
                HistoryMode::Replace => self.location.replace_fragment(&fragment),
                HistoryMode::Push => self.location.push_fragment(&fragment),
            }
        }
        self.last_written = Some(fragment);
    }

    /// Whether the location differs from what the store last wrote.
    #[must_use]
    pub fn fragment_changed_externally(&self) -> bool {
        self.last_written.as_deref() != Some(self.location.fragment().as_str())
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("active", &self.active)
            .field("active_labels", &self.active_labels)
            .finish_non_exhaustive()
    }
}
