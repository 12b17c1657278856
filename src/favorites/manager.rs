//! Named favorites lists: create, select, delete and startup resolution.
//!
//! The manager is a small state machine over [`ActiveList`]. Every state
//! change is written back to the location so that the fragment always
//! describes the active list.

use anyhow::Result;
use tracing::{debug, info};

use crate::favorites::fragment::Fragment;
use crate::favorites::location::{fragment_of, Location};
use crate::favorites::names::generate_list_name;
use crate::favorites::registry::ListRegistry;
use crate::favorites::share::{share_url, ClipboardSink};
use crate::favorites::storage::KeyValueStorage;
use crate::favorites::store::{FavoritesStore, HistoryMode};

/// Which list, if any, favorites are currently read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveList {
    /// No list exists or none was chosen
    NoActiveList,
    /// Named list
    Active(String),
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Owns the favorites store and the list lifecycle.
#[derive(Debug)]
pub struct ListManager {
    store: FavoritesStore,
}

impl ListManager {
    pub const fn new(store: FavoritesStore) -> Self {
        Self { store }
    }

    /// Opens the registry in `storage` and binds it to `location`.
    ///
    /// Nothing is resolved yet; call [`ListManager::resolve_startup`].
    pub fn open(storage: Box<dyn KeyValueStorage>, location: Box<dyn Location>) -> Self {
        Self::new(FavoritesStore::new(ListRegistry::open(storage), location))
    }

    #[must_use]
    pub const fn store(&self) -> &FavoritesStore {
        &self.store
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ActiveList {
        match self.store.active_name() {
            Some(name) => ActiveList::Active(name.to_string()),
            None => ActiveList::NoActiveList,
        }
    }

    /// All list names in lexicographic order.
    #[must_use]
    pub fn list_names(&self) -> Vec<String> {
        self.store.registry().names()
    }

    /// Current fragment, without `#`.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.store.location().fragment()
    }

    /// Decides the active list from the fragment, legacy storage or the
    /// registry, then rewrites the fragment to match.
    pub fn resolve_startup(&mut self) -> Result<ActiveList> {
        let fragment = Fragment::parse(&self.store.location().fragment());

        if let Some(name) = fragment.list.as_deref() {
            let shared = fragment.favorites();
            if !shared.is_empty() {
                info!("Adopting {} shared favorite(s) into list '{name}'", shared.len());
                self.store.save(name, &shared)?;
            } else if !self.store.registry().contains(name) {
                self.store.save(name, &[])?;
            }
            self.store.activate(Some(name), HistoryMode::Replace);
            return Ok(self.state());
        }

        if let Some(labels) = self.store.registry_mut().legacy()? {
            let name = generate_list_name(|candidate| self.store.registry().contains(candidate));
            info!("Migrating {} legacy favorite(s) to list '{name}'", labels.len());
            // The legacy entry goes only once its labels are stored elsewhere
            self.store.save(&name, &labels)?;
            self.store.registry_mut().remove_legacy()?;
            self.store.activate(Some(&name), HistoryMode::Replace);
            return Ok(self.state());
        }

        Ok(self.fall_back(HistoryMode::Replace))
    }

    /// Activates the lexicographically first list, or none.
    fn fall_back(&mut self, mode: HistoryMode) -> ActiveList {
        let first = self.store.registry().first_name().map(String::from);
        self.store.activate(first.as_deref(), mode);
        self.state()
    }

    /// Creates an empty list and makes it active.
    ///
    /// Returns the stored (trimmed) name.
    pub fn create_list(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("List name cannot be empty");
        }
        if self.store.registry().contains(name) {
            anyhow::bail!("A list named '{name}' already exists");
        }

        self.store.save(name, &[])?;
        self.store.activate(Some(name), HistoryMode::Push);
        info!("Created favorites list '{name}'");
        Ok(name.to_string())
    }

    /// Makes an existing list active.
    pub fn select_list(&mut self, name: &str) -> Result<()> {
        if !self.store.registry().contains(name) {
            anyhow::bail!("No list named '{name}'");
        }
        self.store.activate(Some(name), HistoryMode::Push);
        debug!("Selected favorites list '{name}'");
        Ok(())
    }

    /// Deletes a list after confirmation.
    ///
    /// Returns false if the user declined. Deleting the active list falls
    /// back to the first remaining list, or to no list with a cleared
    /// fragment.
    pub fn delete_list(&mut self, name: &str, confirm: &mut dyn Confirm) -> Result<bool> {
        if !self.store.registry().contains(name) {
            anyhow::bail!("No list named '{name}'");
        }
        if !confirm.confirm(&format!("Delete list '{name}'?")) {
            return Ok(false);
        }

        self.store.registry_mut().delete(name)?;
        info!("Deleted favorites list '{name}'");
        if self.store.active_name() == Some(name) {
            self.fall_back(HistoryMode::Push);
        }
        Ok(true)
    }

    /// Toggles `label` in the active list, creating a list first when none
    /// is active. Returns whether the label is a favorite afterwards.
    pub fn toggle(&mut self, label: &str) -> Result<bool> {
        let active = self.store.active_name().map(String::from);
        let name = match active {
            Some(name) => name,
            None => {
                let name =
                    generate_list_name(|candidate| self.store.registry().contains(candidate));
                self.create_list(&name)?
            }
        };
        self.store.toggle(&name, label)
    }

    /// Re-resolves after a fragment change the manager did not write.
    ///
    /// Returns false when the fragment is the one last written.
    pub fn on_fragment_changed(&mut self) -> Result<bool> {
        if !self.store.fragment_changed_externally() {
            return Ok(false);
        }
        debug!("Fragment changed to {:?}, resolving lists", self.fragment());
        self.resolve_startup()?;
        Ok(true)
    }

    /// Navigates to a pasted link (full URL or bare fragment).
    pub fn open_link(&mut self, link: &str) -> Result<bool> {
        let fragment = fragment_of(link).to_string();
        self.store.location_mut().push_fragment(&fragment);
        self.on_fragment_changed()
    }

    /// Steps back in fragment history. Returns false at the start.
    pub fn back(&mut self) -> Result<bool> {
        if !self.store.location_mut().back() {
            return Ok(false);
        }
        self.on_fragment_changed()?;
        Ok(true)
    }

    /// Steps forward in fragment history. Returns false at the end.
    pub fn forward(&mut self) -> Result<bool> {
        if !self.store.location_mut().forward() {
            return Ok(false);
        }
        self.on_fragment_changed()?;
        Ok(true)
    }

    /// Shareable link for the current state.
    #[must_use]
    pub fn share_url(&self, base_url: &str) -> String {
        share_url(base_url, &self.fragment())
    }

    /// Copies the shareable link to `clipboard` and returns it.
    pub fn share(&self, base_url: &str, clipboard: &mut dyn ClipboardSink) -> Result<String> {
        let url = self.share_url(base_url);
        clipboard.set_text(&url)?;
        info!("Copied share link {url}");
        Ok(url)
    }
}
