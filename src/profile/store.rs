//! In-memory profile store with whole-document persistence.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::StoreError;
use super::types::Profile;

/// A profile together with its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    pub id: String,
    pub profile: Profile,
}

/// Profiles keyed by identifier, kept in document order.
///
/// Entries live in an index-addressed arena; the position of an entry is its
/// enumeration order. Re-inserting an existing identifier replaces the
/// profile in place and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    entries: Vec<ProfileEntry>,
    index: HashMap<String, usize>,
}

impl ProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile.
    pub fn insert(&mut self, id: impl Into<String>, profile: Profile) {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            self.entries[pos].profile = profile;
            return;
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(ProfileEntry { id, profile });
    }

    /// Get a profile by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.index.get(id).map(|&pos| &self.entries[pos].profile)
    }

    /// Get a mutable profile by identifier.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.index
            .get(id)
            .map(|&pos| &mut self.entries[pos].profile)
    }

    /// Whether a profile with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Entry at an enumeration position.
    #[must_use]
    pub fn entry_at(&self, pos: usize) -> Option<&ProfileEntry> {
        self.entries.get(pos)
    }

    /// All entries in enumeration order.
    #[must_use]
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Identifiers in enumeration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the store from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let store: Self = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), profiles = store.len(), "Loaded profile store");
        Ok(store)
    }

    /// Persist the whole store to a JSON document atomically.
    ///
    /// Writes to a sibling temporary file first, then renames it over the
    /// target so a failed write never leaves a truncated store behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let write_err = |e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = path.with_extension("tmp");
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, content).map_err(write_err)?;
        fs::rename(&temp_path, path).map_err(write_err)?;

        tracing::info!(path = %path.display(), profiles = self.len(), "Persisted profile store");
        Ok(())
    }
}

impl FromIterator<(String, Profile)> for ProfileStore {
    fn from_iter<I: IntoIterator<Item = (String, Profile)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (id, profile) in iter {
            store.insert(id, profile);
        }
        store
    }
}

impl Serialize for ProfileStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.id, &entry.profile)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProfileStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = ProfileStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of profile identifiers to profiles")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut store = ProfileStore::new();
                while let Some((id, profile)) = access.next_entry::<String, Profile>()? {
                    store.insert(id, profile);
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
