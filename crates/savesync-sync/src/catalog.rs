//! In-memory catalog store (secondary/driven adapter)
//!
//! Implements [`ICatalogStore`] over an insertion-ordered list of records.
//! A store can be loaded from a YAML file of the form:
//!
//! ```yaml
//! entries:
//!   - md5: "8d3d9f294b6e174bc7b1d2fd1c727530"
//!     crc: "635A2BFF 8B022326"
//!     header_name: "SUPER MARIO 64"
//!     good_name: "Super Mario 64 (U)"
//!     country_code: "69"
//! ```
//!
//! Descriptive fields may be omitted; such records are kept and later
//! skipped by the resolver.

use std::path::Path;

use savesync_core::domain::CatalogEntry;
use savesync_core::ports::ICatalogStore;
use serde::Deserialize;
use tracing::{debug, info};

use crate::SyncError;

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

/// Catalog held in memory, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    entries: Vec<CatalogEntry>,
}

impl MemoryCatalogStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from `entries`; a later record replaces an earlier
    /// one with the same checksum.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    /// Parses a YAML catalog document
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidCatalog`] if the document does not parse
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self, SyncError> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| SyncError::InvalidCatalog {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_entries(file.entries))
    }

    /// Loads a catalog from a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::IoError`] if the file cannot be read and
    /// [`SyncError::InvalidCatalog`] if it does not parse
    pub fn load_yaml(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_yaml_str(&content, path)?;
        info!(path = %path.display(), entries = store.len(), "Catalog loaded");
        Ok(store)
    }

    /// Adds `entry`, replacing any record with the same checksum in place
    pub fn insert(&mut self, entry: CatalogEntry) {
        match self.entries.iter_mut().find(|e| e.md5 == entry.md5) {
            Some(existing) => {
                debug!(md5 = %entry.md5, "Replacing duplicate catalog record");
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ICatalogStore for MemoryCatalogStore {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }

    fn lookup(&self, md5: &str) -> Option<CatalogEntry> {
        self.entries.iter().find(|e| e.md5 == md5).cloned()
    }
}
