//! Transfer client port (driven/secondary port)
//!
//! This module defines the interface for reading from the remote object
//! store. The store holds one flat listing of named entries under a single
//! root folder; each entry is the saved data of one item.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - Transport, retry and pagination belong to the implementation. A call
//!   that returns `Err` is treated by the core as a transfer failure and is
//!   not retried.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Handle to the remote root folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFolder {
    /// Provider-specific folder identifier
    pub id: String,
    /// Folder name
    pub name: String,
}

/// One entry of the remote listing
///
/// Immutable snapshot for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Provider-specific entry identifier
    pub id: String,
    /// Entry name, matched against target items
    pub name: String,
}

impl RemoteEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Port trait for remote store operations
#[async_trait::async_trait]
pub trait ITransferClient: Send + Sync {
    /// Looks up the root folder with the given name
    ///
    /// # Returns
    /// `None` if the remote side has never been populated
    async fn resolve_root_folder(&self, name: &str) -> anyhow::Result<Option<RemoteFolder>>;

    /// Lists every entry directly under the root folder, in listing order
    async fn list_entries(&self, root: &RemoteFolder) -> anyhow::Result<Vec<RemoteEntry>>;

    /// Downloads an entry (and everything below it) into `destination`
    ///
    /// The entry is created as a child of `destination` under its own name.
    async fn download_entry(&self, entry: &RemoteEntry, destination: &Path) -> anyhow::Result<()>;
}
