//! Directory-backed transfer client (secondary/driven adapter)
//!
//! Implements [`ITransferClient`] over a remote store that is mounted as a
//! local directory (network share, FUSE mount, synced folder). The root
//! folder is a subdirectory of the store; every child of the root folder is
//! one remote entry.
//!
//! ## Design Decisions
//!
//! - **Identifiers**: an entry's `id` is its full path inside the store, so
//!   downloads need no extra lookup.
//! - **Listing order**: children are sorted by name, which gives a stable
//!   listing order across runs.
//! - **Blocking copy**: the recursive copy runs on `spawn_blocking` and
//!   uses `std::fs`, keeping recursion out of async code.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use savesync_core::ports::{ITransferClient, RemoteEntry, RemoteFolder};
use tracing::{debug, instrument, warn};

/// Transfer client for a remote store mounted at `store_path`
#[derive(Debug, Clone)]
pub struct DirectoryTransferClient {
    store_path: PathBuf,
}

impl DirectoryTransferClient {
    /// Create a client for the store mounted at `store_path`.
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }
}

/// Copies `src` (file or directory tree) to `dst`
///
/// Symbolic links are refused so a link cycle cannot recurse forever.
fn copy_recursive(src: &Path, dst: &Path) -> io::Result<u64> {
    let metadata = std::fs::symlink_metadata(src)?;
    if metadata.file_type().is_symlink() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to copy symbolic link {}", src.display()),
        ));
    }
    if !metadata.is_dir() {
        return std::fs::copy(src, dst);
    }

    std::fs::create_dir_all(dst)?;
    let mut copied = 0;
    for child in std::fs::read_dir(src)? {
        let child = child?;
        copied += copy_recursive(&child.path(), &dst.join(child.file_name()))?;
    }
    Ok(copied)
}

#[async_trait::async_trait]
impl ITransferClient for DirectoryTransferClient {
    #[instrument(skip(self), fields(store = %self.store_path.display()))]
    async fn resolve_root_folder(&self, name: &str) -> anyhow::Result<Option<RemoteFolder>> {
        let root = self.store_path.join(name);
        match tokio::fs::metadata(&root).await {
            Ok(m) if m.is_dir() => {
                debug!(root = %root.display(), "remote root folder found");
                Ok(Some(RemoteFolder {
                    id: root.to_string_lossy().into_owned(),
                    name: name.to_string(),
                }))
            }
            Ok(_) => {
                warn!(root = %root.display(), "remote root exists but is not a folder");
                Ok(None)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to stat {}", root.display())),
        }
    }

    #[instrument(skip(self, root), fields(root = %root.name))]
    async fn list_entries(&self, root: &RemoteFolder) -> anyhow::Result<Vec<RemoteEntry>> {
        let mut dir = tokio::fs::read_dir(&root.id)
            .await
            .with_context(|| format!("Failed to read remote root {}", root.id))?;

        let mut entries = Vec::new();
        while let Some(child) = dir.next_entry().await? {
            match child.file_name().into_string() {
                Ok(name) => entries.push(RemoteEntry::new(
                    child.path().to_string_lossy().into_owned(),
                    name,
                )),
                Err(raw) => warn!(name = ?raw, "Skipping remote entry with non UTF-8 name"),
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = entries.len(), "remote listing complete");
        Ok(entries)
    }

    #[instrument(skip(self, entry), fields(entry = %entry.name, destination = %destination.display()))]
    async fn download_entry(&self, entry: &RemoteEntry, destination: &Path) -> anyhow::Result<()> {
        let src = PathBuf::from(&entry.id);
        let dst = destination.join(&entry.name);

        let bytes = tokio::task::spawn_blocking(move || copy_recursive(&src, &dst))
            .await?
            .with_context(|| format!("Failed to copy remote entry '{}'", entry.name))?;

        debug!(bytes, "download complete");
        Ok(())
    }
}

// ============================================================================
// Unit tests
// ============================================================================
