//! Local mirror port (driven/secondary port)
//!
//! This module defines the interface for the local destination folder that
//! downloaded entries are written into. The sync executor uses it to create
//! the mirror folder, find the stale copy of an entry and delete it before
//! the replacement is downloaded.

use std::path::{Path, PathBuf};

/// Port trait for local mirror folder operations
///
/// ## Implementation Notes
///
/// - `find_child` must not return an error for a missing child; absence is `Ok(None)`.
/// - `delete_recursive` removes a directory tree or a single file.
#[async_trait::async_trait]
pub trait ILocalMirror: Send + Sync {
    /// Returns `parent/name`, creating the folder if it does not exist
    async fn ensure_folder(&self, parent: &Path, name: &str) -> anyhow::Result<PathBuf>;

    /// Returns the path of the child `name` of `folder` if it exists
    async fn find_child(&self, folder: &Path, name: &str) -> anyhow::Result<Option<PathBuf>>;

    /// Deletes `path` and everything below it
    async fn delete_recursive(&self, path: &Path) -> anyhow::Result<()>;
}
