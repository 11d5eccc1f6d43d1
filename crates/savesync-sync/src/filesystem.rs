//! Local mirror adapter (secondary/driven adapter)
//!
//! Implements [`ILocalMirror`] using `tokio::fs` for async file operations.
//!
//! ## Design Decisions
//!
//! - **Name lookup**: `find_child` stats `folder/name` directly instead of
//!   scanning the folder; a name containing a path separator never matches.
//! - **Recursive delete**: directories go through `remove_dir_all`, plain
//!   files through `remove_file`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use savesync_core::ports::ILocalMirror;
use tracing::{debug, instrument};

// ============================================================================
// LocalMirrorAdapter struct
// ============================================================================

/// Adapter that bridges the [`ILocalMirror`] port to the real filesystem.
///
/// Zero-sized: every operation takes its paths as arguments.
#[derive(Debug, Clone, Default)]
pub struct LocalMirrorAdapter;

impl LocalMirrorAdapter {
    /// Create a new `LocalMirrorAdapter`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// True if `name` is a single plain path component
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
}

// ============================================================================
// ILocalMirror implementation
// ============================================================================

#[async_trait::async_trait]
impl ILocalMirror for LocalMirrorAdapter {
    #[instrument(skip(self), fields(parent = %parent.display()))]
    async fn ensure_folder(&self, parent: &Path, name: &str) -> anyhow::Result<PathBuf> {
        if !is_plain_name(name) {
            anyhow::bail!("invalid mirror folder name '{name}'");
        }
        let folder = parent.join(name);
        debug!(folder = %folder.display(), "ensuring mirror folder");
        tokio::fs::create_dir_all(&folder).await?;
        Ok(folder)
    }

    #[instrument(skip(self), fields(folder = %folder.display()))]
    async fn find_child(&self, folder: &Path, name: &str) -> anyhow::Result<Option<PathBuf>> {
        if !is_plain_name(name) {
            return Ok(None);
        }
        let candidate = folder.join(name);
        match tokio::fs::symlink_metadata(&candidate).await {
            Ok(_) => Ok(Some(candidate)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    async fn delete_recursive(&self, path: &Path) -> anyhow::Result<()> {
        let metadata = tokio::fs::symlink_metadata(path).await?;

        if metadata.is_dir() {
            debug!("removing directory recursively");
            tokio::fs::remove_dir_all(path).await?;
        } else {
            debug!("removing file");
            tokio::fs::remove_file(path).await?;
        }

        debug!("delete complete");
        Ok(())
    }
}

// ============================================================================
// Unit tests
// ============================================================================
