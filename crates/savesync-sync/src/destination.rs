//! Destination resolver driven by configuration (secondary/driven adapter)
//!
//! - Internal storage: the parent of `storage.game_data_dir`
//! - External storage: `storage.external_path`, only while it exists as a
//!   directory (removable media may be unmounted)
//!
//! The mirror folder name is the final component of `storage.game_data_dir`.

use std::path::PathBuf;

use savesync_core::config::StorageConfig;
use savesync_core::ports::{IDestinationResolver, StorageMode};
use tracing::debug;

/// Resolves destination roots from [`StorageConfig`]
#[derive(Debug, Clone)]
pub struct ConfigDestinationResolver {
    storage: StorageConfig,
}

impl ConfigDestinationResolver {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

impl IDestinationResolver for ConfigDestinationResolver {
    fn mode(&self) -> StorageMode {
        if self.storage.use_external {
            StorageMode::External
        } else {
            StorageMode::Internal
        }
    }

    fn resolve(&self, mode: StorageMode) -> Option<PathBuf> {
        let root = match mode {
            StorageMode::Internal => self
                .storage
                .game_data_dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf()),
            StorageMode::External => self
                .storage
                .external_path
                .as_ref()
                .filter(|p| !p.as_os_str().is_empty() && p.is_dir())
                .cloned(),
        };
        debug!(%mode, root = ?root, "Resolved destination root");
        root
    }

    fn mirror_folder_name(&self) -> String {
        self.storage
            .game_data_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn storage(use_external: bool, external: Option<PathBuf>) -> StorageConfig {
        StorageConfig {
            use_external,
            external_path: external,
            game_data_dir: PathBuf::from("/data/app/GameData"),
        }
    }

    #[test]
    fn test_internal_mode_uses_parent_of_game_data_dir() {
        let resolver = ConfigDestinationResolver::new(storage(false, None));
        assert_eq!(resolver.mode(), StorageMode::Internal);
        assert_eq!(
            resolver.resolve(StorageMode::Internal).as_deref(),
            Some(Path::new("/data/app"))
        );
        assert_eq!(resolver.mirror_folder_name(), "GameData");
    }

    #[test]
    fn test_external_mode_requires_existing_directory() {
        let dir = TempDir::new().unwrap();
        let resolver =
            ConfigDestinationResolver::new(storage(true, Some(dir.path().to_path_buf())));
        assert_eq!(resolver.mode(), StorageMode::External);
        assert_eq!(
            resolver.resolve(StorageMode::External).as_deref(),
            Some(dir.path())
        );

        let gone = ConfigDestinationResolver::new(storage(
            true,
            Some(dir.path().join("unmounted")),
        ));
        assert!(gone.resolve(StorageMode::External).is_none());
    }

    #[test]
    fn test_external_mode_without_path_is_absent() {
        let resolver = ConfigDestinationResolver::new(storage(true, None));
        assert!(resolver.resolve(StorageMode::External).is_none());

        let empty = ConfigDestinationResolver::new(storage(true, Some(PathBuf::new())));
        assert!(empty.resolve(StorageMode::External).is_none());
    }

    #[test]
    fn test_relative_game_data_dir_without_parent_is_absent() {
        let resolver = ConfigDestinationResolver::new(StorageConfig {
            use_external: false,
            external_path: None,
            game_data_dir: PathBuf::from("GameData"),
        });
        assert!(resolver.resolve(StorageMode::Internal).is_none());
    }
}
