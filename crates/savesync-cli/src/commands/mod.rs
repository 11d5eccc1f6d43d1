//! CLI subcommands
//!
//! Each command loads the configuration from the path given on the
//! command line (or the default path) and prints through an
//! [`OutputFormatter`](crate::output::OutputFormatter).

pub mod catalog;
pub mod config;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use savesync_core::config::Config;
use savesync_sync::catalog::MemoryCatalogStore;
use savesync_sync::service::SyncContext;
use tracing::{info, warn};

/// Loads the configuration and catalog and wires the sync adapters
///
/// A missing config file yields the defaults and a missing catalog file
/// yields an empty catalog. A config file that does not parse is an error.
pub(crate) fn load_context(config_path: &Path) -> Result<SyncContext> {
    let config = Config::load_if_present(config_path)?;
    info!(config_path = %config_path.display(), "Loaded configuration");

    let catalog = if config.catalog.path.exists() {
        MemoryCatalogStore::load_yaml(&config.catalog.path).context("Failed to load catalog")?
    } else {
        warn!(path = %config.catalog.path.display(), "Catalog file not found, using an empty catalog");
        MemoryCatalogStore::new()
    };

    SyncContext::from_config(&config, catalog).context("Failed to set up sync")
}
