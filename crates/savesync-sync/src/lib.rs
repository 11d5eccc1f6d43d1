//! savesync Sync - adapters and worker service
//!
//! Provides:
//! - Local mirror and remote store adapters over the filesystem
//! - YAML-backed item catalog
//! - Destination resolution from configuration
//! - A single-worker sync service with cooperative cancellation
//!
//! ## Modules
//!
//! - [`catalog`] - In-memory catalog store, loadable from YAML
//! - [`destination`] - Destination root resolver driven by [`Config`](savesync_core::config::Config)
//! - [`filesystem`] - Local mirror adapter (`tokio::fs`)
//! - [`progress`] - Channel and tracing progress sinks
//! - [`remote_dir`] - Remote store rooted at a mounted directory
//! - [`service`] - Worker context that runs sync requests one at a time

pub mod catalog;
pub mod destination;
pub mod filesystem;
pub mod progress;
pub mod remote_dir;
pub mod service;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while wiring or driving synchronization
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error occurred during file operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The catalog file could not be parsed
    #[error("Invalid catalog {path}: {message}")]
    InvalidCatalog { path: PathBuf, message: String },

    /// The worker stopped before delivering a report
    #[error("Sync worker is gone")]
    WorkerGone,
}
