//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ITransferClient`] - Remote store: root folder lookup, listing, download
//! - [`ILocalMirror`] - Local destination folder: lookup, create, recursive delete
//! - [`ICatalogStore`] - Read-only item catalog
//! - [`IDestinationResolver`] - Maps the configured storage mode to a destination folder
//! - [`IProgressSink`] - Per-entry progress reporting

pub mod catalog_store;
pub mod destination;
pub mod local_mirror;
pub mod progress;
pub mod transfer_client;

pub use catalog_store::ICatalogStore;
pub use destination::{IDestinationResolver, StorageMode};
pub use local_mirror::ILocalMirror;
pub use progress::{IProgressSink, NullProgressSink};
pub use transfer_client::{ITransferClient, RemoteEntry, RemoteFolder};
