//! Use cases (interactors) for savesync
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate matching rules to domain methods and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`ResolveItemsUseCase`] - Turns a request plus the catalog into target items
//! - [`SyncItemsUseCase`] - Cancellable delete-then-download loop over the remote listing

pub mod resolve_items;
pub mod sync_items;

pub use resolve_items::ResolveItemsUseCase;
pub use sync_items::{progress_label, PlannedEntry, SyncItemsUseCase, SyncPlan, MAX_LABEL_CHARS};
