//! Domain entities and business logic
//!
//! This module contains the core domain types for savesync:
//! - Catalog records and region codes
//! - Target items with their two directory-naming layouts and match rules
//! - Synchronization requests
//! - Run reports and outcomes
//! - Domain-specific error types

pub mod catalog;
pub mod errors;
pub mod region;
pub mod report;
pub mod request;
pub mod target;

// Re-export commonly used types
pub use catalog::{CatalogEntry, SECTIONLESS_KEY};
pub use errors::DomainError;
pub use region::RegionCode;
pub use report::{NoOpReason, RunId, SyncOutcome, SyncReport};
pub use request::{SingleItem, SyncRequest};
pub use target::{contains_match, first_match, MatchRule, NamingLayout, TargetItem};
