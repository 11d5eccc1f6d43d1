//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! such as malformed synchronization requests and catalog values.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Some but not all single-item fields were supplied
    #[error("Ambiguous request: {0}")]
    AmbiguousRequest(String),

    /// Region code text that does not fit in a byte
    #[error("Invalid region code: {0}")]
    InvalidRegionCode(String),
}
