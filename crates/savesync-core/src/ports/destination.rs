//! Destination resolver port (driven/secondary port)
//!
//! Maps the configured storage mode to the local folder under which the
//! mirror folder lives. Absence is an expected answer (storage not
//! configured or not mounted) and makes the run a no-op.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which local storage root item data lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Application-private storage
    Internal,
    /// User-selected external storage
    External,
}

impl Display for StorageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageMode::Internal => "internal",
            StorageMode::External => "external",
        };
        write!(f, "{}", s)
    }
}

/// Port trait for resolving the destination root
pub trait IDestinationResolver: Send + Sync {
    /// Storage mode currently configured
    fn mode(&self) -> StorageMode;

    /// Destination root for `mode`, or `None` if unavailable
    fn resolve(&self, mode: StorageMode) -> Option<PathBuf>;

    /// Name of the mirror folder created under the destination root
    fn mirror_folder_name(&self) -> String;
}
