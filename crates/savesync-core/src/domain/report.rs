//! Run reports
//!
//! Every synchronization run ends with exactly one [`SyncReport`], whether
//! it completed, was cancelled, had nothing to do, or aborted on a transfer
//! failure.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single synchronization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random RunId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a run finished without doing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    /// No local destination folder is configured or reachable
    DestinationUnavailable,
    /// The remote root folder does not exist
    RemoteRootMissing,
}

impl Display for NoOpReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoOpReason::DestinationUnavailable => "destination unavailable",
            NoOpReason::RemoteRootMissing => "remote root folder missing",
        };
        write!(f, "{}", s)
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum SyncOutcome {
    /// The whole remote listing was visited
    Completed,
    /// A stop request ended the run between entries
    Cancelled,
    /// Nothing was attempted
    NoOp(NoOpReason),
    /// A transfer failure aborted the run; earlier entries stay replaced
    Failed(String),
}

impl SyncOutcome {
    /// Returns true if the run ended on a transfer failure
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed(_))
    }
}

impl Display for SyncOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Completed => write!(f, "completed"),
            SyncOutcome::Cancelled => write!(f, "cancelled"),
            SyncOutcome::NoOp(reason) => write!(f, "nothing to do ({})", reason),
            SyncOutcome::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Summary of one synchronization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub run_id: RunId,
    pub outcome: SyncOutcome,
    /// Remote entry names that were deleted locally and downloaded, in order
    pub processed: Vec<String>,
    /// Listing entries that matched no target
    pub skipped: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// Starts an empty report stamped with the current time
    pub fn begin(run_id: RunId) -> Self {
        let now = Utc::now();
        Self {
            run_id,
            outcome: SyncOutcome::Completed,
            processed: Vec::new(),
            skipped: 0,
            started_at: now,
            finished_at: now,
        }
    }

    /// Sets the outcome and end time
    pub fn finish(mut self, outcome: SyncOutcome) -> Self {
        self.outcome = outcome;
        self.finished_at = Utc::now();
        self
    }

    /// Wall-clock duration of the run in milliseconds
    pub fn duration_ms(&self) -> u64 {
        (self.finished_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64
    }
}
