//! Progress sink port (driven/secondary port)
//!
//! The executor reports a short label for every entry it starts to
//! replace. Completion is not part of this port: it is delivered as the
//! run's [`SyncReport`](crate::domain::SyncReport).

/// Port trait for per-entry progress reporting
///
/// Calls are fire-and-forget and made from the worker running the sync.
pub trait IProgressSink: Send + Sync {
    /// Reports that the entry identified by `label` is being replaced
    fn report_progress(&self, label: &str);
}

/// Progress sink that discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressSink;

impl IProgressSink for NullProgressSink {
    fn report_progress(&self, _label: &str) {}
}
