//! Progress sink adapters
//!
//! - [`ChannelProgressSink`] forwards labels over an unbounded channel to
//!   whichever task renders them.
//! - [`TracingProgressSink`] writes each label to the log.

use savesync_core::ports::IProgressSink;
use tokio::sync::mpsc;
use tracing::{info, trace};

/// Progress sink that forwards every label over an mpsc channel
#[derive(Debug, Clone)]
pub struct ChannelProgressSink {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelProgressSink {
    /// Creates a sink and the receiver its labels arrive on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl IProgressSink for ChannelProgressSink {
    fn report_progress(&self, label: &str) {
        // A dropped receiver only means nobody is watching any more.
        if self.tx.send(label.to_string()).is_err() {
            trace!(label, "Progress receiver dropped");
        }
    }
}

/// Progress sink that logs every label at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressSink;

impl IProgressSink for TracingProgressSink {
    fn report_progress(&self, label: &str) {
        info!(entry = label, "Syncing");
    }
}
