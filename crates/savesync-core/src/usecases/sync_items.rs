//! Item synchronization use case
//!
//! Walks the remote listing and replaces the local copy of every entry that
//! matches a target item: the stale local copy is deleted, then the remote
//! entry is downloaded in its place. There is no diffing; every match is a
//! full replace.
//!
//! ## Run Flow
//!
//! 1. Destination root absent ⇒ no-op
//! 2. Remote root folder absent ⇒ no-op
//! 3. Create the mirror folder under the destination root if needed
//! 4. List the remote root and, per entry in listing order:
//!    check cancellation, match, report progress, delete stale copy, download
//!
//! Cancellation is observed only between entries. A transfer failure aborts
//! the run; entries already replaced stay replaced.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::domain::{
    first_match, MatchRule, NoOpReason, RunId, SyncOutcome, SyncReport, TargetItem,
};
use crate::ports::{ILocalMirror, IProgressSink, ITransferClient, RemoteEntry, RemoteFolder};

/// Longest progress label, in characters
pub const MAX_LABEL_CHARS: usize = 30;

/// Progress label for a remote entry: its name cut to [`MAX_LABEL_CHARS`]
pub fn progress_label(name: &str) -> String {
    name.chars().take(MAX_LABEL_CHARS).collect()
}

/// A remote entry a run would replace
#[derive(Debug, Clone, Serialize)]
pub struct PlannedEntry {
    pub entry: RemoteEntry,
    pub rule: MatchRule,
    /// Primary directory name of the target that matched
    pub target: String,
}

/// Result of a dry run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncPlan {
    /// Remote root folder, `None` if it does not exist
    pub root: Option<RemoteFolder>,
    pub matches: Vec<PlannedEntry>,
    pub skipped: u32,
}

/// Use case for running one synchronization over the remote listing
pub struct SyncItemsUseCase {
    transfer_client: Arc<dyn ITransferClient + Send + Sync>,
    local_mirror: Arc<dyn ILocalMirror + Send + Sync>,
    root_folder_name: String,
    mirror_folder_name: String,
}

impl SyncItemsUseCase {
    /// Creates a new SyncItemsUseCase
    ///
    /// # Arguments
    ///
    /// * `transfer_client` - Remote store listing and download
    /// * `local_mirror` - Local mirror folder operations
    /// * `root_folder_name` - Name of the remote root folder
    /// * `mirror_folder_name` - Name of the mirror folder under the destination root
    pub fn new(
        transfer_client: Arc<dyn ITransferClient + Send + Sync>,
        local_mirror: Arc<dyn ILocalMirror + Send + Sync>,
        root_folder_name: impl Into<String>,
        mirror_folder_name: impl Into<String>,
    ) -> Self {
        Self {
            transfer_client,
            local_mirror,
            root_folder_name: root_folder_name.into(),
            mirror_folder_name: mirror_folder_name.into(),
        }
    }

    /// Runs one synchronization and returns its report
    ///
    /// Never returns an error: transfer failures end the run with
    /// [`SyncOutcome::Failed`], cancellation with [`SyncOutcome::Cancelled`].
    ///
    /// # Arguments
    ///
    /// * `run_id` - Identifier stamped on the report
    /// * `targets` - Items to look for in the remote listing
    /// * `destination` - Destination root, `None` if storage is unavailable
    /// * `progress` - Receives one label per replaced entry
    /// * `cancel` - Checked before each listing entry
    #[tracing::instrument(skip_all, fields(run_id = %run_id, targets = targets.len()))]
    pub async fn execute(
        &self,
        run_id: RunId,
        targets: &[TargetItem],
        destination: Option<&Path>,
        progress: &dyn IProgressSink,
        cancel: &CancellationToken,
    ) -> SyncReport {
        let mut report = SyncReport::begin(run_id);

        info!(root_folder = %self.root_folder_name, "Starting sync run");

        let outcome = match self
            .run(targets, destination, progress, cancel, &mut report)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    error = %format!("{e:#}"),
                    processed = report.processed.len(),
                    "Sync run aborted by transfer failure"
                );
                SyncOutcome::Failed(format!("{e:#}"))
            }
        };

        let report = report.finish(outcome);

        info!(
            outcome = %report.outcome,
            processed = report.processed.len(),
            skipped = report.skipped,
            duration_ms = report.duration_ms(),
            "Sync run finished"
        );

        report
    }

    async fn run(
        &self,
        targets: &[TargetItem],
        destination: Option<&Path>,
        progress: &dyn IProgressSink,
        cancel: &CancellationToken,
        report: &mut SyncReport,
    ) -> Result<SyncOutcome> {
        let Some(destination) = destination else {
            info!("No destination folder available, nothing to do");
            return Ok(SyncOutcome::NoOp(NoOpReason::DestinationUnavailable));
        };

        let Some(root) = self.resolve_root().await? else {
            info!(root_folder = %self.root_folder_name, "Remote root folder not found, nothing to do");
            return Ok(SyncOutcome::NoOp(NoOpReason::RemoteRootMissing));
        };

        let mirror = self
            .local_mirror
            .ensure_folder(destination, &self.mirror_folder_name)
            .await
            .context("Failed to create local mirror folder")?;

        let entries = self
            .transfer_client
            .list_entries(&root)
            .await
            .context("Failed to list remote root folder")?;

        debug!(entries = entries.len(), mirror = %mirror.display(), "Remote listing received");

        for entry in &entries {
            if cancel.is_cancelled() {
                info!(processed = report.processed.len(), "Sync run cancelled");
                return Ok(SyncOutcome::Cancelled);
            }

            let Some((target, rule)) = first_match(targets, &entry.name) else {
                debug!(name = %entry.name, "No matching target, skipping");
                report.skipped += 1;
                continue;
            };

            debug!(
                name = %entry.name,
                target = %target.primary_dir_name(),
                rule = %rule,
                "Remote entry matched"
            );

            progress.report_progress(&progress_label(&entry.name));
            self.replace_entry(entry, &mirror).await?;
            report.processed.push(entry.name.clone());
        }

        Ok(SyncOutcome::Completed)
    }

    async fn resolve_root(&self) -> Result<Option<RemoteFolder>> {
        self.transfer_client
            .resolve_root_folder(&self.root_folder_name)
            .await
            .context("Failed to resolve remote root folder")
    }

    /// Deletes the local copy of `entry` if there is one, then downloads it
    async fn replace_entry(&self, entry: &RemoteEntry, mirror: &Path) -> Result<()> {
        if let Some(stale) = self
            .local_mirror
            .find_child(mirror, &entry.name)
            .await
            .with_context(|| format!("Failed to look up local copy of '{}'", entry.name))?
        {
            debug!(path = %stale.display(), "Deleting stale local copy");
            self.local_mirror
                .delete_recursive(&stale)
                .await
                .with_context(|| format!("Failed to delete local copy of '{}'", entry.name))?;
        }

        self.transfer_client
            .download_entry(entry, mirror)
            .await
            .with_context(|| format!("Failed to download '{}'", entry.name))?;

        Ok(())
    }

    /// Dry run: reports which listing entries a run would replace
    ///
    /// Touches neither the local mirror nor any entry content.
    ///
    /// # Errors
    ///
    /// Returns an error if the root folder lookup or listing fails
    pub async fn plan(&self, targets: &[TargetItem]) -> Result<SyncPlan> {
        let Some(root) = self.resolve_root().await? else {
            return Ok(SyncPlan::default());
        };

        let entries = self
            .transfer_client
            .list_entries(&root)
            .await
            .context("Failed to list remote root folder")?;

        let mut plan = SyncPlan {
            root: Some(root),
            ..SyncPlan::default()
        };

        for entry in entries {
            match first_match(targets, &entry.name) {
                Some((target, rule)) => plan.matches.push(PlannedEntry {
                    target: target.primary_dir_name().to_string(),
                    entry,
                    rule,
                }),
                None => plan.skipped += 1,
            }
        }

        Ok(plan)
    }
}
