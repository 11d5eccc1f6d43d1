//! Sync command - Replace local save data with the remote copies
//!
//! Provides the `savesync sync` CLI command which:
//! 1. Builds a request for one item or the whole catalog
//! 2. Loads configuration and catalog and wires the adapters
//! 3. Runs the request on a SyncService, printing a line per entry
//! 4. Displays the run report
//!
//! Ctrl-C requests cancellation; the entry being transferred is finished
//! first.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use savesync_core::domain::{RegionCode, SyncOutcome, SyncRequest};
use savesync_sync::progress::ChannelProgressSink;
use savesync_sync::service::SyncService;
use tracing::info;

use super::load_context;
use crate::output::{get_formatter, OutputFormat};

/// Sync command with clap options
#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Synchronize every complete item in the catalog
    #[arg(long, conflicts_with_all = ["md5", "crc", "header", "good_name", "country"])]
    pub all: bool,

    /// Content checksum of the item
    #[arg(long)]
    pub md5: Option<String>,

    /// Secondary checksum of the item
    #[arg(long)]
    pub crc: Option<String>,

    /// Name stored in the item header
    #[arg(long)]
    pub header: Option<String>,

    /// Display ("good") name of the item
    #[arg(long)]
    pub good_name: Option<String>,

    /// Region code as decimal text, e.g. 69
    #[arg(long)]
    pub country: Option<RegionCode>,

    /// Show what would be replaced without making changes
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncCommand {
    /// Builds the request from the flags
    fn request(&self) -> Result<SyncRequest> {
        let request = SyncRequest::from_parts(
            self.md5.clone(),
            self.crc.clone(),
            self.header.clone(),
            self.good_name.clone(),
            self.country,
        )?;

        if request.is_all() && !self.all {
            bail!("Specify --all, or all of --md5, --crc, --header, --good-name and --country");
        }
        Ok(request)
    }

    /// Execute the sync command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);

        let request = self.request()?;
        let context = load_context(config_path)?;

        if self.dry_run {
            let plan = context
                .plan(&request)
                .await
                .context("Failed to plan synchronization")?;
            return formatter.plan(&plan);
        }

        formatter.info("Starting synchronization...");

        let service = SyncService::start(context);
        let (sink, mut labels) = ChannelProgressSink::channel();
        let handle = service.submit(request, Arc::new(sink));
        info!(run_id = %handle.run_id(), "Sync submitted");

        let token = handle.cancellation_token();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Cancellation requested, finishing current entry");
                token.cancel();
            }
        });

        let finished = handle.finished();
        tokio::pin!(finished);

        let report = loop {
            tokio::select! {
                Some(label) = labels.recv() => formatter.progress(&label),
                report = &mut finished => break report,
            }
        };
        while let Ok(label) = labels.try_recv() {
            formatter.progress(&label);
        }

        ctrl_c.abort();
        service.shutdown().await;

        let report = report?;
        formatter.report(&report)?;

        if let SyncOutcome::Failed(reason) = &report.outcome {
            bail!("Sync failed: {}", reason);
        }
        Ok(())
    }
}
