//! Sync service - the single worker context that runs sync requests
//!
//! A [`SyncService`] owns one background task that consumes submitted
//! requests from a queue and runs them strictly one at a time, in
//! submission order. Each submission returns a [`SyncHandle`] carrying the
//! run's cancellation token and its completion signal.
//!
//! ## Flow
//!
//! ```text
//! submit() ──→ mpsc queue ──→ worker ──→ ResolveItemsUseCase
//!    │                          │              │
//! SyncHandle ◀── oneshot ◀── SyncReport ◀── SyncItemsUseCase
//! ```
//!
//! Every run token is a child of the service's shutdown token, so
//! [`SyncService::shutdown`] stops the in-flight run at its next entry and
//! turns every queued request into a `Cancelled` report.

use std::path::PathBuf;
use std::sync::Arc;

use savesync_core::config::Config;
use savesync_core::domain::{RunId, SyncOutcome, SyncReport, SyncRequest, TargetItem};
use savesync_core::ports::{
    ICatalogStore, IDestinationResolver, ILocalMirror, IProgressSink, ITransferClient,
};
use savesync_core::usecases::{ResolveItemsUseCase, SyncItemsUseCase, SyncPlan};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::catalog::MemoryCatalogStore;
use crate::destination::ConfigDestinationResolver;
use crate::filesystem::LocalMirrorAdapter;
use crate::remote_dir::DirectoryTransferClient;
use crate::SyncError;

// ============================================================================
// SyncContext
// ============================================================================

/// Everything a run needs, shared by every run of one service
#[derive(Clone)]
pub struct SyncContext {
    pub catalog: Arc<dyn ICatalogStore + Send + Sync>,
    pub transfer_client: Arc<dyn ITransferClient + Send + Sync>,
    pub local_mirror: Arc<dyn ILocalMirror + Send + Sync>,
    pub destination: Arc<dyn IDestinationResolver + Send + Sync>,
    /// Name of the remote root folder
    pub root_folder_name: String,
}

impl SyncContext {
    /// Wires the filesystem adapters from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] listing every validation error
    pub fn from_config(config: &Config, catalog: MemoryCatalogStore) -> Result<Self, SyncError> {
        let errors = config.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SyncError::InvalidConfig(joined));
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            transfer_client: Arc::new(DirectoryTransferClient::new(
                config.remote.store_path.clone(),
            )),
            local_mirror: Arc::new(LocalMirrorAdapter::new()),
            destination: Arc::new(ConfigDestinationResolver::new(config.storage.clone())),
            root_folder_name: config.remote.root_folder.clone(),
        })
    }

    /// Target items `request` resolves to against the catalog
    pub fn resolve_targets(&self, request: &SyncRequest) -> Vec<TargetItem> {
        ResolveItemsUseCase::new(Arc::clone(&self.catalog)).execute(request)
    }

    /// Destination root for the configured storage mode
    pub fn destination_root(&self) -> Option<PathBuf> {
        self.destination.resolve(self.destination.mode())
    }

    fn sync_use_case(&self) -> SyncItemsUseCase {
        SyncItemsUseCase::new(
            Arc::clone(&self.transfer_client),
            Arc::clone(&self.local_mirror),
            self.root_folder_name.clone(),
            self.destination.mirror_folder_name(),
        )
    }

    /// Dry run of `request`: which remote entries a run would replace
    ///
    /// # Errors
    ///
    /// Returns an error if the remote root lookup or listing fails
    pub async fn plan(&self, request: &SyncRequest) -> anyhow::Result<SyncPlan> {
        let targets = self.resolve_targets(request);
        self.sync_use_case().plan(&targets).await
    }
}

// ============================================================================
// SyncHandle
// ============================================================================

/// Caller's side of one submitted run
#[derive(Debug)]
pub struct SyncHandle {
    run_id: RunId,
    cancel: CancellationToken,
    done: oneshot::Receiver<SyncReport>,
}

impl SyncHandle {
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Requests cooperative cancellation
    ///
    /// Takes effect before the next remote entry; an in-flight delete or
    /// download is never interrupted.
    pub fn cancel(&self) {
        debug!(run_id = %self.run_id, "Cancellation requested");
        self.cancel.cancel();
    }

    /// Token observed by the run, for callers that cancel from elsewhere
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the run's single completion report
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::WorkerGone`] if the worker stopped without
    /// reporting
    pub async fn finished(self) -> Result<SyncReport, SyncError> {
        self.done.await.map_err(|_| SyncError::WorkerGone)
    }
}

// ============================================================================
// SyncService
// ============================================================================

struct Job {
    run_id: RunId,
    request: SyncRequest,
    progress: Arc<dyn IProgressSink + Send + Sync>,
    cancel: CancellationToken,
    done: oneshot::Sender<SyncReport>,
}

/// Single worker context that runs sync requests one at a time
pub struct SyncService {
    tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
    shutdown: CancellationToken,
}

impl SyncService {
    /// Spawns the worker task
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(context: SyncContext) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let worker = tokio::spawn(worker_loop(context, rx));
        info!("Sync worker started");

        Self {
            tx,
            worker,
            shutdown,
        }
    }

    /// Queues `request` behind any earlier submissions
    ///
    /// `progress` receives one label per replaced entry of this run.
    pub fn submit(
        &self,
        request: SyncRequest,
        progress: Arc<dyn IProgressSink + Send + Sync>,
    ) -> SyncHandle {
        let run_id = RunId::new();
        let cancel = self.shutdown.child_token();
        let (done_tx, done_rx) = oneshot::channel();

        let job = Job {
            run_id,
            request,
            progress,
            cancel: cancel.clone(),
            done: done_tx,
        };

        // On failure the job is dropped with its sender, so the handle
        // resolves to WorkerGone.
        if self.tx.send(job).is_err() {
            error!(run_id = %run_id, "Sync worker is gone, request dropped");
        } else {
            debug!(run_id = %run_id, "Sync request queued");
        }

        SyncHandle {
            run_id,
            cancel,
            done: done_rx,
        }
    }

    /// Cancels the in-flight run and every queued run, then waits for the
    /// worker to drain the queue and exit.
    pub async fn shutdown(self) {
        info!("Shutting down sync worker");
        self.shutdown.cancel();
        drop(self.tx);

        if let Err(e) = self.worker.await {
            error!(error = %e, "Sync worker terminated abnormally");
        }
        info!("Sync worker stopped");
    }
}

async fn worker_loop(context: SyncContext, mut rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        let run_id = job.run_id;
        let report = run_job(&context, &job).await;

        if job.done.send(report).is_err() {
            debug!(run_id = %run_id, "Run finished but nobody is waiting for the report");
        }
    }
    debug!("Sync queue closed");
}

async fn run_job(context: &SyncContext, job: &Job) -> SyncReport {
    if job.cancel.is_cancelled() {
        info!(run_id = %job.run_id, "Run cancelled before it started");
        return SyncReport::begin(job.run_id).finish(SyncOutcome::Cancelled);
    }

    let targets = context.resolve_targets(&job.request);
    let destination = context.destination_root();

    context
        .sync_use_case()
        .execute(
            job.run_id,
            &targets,
            destination.as_deref(),
            job.progress.as_ref(),
            &job.cancel,
        )
        .await
}

// ============================================================================
// Unit tests
// ============================================================================
