//! End-to-end runs over a directory-backed remote store and a real local
//! mirror folder.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use savesync_core::config::{Config, ConfigBuilder};
use savesync_core::domain::{
    CatalogEntry, MatchRule, NoOpReason, RegionCode, RunId, SingleItem, SyncOutcome, SyncRequest,
};
use savesync_core::ports::{IProgressSink, NullProgressSink};
use savesync_core::usecases::SyncItemsUseCase;
use savesync_sync::catalog::MemoryCatalogStore;
use savesync_sync::filesystem::LocalMirrorAdapter;
use savesync_sync::progress::ChannelProgressSink;
use savesync_sync::remote_dir::DirectoryTransferClient;
use savesync_sync::service::{SyncContext, SyncService};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const ROOT: &str = "Mupen64Plus AE";

/// Remote store and local storage laid out under one temp directory
struct World {
    dir: TempDir,
}

impl World {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("remote")).unwrap();
        std::fs::create_dir_all(dir.path().join("local")).unwrap();
        Self { dir }
    }

    fn remote_root(&self) -> PathBuf {
        self.dir.path().join("remote").join(ROOT)
    }

    fn mirror(&self) -> PathBuf {
        self.dir.path().join("local").join("GameData")
    }

    /// Adds a remote entry holding one save file with `content`
    fn remote_entry(&self, name: &str, content: &str) {
        let entry = self.remote_root().join(name);
        std::fs::create_dir_all(&entry).unwrap();
        std::fs::write(entry.join("save.sra"), content).unwrap();
    }

    /// Adds a local copy holding one file named `file`
    fn local_entry(&self, name: &str, file: &str) {
        let entry = self.mirror().join(name);
        std::fs::create_dir_all(&entry).unwrap();
        std::fs::write(entry.join(file), "local").unwrap();
    }

    fn config(&self) -> Config {
        ConfigBuilder::new()
            .remote_root_folder(ROOT)
            .remote_store_path(self.dir.path().join("remote"))
            .storage_game_data_dir(self.mirror())
            .build()
    }

    fn context(&self, entries: Vec<CatalogEntry>) -> SyncContext {
        SyncContext::from_config(&self.config(), MemoryCatalogStore::from_entries(entries))
            .unwrap()
    }

    fn local_save(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.mirror().join(name).join("save.sra")).ok()
    }
}

fn super_game() -> CatalogEntry {
    CatalogEntry::new("abc", "1234", "SUPER GAME", "Super Game", "69")
}

fn null_sink() -> Arc<dyn IProgressSink + Send + Sync> {
    Arc::new(NullProgressSink)
}

#[tokio::test]
async fn all_request_replaces_only_matching_entries() {
    let world = World::new();
    world.remote_entry("Super Game (USA)", "remote v2");
    world.remote_entry("Other Game", "other");
    world.local_entry("Super Game (USA)", "stale.sra");

    let service = SyncService::start(world.context(vec![super_game()]));
    let (sink, mut labels) = ChannelProgressSink::channel();

    let report = service
        .submit(SyncRequest::All, Arc::new(sink))
        .finished()
        .await
        .unwrap();

    assert_eq!(report.outcome, SyncOutcome::Completed);
    assert_eq!(report.processed, vec!["Super Game (USA)"]);
    assert_eq!(report.skipped, 1);

    assert_eq!(world.local_save("Super Game (USA)").as_deref(), Some("remote v2"));
    assert!(!world.mirror().join("Super Game (USA)/stale.sra").exists());
    assert!(!world.mirror().join("Other Game").exists());

    assert_eq!(labels.recv().await.as_deref(), Some("Super Game (USA)"));
    assert!(labels.try_recv().is_err());

    service.shutdown().await;
}

#[tokio::test]
async fn single_request_matches_primary_directory_name() {
    let world = World::new();
    world.remote_entry("SUPER GAME (U) abc", "by header");
    world.remote_entry("Unrelated", "x");

    let context = world.context(vec![]);
    let request = SyncRequest::Single(SingleItem {
        md5: "abc".into(),
        crc: "1234".into(),
        header_name: "SUPER GAME".into(),
        good_name: "Super Game (U)".into(),
        region: RegionCode::new(0x45),
    });

    let plan = context.plan(&request).await.unwrap();
    assert_eq!(plan.matches.len(), 1);
    assert_eq!(plan.matches[0].rule, MatchRule::PrimaryDir);
    assert_eq!(plan.matches[0].entry.name, "SUPER GAME (U) abc");

    let service = SyncService::start(context);
    let report = service
        .submit(request, null_sink())
        .finished()
        .await
        .unwrap();

    assert_eq!(report.outcome, SyncOutcome::Completed);
    assert_eq!(report.processed, vec!["SUPER GAME (U) abc"]);
    assert_eq!(world.local_save("SUPER GAME (U) abc").as_deref(), Some("by header"));

    service.shutdown().await;
}

#[tokio::test]
async fn missing_remote_root_is_a_no_op() {
    let world = World::new();
    world.local_entry("Super Game (USA)", "save.sra");

    let service = SyncService::start(world.context(vec![super_game()]));
    let report = service
        .submit(SyncRequest::All, null_sink())
        .finished()
        .await
        .unwrap();

    assert_eq!(report.outcome, SyncOutcome::NoOp(NoOpReason::RemoteRootMissing));
    assert!(report.processed.is_empty());
    assert!(world.mirror().join("Super Game (USA)/save.sra").exists());

    service.shutdown().await;
}

#[tokio::test]
async fn unavailable_external_storage_is_a_no_op() {
    let world = World::new();
    world.remote_entry("Super Game (USA)", "remote");

    let config = ConfigBuilder::new()
        .remote_root_folder(ROOT)
        .remote_store_path(world.dir.path().join("remote"))
        .storage_game_data_dir(world.mirror())
        .storage_use_external(true)
        .storage_external_path(world.dir.path().join("unmounted-card"))
        .build();
    let context =
        SyncContext::from_config(&config, MemoryCatalogStore::from_entries(vec![super_game()]))
            .unwrap();

    let service = SyncService::start(context);
    let report = service
        .submit(SyncRequest::All, null_sink())
        .finished()
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        SyncOutcome::NoOp(NoOpReason::DestinationUnavailable)
    );
    assert!(!world.mirror().exists());

    service.shutdown().await;
}

#[tokio::test]
async fn repeated_runs_replace_the_same_entries() {
    let world = World::new();
    world.remote_entry("Super Game (USA)", "remote");
    world.remote_entry("Super Game (Europe)", "remote eu");
    world.remote_entry("Other Game", "other");

    let service = SyncService::start(world.context(vec![super_game()]));

    let first = service
        .submit(SyncRequest::All, null_sink())
        .finished()
        .await
        .unwrap();
    world.local_entry("Super Game (USA)", "edited-locally.sra");
    let second = service
        .submit(SyncRequest::All, null_sink())
        .finished()
        .await
        .unwrap();

    assert_eq!(first.processed, second.processed);
    assert_eq!(
        first.processed,
        vec!["Super Game (Europe)", "Super Game (USA)"]
    );
    assert!(!world
        .mirror()
        .join("Super Game (USA)/edited-locally.sra")
        .exists());
    assert_eq!(world.local_save("Super Game (USA)").as_deref(), Some("remote"));

    service.shutdown().await;
}

/// Sink that cancels `token` once it has seen `after` labels
struct CancelAfter {
    after: usize,
    token: CancellationToken,
    seen: Mutex<Vec<String>>,
}

impl IProgressSink for CancelAfter {
    fn report_progress(&self, label: &str) {
        let mut seen = self.seen.lock().unwrap();
        seen.push(label.to_string());
        if seen.len() >= self.after {
            self.token.cancel();
        }
    }
}

#[tokio::test]
async fn cancellation_keeps_entries_already_replaced() {
    let world = World::new();
    for name in ["Game A", "Game B", "Game C"] {
        world.remote_entry(name, name);
    }
    let context = world.context(vec![CatalogEntry::new(
        "abc", "1234", "GAME", "Game", "69",
    )]);
    let targets = context.resolve_targets(&SyncRequest::All);
    let destination = world.dir.path().join("local");

    let use_case = SyncItemsUseCase::new(
        Arc::new(DirectoryTransferClient::new(world.dir.path().join("remote"))),
        Arc::new(LocalMirrorAdapter::new()),
        ROOT,
        "GameData",
    );
    let token = CancellationToken::new();
    let sink = CancelAfter {
        after: 1,
        token: token.clone(),
        seen: Mutex::new(Vec::new()),
    };

    let report = use_case
        .execute(
            RunId::new(),
            &targets,
            Some(destination.as_path()),
            &sink,
            &token,
        )
        .await;

    assert_eq!(report.outcome, SyncOutcome::Cancelled);
    assert_eq!(report.processed, vec!["Game A"]);
    assert_eq!(*sink.seen.lock().unwrap(), vec!["Game A"]);
    assert_eq!(world.local_save("Game A").as_deref(), Some("Game A"));
    assert!(!world.mirror().join("Game B").exists());
    assert!(!world.mirror().join("Game C").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn transfer_failure_aborts_run_and_keeps_earlier_entries() {
    let world = World::new();
    world.remote_entry("Game A", "a");
    std::os::unix::fs::symlink(
        world.dir.path().join("nowhere"),
        world.remote_root().join("Game B"),
    )
    .unwrap();
    world.remote_entry("Game C", "c");

    let service = SyncService::start(world.context(vec![CatalogEntry::new(
        "abc", "1234", "GAME", "Game", "69",
    )]));
    let report = service
        .submit(SyncRequest::All, null_sink())
        .finished()
        .await
        .unwrap();

    assert!(report.outcome.is_failure());
    assert!(report.outcome.to_string().contains("Game B"));
    assert_eq!(report.processed, vec!["Game A"]);
    assert_eq!(world.local_save("Game A").as_deref(), Some("a"));
    assert!(!world.mirror().join("Game C").exists());

    service.shutdown().await;
}
