//! Project watcher that feeds change batches to a [`Pipeline`].
//!
//! ```text
//! notify::RecommendedWatcher (recursive on the project root)
//!        |
//!   EventRouter --> Debouncer (create/modify)
//!        |      --> deleted / moved (reported with the next batch)
//!        v
//!   AssetBatch --> Pipeline::on_assets_changed
//! ```

mod debouncer;
mod error;

pub use debouncer::Debouncer;
pub use error::WatchError;

use crate::config::GeneratorConfig;
use crate::pipeline::{AssetBatch, PassOutcome, Pipeline};
use crate::store::{AssetPath, AssetStore, FsAssetStore};
use anyhow::Context;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher as _};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Longest single wait on the event channel
const TICK: Duration = Duration::from_millis(50);

/// How long `run` waits for a batch before polling again
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Turns raw notify events into asset batches.
#[derive(Debug)]
pub struct EventRouter {
    root: PathBuf,
    debouncer: Debouncer,
    /// Deletions and moves waiting for the next batch
    structural: AssetBatch,
}

impl EventRouter {
    pub fn new(root: impl Into<PathBuf>, debounce_ms: u64) -> Self {
        Self {
            root: root.into(),
            debouncer: Debouncer::new(debounce_ms),
            structural: AssetBatch::default(),
        }
    }

    fn asset_path(&self, path: &Path) -> Option<AssetPath> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let asset = AssetPath::from_relative(relative)?;
        let hidden = asset.as_str().split('/').any(|s| s.starts_with('.'));
        (!asset.is_root() && !hidden).then_some(asset)
    }

    /// Route one event.
    ///
    /// A rename destination counts as imported as well as moved: the store
    /// sees a new file at that path.
    pub fn route(&mut self, event: Event) {
        let paths: Vec<AssetPath> = event
            .paths
            .iter()
            .filter_map(|p| self.asset_path(p))
            .collect();

        match event.kind {
            EventKind::Create(_) => {
                for path in paths {
                    self.debouncer.record(path);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if paths.len() == 2 => {
                let mut paths = paths.into_iter();
                if let (Some(from), Some(to)) = (paths.next(), paths.next()) {
                    self.moved_away(from);
                    self.moved_in(to);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                for path in paths {
                    self.moved_away(path);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                for path in paths {
                    self.moved_in(path);
                }
            }
            EventKind::Modify(ModifyKind::Name(_)) => {
                // Unpaired rename: tell both halves apart by what is on disk
                for path in paths {
                    if path.to_fs_path(&self.root).exists() {
                        self.moved_in(path);
                    } else {
                        self.moved_away(path);
                    }
                }
            }
            EventKind::Modify(_) => {
                for path in paths {
                    self.debouncer.record(path);
                }
            }
            EventKind::Remove(_) => {
                for path in paths {
                    self.debouncer.remove(&path);
                    self.structural.deleted.push(path);
                }
            }
            _ => {}
        }
    }

    fn moved_away(&mut self, path: AssetPath) {
        self.debouncer.remove(&path);
        self.structural.moved_from.push(path);
    }

    fn moved_in(&mut self, path: AssetPath) {
        self.structural.moved.push(path.clone());
        self.debouncer.record(path);
    }

    /// Next batch, if any changes have settled.
    ///
    /// Deletions and moves ride along with settled imports, or go out on
    /// their own once no import is pending.
    pub fn take_batch(&mut self) -> Option<AssetBatch> {
        let ready = self.debouncer.take_ready();
        if ready.is_empty() && (self.debouncer.has_pending() || self.structural.is_empty()) {
            return None;
        }

        let mut batch = std::mem::take(&mut self.structural);
        batch.imported = ready;
        Some(batch)
    }
}

/// Recursive filesystem watcher over a project directory.
pub struct Watcher {
    router: EventRouter,
    events: Receiver<notify::Result<Event>>,
    _watcher: notify::RecommendedWatcher,
}

impl Watcher {
    pub fn new(project_root: &Path, debounce_ms: u64) -> Result<Self, WatchError> {
        let root = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: root.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(root = %root.display(), debounce_ms, "watching project");
        Ok(Self {
            router: EventRouter::new(root, debounce_ms),
            events: rx,
            _watcher: watcher,
        })
    }

    /// Wait up to `timeout` for the next settled batch.
    pub fn poll_batch(&mut self, timeout: Duration) -> Result<Option<AssetBatch>, WatchError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(batch) = self.router.take_batch() {
                return Ok(Some(batch));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }

            match self.events.recv_timeout((deadline - now).min(TICK)) {
                Ok(Ok(event)) => self.router.route(event),
                Ok(Err(e)) => tracing::error!("file watch error: {e}"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Err(WatchError::ChannelClosed),
            }
        }
    }

    /// Feed batches to `pipeline` until the event channel closes.
    pub fn run(&mut self, pipeline: &mut Pipeline<FsAssetStore>) -> Result<(), WatchError> {
        loop {
            if let Some(batch) = self.poll_batch(POLL_INTERVAL)? {
                handle_batch(pipeline, &batch);
            }
        }
    }
}

/// Refresh the store, then run one pass; failures are logged, not returned.
pub fn handle_batch<S: AssetStore>(pipeline: &mut Pipeline<S>, batch: &AssetBatch) {
    if let Err(e) = pipeline.store_mut().refresh() {
        tracing::error!("failed to refresh asset index: {e}");
        return;
    }

    match pipeline.on_assets_changed(batch) {
        Ok(PassOutcome::Regenerated(report)) => tracing::info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            bootstrapped = report.bootstrapped.len(),
            "menu modules regenerated"
        ),
        Ok(PassOutcome::Idle) => {}
        Err(e) => tracing::error!("regeneration failed: {e}"),
    }
}

/// Regenerate once, then keep a project's menu modules up to date.
pub fn watch_project(project_root: &Path) -> anyhow::Result<()> {
    let config = GeneratorConfig::load(project_root)?;
    crate::logging::init(&config.log_level);

    let store = FsAssetStore::open(project_root)
        .with_context(|| format!("Failed to index {}", project_root.display()))?;
    let mut pipeline = Pipeline::new(store, config);
    if let Err(e) = pipeline.regenerate() {
        tracing::error!("initial regeneration failed: {e}");
    }

    let mut watcher = Watcher::new(project_root, pipeline.config().debounce_ms)?;
    watcher.run(&mut pipeline)?;
    Ok(())
}
