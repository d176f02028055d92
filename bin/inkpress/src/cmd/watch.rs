//! Watch command - rebuilds the blog when a source or template changes
//!
//! The watch set is every source document found at startup plus the three
//! templates. Files created later are not picked up.

use std::{
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
};

use color_eyre::eyre::{Result, WrapErr};
use inkpress_generator::{BuildError, BuildStats, SourceSet, template_paths};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};

use super::Options;

/// Rebuild loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No rebuild pending.
    Idle,
    /// A rebuild is running.
    Building,
}

/// Something paths can be (re-)registered with.
pub trait WatchRegistry {
    /// Start watching `path`.
    fn register(&mut self, path: &Path) -> notify::Result<()>;
}

impl WatchRegistry for RecommendedWatcher {
    fn register(&mut self, path: &Path) -> notify::Result<()> {
        self.watch(path, RecursiveMode::NonRecursive)
    }
}

/// Whether an event kind should trigger a rebuild: content writes and removals.
pub fn is_rebuild_trigger(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any)
            | EventKind::Remove(_)
    )
}

/// Runs one rebuild per triggering event, strictly one at a time.
pub struct Rebuilder<B> {
    rebuild: B,
    state: WatchState,
}

impl<B> Rebuilder<B>
where
    B: FnMut() -> std::result::Result<BuildStats, BuildError>,
{
    /// Create a rebuilder around a build function.
    pub fn new(rebuild: B) -> Self {
        Self {
            rebuild,
            state: WatchState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Handle one watcher event. Returns whether a rebuild ran.
    ///
    /// A failed rebuild is logged and the loop goes back to idle. The event's
    /// paths are registered again afterwards, since editors that save by
    /// replacing a file drop the original watch.
    pub fn handle(&mut self, event: &Event, registry: &mut impl WatchRegistry) -> bool {
        if !is_rebuild_trigger(&event.kind) {
            tracing::trace!(kind = ?event.kind, paths = ?event.paths, "Ignoring event");
            return false;
        }

        tracing::info!(kind = ?event.kind, paths = ?event.paths, "Change detected, rebuilding");

        self.state = WatchState::Building;
        match (self.rebuild)() {
            Ok(stats) => tracing::info!(
                posts = stats.posts,
                duration_ms = stats.duration_ms,
                "Rebuild complete"
            ),
            Err(e) => tracing::error!(error = %e, "Rebuild failed, still watching"),
        }
        self.state = WatchState::Idle;

        for path in &event.paths {
            if let Err(e) = registry.register(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to re-register path");
            }
        }

        true
    }

    /// Consume events until the channel closes.
    pub fn run(
        &mut self,
        events: mpsc::Receiver<notify::Result<Event>>,
        registry: &mut impl WatchRegistry,
    ) {
        for event in events {
            match event {
                Ok(event) => {
                    self.handle(&event, registry);
                }
                Err(e) => tracing::warn!(error = %e, "Watch error"),
            }
        }
    }
}

/// Every path watched for the given options.
pub fn watch_set(options: &Options) -> Result<Vec<PathBuf>> {
    let sources = SourceSet::discover(&options.source).wrap_err("Failed to list source files")?;

    Ok(sources
        .files()
        .map(Path::to_path_buf)
        .chain(template_paths(&options.templates))
        .collect())
}

/// Register the watch set and start the rebuild loop on its own thread.
///
/// Registration failures are fatal; after that, the loop never stops the
/// process.
pub fn spawn(options: &Options) -> Result<thread::JoinHandle<()>> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).wrap_err("Failed to create file watcher")?;

    for path in watch_set(options)? {
        watcher
            .register(&path)
            .wrap_err_with(|| format!("Failed to watch {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Watching");
    }

    let builder = options.builder();
    let mut rebuilder = Rebuilder::new(move || builder.build());

    thread::Builder::new()
        .name("inkpress-watch".to_string())
        .spawn(move || rebuilder.run(rx, &mut watcher))
        .wrap_err("Failed to start watch thread")
}
