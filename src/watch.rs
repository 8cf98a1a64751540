//! Directory watcher regenerating code for newly added recordings.

use crate::config::Config;
use crate::error::{GenError, Result};
use crate::recorder::{GeneratedFiles, generate_from_file};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of generating from one recording.
pub type FileOutcome = (PathBuf, Result<GeneratedFiles>);

/// Watches one directory and runs the recorder pipeline per created file.
pub struct RecordingWatcher {
    dir: PathBuf,
    config: Config,
    settle: Duration,
}

impl RecordingWatcher {
    /// # Errors
    ///
    /// Returns `InputNotFound` if `dir` is not an existing directory.
    pub fn new(dir: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(GenError::InputNotFound { path: dir });
        }
        let settle = Duration::from_millis(config.watch_settle_ms);
        Ok(Self {
            dir,
            config,
            settle,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Block until the watcher shuts down, reporting each generation.
    ///
    /// Events are handled one at a time on the calling thread; the notify
    /// backend thread only forwards them through a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the watcher cannot be created or attached, or
    /// if the backend stops delivering events.
    pub fn run(&self, mut report: impl FnMut(&FileOutcome)) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&self.dir, RecursiveMode::NonRecursive)?;
        info!(dir = %self.dir.display(), "Watching for new recordings");

        for res in rx {
            match res {
                Ok(event) => {
                    for outcome in self.handle_event(&event) {
                        report(&outcome);
                    }
                }
                Err(err) => warn!(error = %err, "Watch backend error"),
            }
        }
        Err(anyhow::anyhow!("watch backend for {} stopped", self.dir.display()).into())
    }

    /// Handle one filesystem event.
    ///
    /// Only file creations with a recording extension trigger generation.
    /// A failing file is logged and reported; it never aborts the others.
    pub fn handle_event(&self, event: &Event) -> Vec<FileOutcome> {
        if !matches!(event.kind, EventKind::Create(_)) {
            return Vec::new();
        }

        let mut outcomes = Vec::new();
        for path in &event.paths {
            if !is_recording(path) {
                debug!(path = %path.display(), "Ignoring non-recording file");
                continue;
            }
            if !self.settle.is_zero() {
                thread::sleep(self.settle);
            }
            let result = generate_from_file(path, &self.config);
            if let Err(err) = &result {
                warn!(source = %path.display(), error = %err, "Generation failed");
            }
            outcomes.push((path.clone(), result));
        }
        outcomes
    }
}

/// Extensions a recording may be saved with.
const RECORDING_EXTENSIONS: &[&str] = &["ts", "js", "mjs", "cjs", "txt"];

fn is_recording(path: &Path) -> bool {
    if path.is_dir() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RECORDING_EXTENSIONS.contains(&ext))
}
