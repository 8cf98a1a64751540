//! Watch command: regenerate code whenever a recording is added.

use crate::cli::WatchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputContext;
use crate::watch::RecordingWatcher;
use serde_json::json;

/// Execute the watch command. Blocks until interrupted.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be watched.
pub fn execute(args: &WatchArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| config.recordings_dir.clone());
    let watcher = RecordingWatcher::new(dir, config.clone())?;
    ctx.print(&format!(
        "👀 Watching {} for new recordings",
        watcher.dir().display()
    ));

    watcher.run(|(source, result)| match result {
        Ok(files) => {
            if ctx.is_json() {
                let line = json!({ "source": source, "status": "generated", "files": files });
                println!("{line}");
            }
            ctx.print(&files.summary());
        }
        Err(err) => {
            if ctx.is_json() {
                let line = json!({ "source": source, "status": "failed", "message": err.to_string() });
                println!("{line}");
            }
            ctx.error(&format!("❌ Error generating from {}: {err}", source.display()));
        }
    })
}
