//! Logging setup built on `tracing-subscriber`.
//!
//! `RUST_LOG` always wins. Otherwise the level follows the CLI flags:
//! `-q` shows errors only, no flag shows warnings, `-v` info, `-vv` debug,
//! and anything beyond that trace.

use crate::error::{GenError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::EnvFilter;

static TEST_INIT: Once = Once::new();

/// Build the default filter directive for the given verbosity flags.
#[must_use]
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "pagesmith=error";
    }
    match verbose {
        0 => "pagesmith=warn",
        1 => "pagesmith=info",
        2 => "pagesmith=debug",
        _ => "pagesmith=trace",
    }
}

/// Install the global subscriber.
///
/// When `log_file` is given, log lines are appended to it (without ANSI
/// colors) instead of stderr.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global
/// subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    installed.map_err(|e| GenError::Config(format!("failed to install logger: {e}")))
}

/// Install a test-friendly subscriber once per process.
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("pagesmith=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}
