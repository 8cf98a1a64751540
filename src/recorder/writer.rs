//! Persists generated page objects and tests.

use crate::config::OutputLayout;
use crate::error::{GenError, Result};
use crate::recorder::ident::{lower_first, to_camel_case, to_proper_camel_case};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix used when a recording's file stem has no letters.
const FALLBACK_PREFIX: &str = "recorded";

/// Paths written for one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFiles {
    pub page_path: PathBuf,
    pub test_path: PathBuf,
}

impl GeneratedFiles {
    /// The one-line success report.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "✅ Generated {} and {}",
            self.page_path.display(),
            self.test_path.display()
        )
    }
}

/// Derive `(ClassName, testPrefix)` from a recording's file name.
///
/// `login-flow.ts` becomes `("LoginFlowPage", "loginFlow")`; a stem already
/// ending in `Page` is not suffixed twice.
#[must_use]
pub fn names_for_recording(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let prefix = to_camel_case(&stem);
    if prefix.is_empty() {
        return ("RecordedPage".to_string(), FALLBACK_PREFIX.to_string());
    }

    let pascal = to_proper_camel_case(&stem);
    let class_name = if pascal.ends_with("Page") {
        pascal
    } else {
        format!("{pascal}Page")
    };
    (class_name, lower_first(&prefix))
}

/// Write both sources, creating parent directories and overwriting old output.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be written.
pub fn write_generated(
    layout: &OutputLayout,
    class_name: &str,
    test_prefix: &str,
    page_source: &str,
    test_source: &str,
) -> Result<GeneratedFiles> {
    let page_path = layout.page_file(class_name);
    let test_path = layout.web_test_file(test_prefix);

    write_file(&page_path, page_source)?;
    write_file(&test_path, test_source)?;

    Ok(GeneratedFiles {
        page_path,
        test_path,
    })
}

/// Write `contents` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| GenError::with_context(format!("creating {}", parent.display()), e))?;
    }
    fs::write(path, contents)
        .map_err(|e| GenError::with_context(format!("writing {}", path.display()), e))?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote generated file");
    Ok(())
}
