//! Recorded-action code generation.
//!
//! A recording flows through four stages:
//!
//! 1. [`parser`] classifies each interaction line into a [`StepRecord`]
//! 2. [`page_object`] renders one class with a method per unique step
//! 3. [`test_script`] renders a test replaying the steps in order
//! 4. [`writer`] persists both under the configured layout
//!
//! Every run starts from the file's current contents and keeps no state,
//! so identical input always produces identical output.

pub mod ident;
pub mod page_object;
pub mod parser;
pub mod step;
pub mod test_script;
pub mod writer;

pub use page_object::PageObjectEmitter;
pub use parser::parse_recording;
pub use step::{Action, Modifier, StepRecord};
pub use test_script::TestScriptEmitter;
pub use writer::{GeneratedFiles, names_for_recording, write_generated};

use crate::codegen::relative_import;
use crate::config::Config;
use crate::error::{GenError, Result};
use ident::is_identifier;
use std::fs;
use std::path::Path;
use tracing::info;

/// Module path of the shared logger, relative to the output root.
const LOGGER_MODULE: &str = "utils/logger";

/// Module path of the wait-then-act helpers, relative to the output root.
const ACTIONS_MODULE: &str = "utils/actions";

/// Generate page object and test for the recording at `path`.
///
/// Class name and test prefix are derived from the file name.
///
/// # Errors
///
/// Returns an error if the recording cannot be read or the output cannot be written.
pub fn generate_from_file(path: &Path, config: &Config) -> Result<GeneratedFiles> {
    let (class_name, test_prefix) = names_for_recording(path);
    generate_named(path, &class_name, &test_prefix, config)
}

/// Like [`generate_from_file`] with explicit names.
///
/// # Errors
///
/// Returns an error if the recording cannot be read or the output cannot be written.
pub fn generate_named(
    path: &Path,
    class_name: &str,
    test_prefix: &str,
    config: &Config,
) -> Result<GeneratedFiles> {
    if !path.is_file() {
        return Err(GenError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)
        .map_err(|e| GenError::with_context(format!("reading {}", path.display()), e))?;
    generate_from_source(&content, class_name, test_prefix, config)
}

/// Generate from recording text already in memory.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn generate_from_source(
    content: &str,
    class_name: &str,
    test_prefix: &str,
    config: &Config,
) -> Result<GeneratedFiles> {
    validate_names(class_name, test_prefix)?;
    let (page_source, test_source) = render(content, class_name, config);
    let files = write_generated(
        &config.layout,
        class_name,
        test_prefix,
        &page_source,
        &test_source,
    )?;
    info!(
        page = %files.page_path.display(),
        test = %files.test_path.display(),
        "{}",
        files.summary()
    );
    Ok(files)
}

/// Reject names that are not usable as a class or would escape the output directory.
///
/// # Errors
///
/// Returns a `Validation` error naming the offending option.
pub fn validate_names(class_name: &str, test_prefix: &str) -> Result<()> {
    if !is_identifier(class_name) {
        return Err(GenError::Validation {
            field: "class-name".to_string(),
            reason: format!("'{class_name}' is not a valid TypeScript identifier"),
        });
    }
    let escapes = test_prefix.contains(['/', '\\']) || test_prefix.contains("..");
    if test_prefix.trim().is_empty() || escapes {
        return Err(GenError::Validation {
            field: "test-prefix".to_string(),
            reason: format!("'{test_prefix}' must be a plain file name"),
        });
    }
    Ok(())
}

/// Render both sources without touching the filesystem.
#[must_use]
pub fn render(content: &str, class_name: &str, config: &Config) -> (String, String) {
    let steps = parse_recording(content);
    let layout = &config.layout;

    let page_source = PageObjectEmitter::new(class_name, config.navigation)
        .with_util_modules(
            relative_import(&layout.pages_dir, Path::new(LOGGER_MODULE)),
            relative_import(&layout.pages_dir, Path::new(ACTIONS_MODULE)),
        )
        .emit(&steps);

    let page_module = relative_import(&layout.web_tests_dir, &layout.pages_dir.join(class_name));
    let logger_module = relative_import(&layout.web_tests_dir, Path::new(LOGGER_MODULE));
    let test_source = TestScriptEmitter::new(class_name, page_module)
        .with_logger_module(logger_module)
        .emit(&steps);

    (page_source, test_source)
}
