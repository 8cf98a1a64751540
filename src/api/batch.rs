//! Batch driver for the API input file.
//!
//! The input is a JSON array of definitions. Each element is decoded,
//! validated and generated on its own: a bad element is reported and the
//! batch moves on. Only an unreadable or malformed input file aborts the run.

use crate::api::client::emit_client;
use crate::api::definition::RawApiDefinition;
use crate::api::locale::LocaleFile;
use crate::api::models::emit_models;
use crate::api::spec::emit_spec;
use crate::api::validate::validate_definition;
use crate::config::Config;
use crate::error::{GenError, Result};
use crate::recorder::writer::write_file;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result for one element of the input array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Generated {
        page_name: String,
        files: Vec<PathBuf>,
    },
    Failed {
        page_name: String,
        message: String,
    },
}

impl ItemOutcome {
    #[must_use]
    pub fn page_name(&self) -> &str {
        match self {
            Self::Generated { page_name, .. } | Self::Failed { page_name, .. } => page_name,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }

    /// Console line for this outcome.
    #[must_use]
    pub fn report_line(&self) -> String {
        match self {
            Self::Generated { page_name, .. } => format!("✅ Generated: {page_name}"),
            Self::Failed { page_name, message } => {
                format!("❌ Error generating API: {page_name} {message}")
            }
        }
    }
}

/// Outcomes of a whole batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_success()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.items.len() - self.generated_count()
    }
}

/// Load the input file and generate every definition in it.
///
/// # Errors
///
/// Fails only when the input file is missing, unreadable, or not a JSON array.
pub fn generate_batch(input: &Path, config: &Config) -> Result<BatchReport> {
    let definitions = load_definitions(input)?;
    Ok(generate_items(&definitions, config, |_| {}))
}

/// Read the input file as a JSON array of still-undecoded definitions.
///
/// # Errors
///
/// Returns `InputNotFound` for a missing file and `InvalidInput` for
/// malformed JSON or a top level that is not an array.
pub fn load_definitions(input: &Path) -> Result<Vec<Value>> {
    if !input.is_file() {
        return Err(GenError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(input)
        .map_err(|e| GenError::with_context(format!("reading {}", input.display()), e))?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| GenError::InvalidInput {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Array(items) => {
            debug!(count = items.len(), path = %input.display(), "Loaded API definitions");
            Ok(items)
        }
        _ => Err(GenError::InvalidInput {
            path: input.to_path_buf(),
            reason: "expected a JSON array of API definitions".to_string(),
        }),
    }
}

/// Generate each definition in turn, calling `report` after every item.
pub fn generate_items(
    definitions: &[Value],
    config: &Config,
    mut report: impl FnMut(&ItemOutcome),
) -> BatchReport {
    let mut batch = BatchReport::default();
    for (idx, value) in definitions.iter().enumerate() {
        let page_name = item_label(value, idx);
        let outcome = match generate_item(value, config) {
            Ok(files) => {
                info!(page = %page_name, files = files.len(), "Generated API");
                ItemOutcome::Generated { page_name, files }
            }
            Err(err) => {
                warn!(page = %page_name, error = %err, "API generation failed");
                ItemOutcome::Failed {
                    page_name,
                    message: err.to_string(),
                }
            }
        };
        report(&outcome);
        batch.items.push(outcome);
    }
    batch
}

/// Decode, validate and write one definition.
///
/// # Errors
///
/// Returns the decode, validation, or write failure for this item.
pub fn generate_item(value: &Value, config: &Config) -> Result<Vec<PathBuf>> {
    let raw: RawApiDefinition = serde_json::from_value(value.clone())?;
    let def = validate_definition(&raw)?;
    let layout = &config.layout;
    let folder = def.folder.as_deref();

    let class_dir = layout.api_class_dir(folder);
    let spec_dir = layout.api_spec_dir(folder);

    let models_path = class_dir.join(format!("{}.ts", def.models_module()));
    let client_path = class_dir.join(format!("{}.ts", def.page_name));
    let spec_path = spec_dir.join(format!("{}.spec.ts", def.page_name));

    // A broken locale file fails the item before anything is written.
    let keys = def.message_keys();
    let locale_path = layout.locale_path();
    let mut locale = if keys.is_empty() {
        None
    } else {
        Some(LocaleFile::load(&locale_path)?)
    };

    write_file(&models_path, &emit_models(&def))?;
    write_file(&client_path, &emit_client(&def, layout))?;
    write_file(&spec_path, &emit_spec(&def, layout))?;

    let mut files = vec![models_path, client_path, spec_path];

    if let Some(locale) = locale.as_mut() {
        let added = locale.ensure_keys(keys);
        locale.save()?;
        if added > 0 {
            files.push(locale_path);
        }
    }
    Ok(files)
}

fn item_label(value: &Value, idx: usize) -> String {
    value
        .get("pageName")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| format!("<unnamed #{}>", idx + 1), str::to_string)
}
