//! Locale message file maintenance.
//!
//! Message keys are dot-separated paths into nested JSON objects
//! (`error.userNotFound` lives at `{"error": {"userNotFound": ...}}`).
//! Missing keys are added with the key itself as placeholder text.
//! Existing values are never overwritten.

use crate::error::{GenError, Result};
use crate::recorder::writer::write_file;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An in-memory locale file.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    path: PathBuf,
    messages: Map<String, Value>,
    existed: bool,
    dirty: bool,
}

impl LocaleFile {
    /// Load `path`, starting empty when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its top level is not an object.
    pub fn load(path: &Path) -> Result<Self> {
        let existed = path.exists();
        let messages = if existed {
            let contents = fs::read_to_string(path)
                .map_err(|e| GenError::with_context(format!("reading {}", path.display()), e))?;
            if contents.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&contents)? {
                    Value::Object(map) => map,
                    _ => {
                        return Err(GenError::InvalidInput {
                            path: path.to_path_buf(),
                            reason: "locale file must contain a JSON object".to_string(),
                        });
                    }
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            messages,
            existed,
            dirty: false,
        })
    }

    /// Look up a dot key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.messages.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Add `key` if absent. Returns whether the file changed.
    pub fn ensure_key(&mut self, key: &str) -> bool {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            warn!(key, "Skipping locale key with empty segment");
            return false;
        }
        let Some((leaf, parents)) = segments.split_last() else {
            return false;
        };

        let mut current = &mut self.messages;
        for segment in parents {
            let entry = current
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(map) => current = map,
                _ => {
                    warn!(key, segment = *segment, "Locale key collides with an existing value");
                    return false;
                }
            }
        }

        if current.contains_key(*leaf) {
            return false;
        }
        current.insert((*leaf).to_string(), Value::String(key.to_string()));
        self.dirty = true;
        debug!(key, "Added locale key");
        true
    }

    /// Add every missing key. Returns how many were added.
    pub fn ensure_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> usize {
        keys.into_iter().filter(|key| self.ensure_key(key)).count()
    }

    /// Write the file back if it changed or never existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be serialized or written.
    pub fn save(&mut self) -> Result<bool> {
        if !self.dirty && self.existed {
            return Ok(false);
        }
        let mut contents = serde_json::to_string_pretty(&Value::Object(self.messages.clone()))?;
        contents.push('\n');
        write_file(&self.path, &contents)?;
        self.dirty = false;
        self.existed = true;
        Ok(true)
    }
}

/// Ensure every key exists in the locale file at `path`. Returns how many were added.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or written.
pub fn ensure_message_keys<'a>(
    path: &Path,
    keys: impl IntoIterator<Item = &'a str>,
) -> Result<usize> {
    let mut locale = LocaleFile::load(path)?;
    let added = locale.ensure_keys(keys);
    locale.save()?;
    Ok(added)
}
