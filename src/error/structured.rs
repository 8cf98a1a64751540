//! Structured error output for scripted callers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging
//!
//! Intent detection recognizes common typos in HTTP methods and
//! navigation wait strategies and suggests the closest valid value.

#![allow(clippy::option_if_let_else)]

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Input Errors (exit code 1) ===
    /// Input file missing
    InputNotFound,
    /// Input file has an unusable shape
    InvalidInput,

    // === Validation Errors (exit code 4) ===
    /// Field validation failed
    ValidationFailed,
    /// Unknown HTTP method
    InvalidMethod,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,
    /// Unknown wait strategy
    InvalidWaitUntil,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,
    /// Filesystem watcher error
    WatchError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InputNotFound => "INPUT_NOT_FOUND",
            Self::InvalidInput => "INVALID_INPUT",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidMethod => "INVALID_METHOD",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InvalidWaitUntil => "INVALID_WAIT_UNTIL",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::WatchError => "WATCH_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether fixing the input and re-running may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound
                | Self::InvalidInput
                | Self::ValidationFailed
                | Self::InvalidMethod
                | Self::InvalidWaitUntil
        )
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Missing input and internal errors
    /// - 2: Malformed input
    /// - 4: Validation errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound | Self::InternalError => 1,
            Self::InvalidInput => 2,
            Self::ValidationFailed | Self::InvalidMethod => 4,
            Self::ConfigError | Self::InvalidWaitUntil => 7,
            Self::IoError | Self::JsonError | Self::YamlError | Self::WatchError => 8,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `GenError`.
    #[must_use]
    pub fn from_error(err: &GenError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &GenError) -> (ErrorCode, Option<Value>) {
        match err {
            GenError::InputNotFound { path } => (
                ErrorCode::InputNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            GenError::InvalidInput { path, reason } => (
                ErrorCode::InvalidInput,
                Some(json!({"path": path.display().to_string(), "reason": reason})),
            ),
            GenError::Validation { field, reason } => (
                ErrorCode::ValidationFailed,
                Some(json!({"field": field, "reason": reason})),
            ),
            GenError::ValidationErrors { errors } => (
                ErrorCode::ValidationFailed,
                Some(json!({
                    "errors": errors.iter()
                        .map(|e| json!({"field": e.field, "message": e.message}))
                        .collect::<Vec<_>>()
                })),
            ),
            GenError::InvalidMethod { method } => {
                (ErrorCode::InvalidMethod, Some(json!({"method": method})))
            }
            GenError::Config(_) => (ErrorCode::ConfigError, None),
            GenError::InvalidWaitUntil { value } => {
                (ErrorCode::InvalidWaitUntil, Some(json!({"value": value})))
            }
            GenError::Watch(_) => (ErrorCode::WatchError, None),
            GenError::Io(_) => (ErrorCode::IoError, None),
            GenError::Json(_) => (ErrorCode::JsonError, None),
            GenError::Yaml(_) => (ErrorCode::YamlError, None),
            GenError::WithContext { context, .. } => {
                (ErrorCode::InternalError, Some(json!({"context": context})))
            }
            GenError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    /// Generate context-aware hint from error.
    fn generate_hint(err: &GenError) -> Option<String> {
        match err {
            GenError::InvalidMethod { method } => detect_method_intent(method).map_or_else(
                || err.suggestion().map(ToString::to_string),
                |detected| Some(format!("Did you mean \"{detected}\"?")),
            ),
            GenError::InvalidWaitUntil { value } => detect_wait_until_intent(value).map_or_else(
                || err.suggestion().map(ToString::to_string),
                |detected| Some(format!("Did you mean --wait-until {detected}?")),
            ),
            _ => err.suggestion().map(ToString::to_string),
        }
    }
}

// === Intent Detection ===

const VALID_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];

const VALID_WAIT_UNTIL: &[&str] = &["load", "domcontentloaded", "networkidle", "commit"];

/// Method synonyms for intent detection.
static METHOD_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("FETCH", "GET"),
        ("READ", "GET"),
        ("CREATE", "POST"),
        ("UPDATE", "PUT"),
        ("REPLACE", "PUT"),
        ("MODIFY", "PATCH"),
        ("REMOVE", "DELETE"),
        ("DEL", "DELETE"),
    ]
    .into_iter()
    .collect()
});

/// Detect which HTTP method the user likely meant.
fn detect_method_intent(input: &str) -> Option<&'static str> {
    let upper = input.trim().to_uppercase();

    if let Some(&canonical) = VALID_METHODS.iter().find(|m| **m == upper) {
        return Some(canonical);
    }

    if let Some(&canonical) = METHOD_SYNONYMS.get(upper.as_str()) {
        return Some(canonical);
    }

    closest(&upper, VALID_METHODS)
}

/// Detect which wait strategy the user likely meant.
fn detect_wait_until_intent(input: &str) -> Option<&'static str> {
    let lower = input.trim().to_lowercase();

    for &strategy in VALID_WAIT_UNTIL {
        if strategy.starts_with(&lower) && !lower.is_empty() {
            return Some(strategy);
        }
    }

    closest(&lower, VALID_WAIT_UNTIL)
}

/// Closest candidate within an edit distance of 2.
fn closest(input: &str, candidates: &[&'static str]) -> Option<&'static str> {
    candidates
        .iter()
        .map(|c| (levenshtein_distance(input, c), *c))
        .filter(|(dist, _)| *dist <= 2)
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map(|(_, c)| c)
}

// === Levenshtein Distance ===

/// Calculate the Levenshtein distance between two strings.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(a_len + 1) {
        row[0] = i;
    }
    for (j, item) in matrix[0].iter_mut().enumerate().take(b_len + 1) {
        *item = j;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(matrix[i][j + 1] + 1, matrix[i + 1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[a_len][b_len]
}
