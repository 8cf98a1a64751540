//! Request, params and response interfaces inferred from sample JSON.

use crate::api::definition::{ApiCase, ApiDefinition};
use crate::codegen::ts_string;
use crate::recorder::ident::is_identifier;
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Interface kinds emitted per case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Request,
    Params,
    Response,
}

impl ModelKind {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Params => "Params",
            Self::Response => "Response",
        }
    }
}

/// Interface name for `case` and `kind`, e.g. `CreateUserRequest`.
#[must_use]
pub fn model_name(case: &ApiCase, kind: ModelKind) -> String {
    format!("{}{}", case.type_stem(), kind.suffix())
}

/// Interfaces one case contributes, in emission order.
#[must_use]
pub fn case_models(case: &ApiCase) -> Vec<ModelKind> {
    let mut kinds = Vec::new();
    if case.has_request_model() {
        kinds.push(ModelKind::Request);
    }
    if case.has_params_model() {
        kinds.push(ModelKind::Params);
    }
    if case.has_response_model() {
        kinds.push(ModelKind::Response);
    }
    kinds
}

/// Render the models file for a definition.
///
/// A definition without object samples yields only the header comment.
#[must_use]
pub fn emit_models(def: &ApiDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// Request and response models for {}.", def.page_name);

    for case in &def.cases {
        for kind in case_models(case) {
            let (sample, required) = match kind {
                ModelKind::Request => (case.data.as_ref(), case.required_fields.as_deref()),
                ModelKind::Params => (case.params.as_ref(), case.required_params.as_deref()),
                ModelKind::Response => (case.expected_response.as_ref(), None),
            };
            let Some(Value::Object(fields)) = sample else {
                continue;
            };
            out.push('\n');
            let _ = writeln!(out, "export interface {} {{", model_name(case, kind));
            emit_fields(&mut out, fields, required);
            out.push_str("}\n");
        }
    }
    out
}

fn emit_fields(out: &mut String, fields: &Map<String, Value>, required: Option<&[String]>) {
    for (key, value) in fields {
        let optional = required.is_some_and(|names| !names.iter().any(|n| n == key));
        let _ = writeln!(
            out,
            "  {}{}: {};",
            property_key(key),
            if optional { "?" } else { "" },
            ts_type(value)
        );
    }
}

/// TypeScript type for a sample JSON value.
#[must_use]
pub fn ts_type(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => match items.first() {
            Some(first @ Value::Object(_)) => format!("Array<{}>", ts_type(first)),
            Some(first) => format!("{}[]", ts_type(first)),
            None => "unknown[]".to_string(),
        },
        Value::Object(fields) => {
            if fields.is_empty() {
                return "Record<string, unknown>".to_string();
            }
            let members: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{}: {}", property_key(key), ts_type(value)))
                .collect();
            format!("{{ {} }}", members.join("; "))
        }
    }
}

fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        ts_string(key)
    }
}
