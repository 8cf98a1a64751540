//! Validation of decoded API definitions.

use crate::api::definition::{
    ApiCase, ApiDefinition, HttpMethod, RawApiCase, RawApiDefinition, RawValidationCase,
    ValidationCase,
};
use crate::error::{GenError, Result, StructuredError, ValidationError};
use crate::recorder::ident::is_identifier;
use std::path::{Component, Path};

/// Check every required field and build the strict definition.
///
/// All problems are collected before failing, so one run reports them all.
///
/// # Errors
///
/// Returns `Validation` for a single problem or `ValidationErrors` for several.
pub fn validate_definition(raw: &RawApiDefinition) -> Result<ApiDefinition> {
    let mut errors = Vec::new();

    let page_name = required_text(&mut errors, "pageName", raw.page_name.as_deref());
    if page_name.as_deref().is_some_and(|name| !is_identifier(name)) {
        errors.push(ValidationError::new(
            "pageName",
            "must be a valid class identifier",
        ));
    }

    let base_route = required_text(&mut errors, "baseRoute", raw.base_route.as_deref());

    let folder = raw
        .folder
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);
    if folder.as_deref().is_some_and(|f| !is_relative_folder(f)) {
        errors.push(ValidationError::new(
            "folder",
            "must be a relative path without '..'",
        ));
    }

    let cases = match raw.cases.as_deref() {
        None => {
            errors.push(ValidationError::new("cases", "is required"));
            Vec::new()
        }
        Some(cases) => cases
            .iter()
            .enumerate()
            .filter_map(|(idx, case)| validate_case(&mut errors, idx, case))
            .collect(),
    };

    if !errors.is_empty() {
        return Err(GenError::from_validation_errors(errors));
    }

    Ok(ApiDefinition {
        page_name: page_name.unwrap_or_default(),
        base_route: base_route.unwrap_or_default(),
        folder,
        cases,
    })
}

fn validate_case(
    errors: &mut Vec<ValidationError>,
    idx: usize,
    raw: &RawApiCase,
) -> Option<ApiCase> {
    let before = errors.len();
    let field = |name: &str| format!("cases[{idx}].{name}");

    let method_name = required_text(errors, &field("methodName"), raw.method_name.as_deref());
    if method_name.as_deref().is_some_and(|name| !is_identifier(name)) {
        errors.push(ValidationError::new(
            field("methodName"),
            "must be a valid method identifier",
        ));
    }
    let description = required_text(errors, &field("description"), raw.description.as_deref());
    let expect_status = required_status(errors, &field("expectStatus"), raw.expect_status);

    let method = match raw.method.as_deref() {
        Some(text) => match text.parse::<HttpMethod>() {
            Ok(method) => Some(method),
            Err(err) => {
                let mut message = format!("unknown HTTP method '{text}'");
                if let Some(hint) = StructuredError::from_error(&err).hint {
                    message.push_str(". ");
                    message.push_str(&hint);
                }
                errors.push(ValidationError::new(field("method"), message));
                None
            }
        },
        None => method_name.as_deref().map(HttpMethod::infer_from_name),
    };

    let validations: Vec<ValidationCase> = raw
        .validations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(v_idx, v)| validate_sub_case(errors, idx, v_idx, v))
        .collect();

    if errors.len() > before {
        return None;
    }

    Some(ApiCase {
        method_name: method_name?,
        description: description?,
        expect_status: expect_status?,
        method: method?,
        data: raw.data.clone(),
        params: raw.params.clone(),
        validations,
        tags: raw.tags.clone().unwrap_or_default(),
        required_fields: raw.required_fields.clone(),
        required_params: raw.required_params.clone(),
        expected_response: raw.expected_response.clone(),
        database_validation: raw.database_validation.clone(),
    })
}

fn validate_sub_case(
    errors: &mut Vec<ValidationError>,
    idx: usize,
    v_idx: usize,
    raw: &RawValidationCase,
) -> Option<ValidationCase> {
    let field = |name: &str| format!("cases[{idx}].validations[{v_idx}].{name}");
    let description = required_text(errors, &field("description"), raw.description.as_deref());
    let expect_status = required_status(errors, &field("expectStatus"), raw.expect_status);

    let message_key = raw
        .message_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);
    if message_key
        .as_deref()
        .is_some_and(|key| key.split('.').any(str::is_empty))
    {
        errors.push(ValidationError::new(
            field("messageKey"),
            "must not contain empty segments",
        ));
        return None;
    }

    Some(ValidationCase {
        description: description?,
        expect_status: expect_status?,
        message_key,
        data: raw.data.clone(),
        params: raw.params.clone(),
        tags: raw.tags.clone().unwrap_or_default(),
    })
}

fn required_text(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.push(ValidationError::new(field, "is required"));
            None
        }
    }
}

fn required_status(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Option<u16>,
) -> Option<u16> {
    match value {
        Some(status) if (100..=599).contains(&status) => Some(status),
        Some(status) => {
            errors.push(ValidationError::new(
                field,
                format!("{status} is not an HTTP status code"),
            ));
            None
        }
        None => {
            errors.push(ValidationError::new(field, "is required"));
            None
        }
    }
}

fn is_relative_folder(folder: &str) -> bool {
    Path::new(folder)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
