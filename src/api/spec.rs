//! Test-spec emitter for API definitions.

use crate::api::client::folder_dir;
use crate::api::definition::{ApiCase, ApiDefinition, ValidationCase};
use crate::codegen::{relative_import, ts_string};
use crate::config::OutputLayout;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;

/// Module exporting `t(key)`, relative to the output root.
pub const I18N_MODULE: &str = "utils/i18n";
/// Module exporting `expectDatabaseValidation`, relative to the output root.
pub const DB_VALIDATION_MODULE: &str = "utils/dbValidation";

/// Render `<PageName>.spec.ts` for a definition.
#[must_use]
pub fn emit_spec(def: &ApiDefinition, layout: &OutputLayout) -> String {
    let folder = def.folder.as_deref();
    let spec_dir = folder_dir(&layout.api_tests_dir, folder);
    let class_module = relative_import(
        &spec_dir,
        &folder_dir(&layout.api_dir, folder).join(&def.page_name),
    );
    let uses_locale = !def.message_keys().is_empty();
    let uses_db = def.cases.iter().any(|c| c.database_validation.is_some());

    let mut out = String::new();
    out.push_str("import { test, expect } from '@playwright/test';\n");
    let _ = writeln!(out, "import {{ {} }} from {};", def.page_name, ts_string(&class_module));
    if uses_locale {
        let module = relative_import(&spec_dir, Path::new(I18N_MODULE));
        let _ = writeln!(out, "import {{ t }} from {};", ts_string(&module));
    }
    if uses_db {
        let module = relative_import(&spec_dir, Path::new(DB_VALIDATION_MODULE));
        let _ = writeln!(
            out,
            "import {{ expectDatabaseValidation }} from {};",
            ts_string(&module)
        );
    }
    out.push('\n');

    let _ = writeln!(out, "test.describe({}, () => {{", ts_string(&def.page_name));
    let _ = writeln!(out, "  let api: {};", def.page_name);
    out.push('\n');
    out.push_str("  test.beforeEach(async ({ request }) => {\n");
    let _ = writeln!(out, "    api = new {}(request);", def.page_name);
    out.push_str("  });\n");

    for case in &def.cases {
        out.push('\n');
        emit_case_test(&mut out, case);
        for validation in &case.validations {
            out.push('\n');
            emit_validation_test(&mut out, case, validation);
        }
    }

    out.push_str("});\n");
    out
}

fn emit_case_test(out: &mut String, case: &ApiCase) {
    let title = test_title(&case.method_name, &case.description, &case.tags);
    let _ = writeln!(out, "  test({}, async () => {{", ts_string(&title));

    let mut args = Vec::new();
    let needs_data = case.data.is_some() || case.database_validation.is_some();
    if needs_data {
        let data = case.data.clone().unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let _ = writeln!(out, "    const data = {};", ts_json(&data, 4));
        if case.data.is_some() {
            args.push("data".to_string());
        }
    }
    if let Some(params) = &case.params {
        let _ = writeln!(out, "    const params = {};", ts_json(params, 4));
        args.push("params".to_string());
    }

    let _ = writeln!(
        out,
        "    const response = await api.{}({});",
        case.method_name,
        call_options(&args)
    );

    if let Some(expected) = &case.expected_response {
        out.push_str("    const body = await response.json();\n");
        let _ = writeln!(out, "    expect(body).toMatchObject({});", ts_json(expected, 4));
    }
    if let Some(db) = &case.database_validation {
        let _ = writeln!(out, "    await expectDatabaseValidation({}, data);", ts_json(db, 4));
    }
    out.push_str("  });\n");
}

fn emit_validation_test(out: &mut String, case: &ApiCase, validation: &ValidationCase) {
    let title = test_title(&case.method_name, &validation.description, &validation.tags);
    let _ = writeln!(out, "  test({}, async () => {{", ts_string(&title));

    let mut args = Vec::new();
    if let Some(data) = &validation.data {
        let _ = writeln!(out, "    const data = {};", ts_json(data, 4));
        args.push("data".to_string());
    }
    if let Some(params) = &validation.params {
        let _ = writeln!(out, "    const params = {};", ts_json(params, 4));
        args.push("params".to_string());
    }
    args.push(format!("expectStatus: {}", validation.expect_status));

    let _ = writeln!(
        out,
        "    const response = await api.{}({});",
        case.method_name,
        call_options(&args)
    );
    if let Some(key) = &validation.message_key {
        out.push_str("    const body = await response.json();\n");
        let _ = writeln!(out, "    expect(body.message).toBe(t({}));", ts_string(key));
    }
    out.push_str("  });\n");
}

/// `<methodName>: <description>` followed by ` @tag` per tag.
#[must_use]
pub fn test_title(method_name: &str, description: &str, tags: &[String]) -> String {
    let mut title = format!("{method_name}: {description}");
    for tag in tags {
        let tag = tag.trim().trim_start_matches('@');
        if !tag.is_empty() {
            title.push_str(" @");
            title.push_str(tag);
        }
    }
    title
}

fn call_options(args: &[String]) -> String {
    if args.is_empty() {
        String::new()
    } else {
        format!("{{ {} }}", args.join(", "))
    }
}

/// Pretty JSON as a TypeScript expression, continuation lines indented by `indent`.
fn ts_json(value: &Value, indent: usize) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    let pad = " ".repeat(indent);
    pretty
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validate::validate_definition;
    use serde_json::json;

    fn definition(value: Value) -> ApiDefinition {
        validate_definition(&serde_json::from_value(value).unwrap()).unwrap()
    }

    #[test]
    fn user_api_single_test() {
        let def = definition(json!({
            "pageName": "UserApi",
            "baseRoute": "/users",
            "cases": [{ "methodName": "getUser", "description": "fetch a user", "expectStatus": 200 }]
        }));
        let source = emit_spec(&def, &OutputLayout::default());

        assert!(source.contains("import { UserApi } from '../../api/UserApi';"));
        assert!(!source.contains("import { t }"));
        assert!(source.contains("test.describe('UserApi', () => {"));
        assert!(source.contains("    api = new UserApi(request);"));
        assert_eq!(source.matches("  test(").count(), 1);
        assert!(source.contains("  test('getUser: fetch a user', async () => {"));
        assert!(source.contains("    const response = await api.getUser();"));
    }

    #[test]
    fn data_expected_response_and_database_validation() {
        let def = definition(json!({
            "pageName": "UserApi",
            "baseRoute": "/users",
            "cases": [{
                "methodName": "createUser",
                "description": "creates",
                "expectStatus": 201,
                "tags": ["smoke", "@regression"],
                "data": { "email": "a@b.test" },
                "expectedResponse": { "email": "a@b.test" },
                "databaseValidation": { "query": "SELECT * FROM users WHERE email = '{{requestData.email}}'" }
            }]
        }));
        let source = emit_spec(&def, &OutputLayout::default());

        assert!(source.contains("import { expectDatabaseValidation } from '../../utils/dbValidation';"));
        assert!(source.contains("test('createUser: creates @smoke @regression', async () => {"));
        assert!(source.contains("    const data = {\n      \"email\": \"a@b.test\"\n    };"));
        assert!(source.contains("await api.createUser({ data });"));
        assert!(source.contains("expect(body).toMatchObject({"));
        assert!(source.contains("'{{requestData.email}}'"));
        assert!(source.contains("}, data);"));
    }

    #[test]
    fn validation_sub_cases_get_their_own_tests() {
        let def = definition(json!({
            "pageName": "UserApi",
            "baseRoute": "/users",
            "folder": "admin",
            "cases": [{
                "methodName": "getUser",
                "description": "fetch",
                "expectStatus": 200,
                "params": { "id": 1 },
                "validations": [
                    { "description": "unknown id", "expectStatus": 404, "params": { "id": 999 },
                      "messageKey": "error.userNotFound" },
                    { "description": "no id", "expectStatus": 400 }
                ]
            }]
        }));
        let source = emit_spec(&def, &OutputLayout::default());

        assert!(source.contains("import { UserApi } from '../../../api/admin/UserApi';"));
        assert!(source.contains("import { t } from '../../../utils/i18n';"));
        assert_eq!(source.matches("  test(").count(), 3);
        assert!(source.contains("await api.getUser({ params });"));
        assert!(source.contains("await api.getUser({ params, expectStatus: 404 });"));
        assert!(source.contains("expect(body.message).toBe(t('error.userNotFound'));"));
        assert!(source.contains("await api.getUser({ expectStatus: 400 });"));
    }

    #[test]
    fn titles_carry_tags() {
        assert_eq!(test_title("getUser", "fetch", &[]), "getUser: fetch");
        assert_eq!(
            test_title("getUser", "fetch", &["smoke".to_string(), " ".to_string()]),
            "getUser: fetch @smoke"
        );
    }
}
