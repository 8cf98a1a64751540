//! API class emitter.

use crate::api::definition::{ApiCase, ApiDefinition};
use crate::api::models::{ModelKind, case_models, model_name};
use crate::codegen::{doc_text, relative_import, ts_string};
use crate::config::OutputLayout;
use std::fmt::Write as _;
use std::path::Path;

/// Base class every generated API object extends, relative to the API directory.
pub const BASE_API_MODULE: &str = "BaseApi";

const DEFAULT_DATA_TYPE: &str = "Record<string, unknown>";
const DEFAULT_PARAMS_TYPE: &str = "Record<string, string | number | boolean>";

/// Render `<PageName>.ts` for a definition.
#[must_use]
pub fn emit_client(def: &ApiDefinition, layout: &OutputLayout) -> String {
    let class_dir = folder_dir(&layout.api_dir, def.folder.as_deref());
    let base_module = relative_import(&class_dir, &layout.api_dir.join(BASE_API_MODULE));

    let model_imports: Vec<String> = def
        .cases
        .iter()
        .flat_map(|case| {
            case_models(case)
                .into_iter()
                .filter(|kind| *kind != ModelKind::Response)
                .map(move |kind| model_name(case, kind))
        })
        .collect();

    let mut out = String::new();
    out.push_str("import { APIRequestContext, APIResponse, expect } from '@playwright/test';\n");
    let _ = writeln!(out, "import {{ BaseApi }} from {};", ts_string(&base_module));
    if !model_imports.is_empty() {
        let _ = writeln!(
            out,
            "import {{ {} }} from {};",
            model_imports.join(", "),
            ts_string(&format!("./{}", def.models_module()))
        );
    }
    out.push('\n');

    let _ = writeln!(out, "export class {} extends BaseApi {{", def.page_name);
    out.push_str("  constructor(request: APIRequestContext) {\n");
    let _ = writeln!(out, "    super(request, {});", ts_string(&def.base_route));
    out.push_str("  }\n");

    for case in &def.cases {
        out.push('\n');
        emit_method(&mut out, case);
    }

    out.push_str("}\n\n");
    let _ = writeln!(out, "export default {};", def.page_name);
    out
}

fn emit_method(out: &mut String, case: &ApiCase) {
    let data_type = if case.has_request_model() {
        model_name(case, ModelKind::Request)
    } else {
        DEFAULT_DATA_TYPE.to_string()
    };
    let params_type = if case.has_params_model() {
        model_name(case, ModelKind::Params)
    } else {
        DEFAULT_PARAMS_TYPE.to_string()
    };

    out.push_str("  /**\n");
    let _ = writeln!(out, "   * {}", doc_text(&case.description));
    let _ = writeln!(out, "   * {} expecting {} by default", case.method, case.expect_status);
    out.push_str("   */\n");
    let _ = writeln!(out, "  async {}(", case.method_name);
    let _ = writeln!(
        out,
        "    options: {{ data?: {data_type}; params?: {params_type}; expectStatus?: number }} = {{}},"
    );
    out.push_str("  ): Promise<APIResponse> {\n");
    let _ = writeln!(
        out,
        "    const response = await this.send('{}', {{ data: options.data, params: options.params }});",
        case.method
    );
    let _ = writeln!(
        out,
        "    expect(response.status()).toBe(options.expectStatus ?? {});",
        case.expect_status
    );
    out.push_str("    return response;\n");
    out.push_str("  }\n");
}

/// `<base>[/<folder>]`
#[must_use]
pub fn folder_dir(base: &Path, folder: Option<&str>) -> std::path::PathBuf {
    match folder {
        Some(folder) => base.join(folder),
        None => base.to_path_buf(),
    }
}
