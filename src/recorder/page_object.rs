//! Page-object class emitter.

use crate::codegen::{doc_text, ts_string};
use crate::config::NavigationDefaults;
use crate::recorder::step::{Action, StepRecord};
use std::collections::HashSet;
use std::fmt::Write as _;
use tracing::debug;


const GOTO_FAILURE: &str = "    } catch (error) {
      logger.error(`Navigation to ${url} failed: ${error}`);
      logger.error(`Current URL: ${this.page.url()}`);
      const content = await this.page.content().catch(() => '');
      logger.error(`Page content: ${content.substring(0, 500)}`);
      await this.page
        .screenshot({ path: `screenshots/goto-failure-${Date.now()}.png`, fullPage: true })
        .catch((screenshotError) => logger.error(`Screenshot failed: ${screenshotError}`));
      throw error;
    }
  }
";

/// Emits one page-object class for a recording.
#[derive(Debug, Clone)]
pub struct PageObjectEmitter {
    class_name: String,
    navigation: NavigationDefaults,
    logger_module: String,
    actions_module: String,
}

impl PageObjectEmitter {
    #[must_use]
    pub fn new(class_name: impl Into<String>, navigation: NavigationDefaults) -> Self {
        Self {
            class_name: class_name.into(),
            navigation,
            logger_module: "../utils/logger".to_string(),
            actions_module: "../utils/actions".to_string(),
        }
    }

    /// Override where `logger` and the wait helpers are imported from.
    #[must_use]
    pub fn with_util_modules(
        mut self,
        logger_module: impl Into<String>,
        actions_module: impl Into<String>,
    ) -> Self {
        self.logger_module = logger_module.into();
        self.actions_module = actions_module.into();
        self
    }

    /// Render the class source.
    ///
    /// Method names are emitted once; a later step synthesizing an
    /// already-emitted name is skipped and the first definition stays.
    #[must_use]
    pub fn emit(&self, steps: &[StepRecord]) -> String {
        let mut out = String::from("import { Page } from '@playwright/test';\n");
        let _ = writeln!(out, "import logger from {};", ts_string(&self.logger_module));
        let _ = writeln!(
            out,
            "import {{ waitAndClick, waitAndFill }} from {};",
            ts_string(&self.actions_module)
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "export class {} {{", self.class_name);
        out.push_str("  readonly page: Page;\n\n");
        out.push_str("  constructor(page: Page) {\n    this.page = page;\n  }\n");

        if let Some(url) = steps
            .iter()
            .find(|s| s.action == Action::Goto)
            .and_then(|s| s.url.as_deref())
        {
            out.push('\n');
            self.emit_goto(&mut out, url);
        }

        let mut seen: HashSet<&str> = HashSet::from(["goto"]);
        for step in steps {
            if matches!(step.action, Action::Goto | Action::Other) {
                continue;
            }
            let Some(name) = step.method_name.as_deref() else {
                continue;
            };
            if !seen.insert(name) {
                debug!(method = name, "Skipping duplicate page-object method");
                continue;
            }
            out.push('\n');
            emit_method(&mut out, name, step);
        }

        out.push_str("}\n\n");
        let _ = writeln!(out, "export default {};", self.class_name);
        out
    }

    fn emit_goto(&self, out: &mut String, url: &str) {
        let timeout = self.navigation.timeout_ms;
        let wait_until = self.navigation.wait_until;
        out.push_str("  /**\n   * Open the recorded start page and wait for the network to settle.\n");
        let _ = writeln!(out, "   * Default URL: {}", doc_text(url));
        out.push_str("   */\n");
        out.push_str("  async goto(\n");
        let _ = writeln!(out, "    url: string = {},", ts_string(url));
        out.push_str(
            "    options: { timeout?: number; waitUntil?: 'load' | 'domcontentloaded' | 'networkidle' | 'commit' } = {},\n",
        );
        out.push_str("  ): Promise<void> {\n");
        let _ = writeln!(out, "    const timeout = options.timeout ?? {timeout};");
        let _ = writeln!(out, "    const waitUntil = options.waitUntil ?? '{wait_until}';");
        out.push_str("    try {\n");
        out.push_str("      logger.info(`Navigating to ${url}`);\n");
        out.push_str("      await this.page.goto(url, { timeout, waitUntil });\n");
        out.push_str("      await this.page.waitForLoadState('networkidle', { timeout });\n");
        out.push_str(GOTO_FAILURE);
    }
}

fn emit_method(out: &mut String, name: &str, step: &StepRecord) {
    let selector = step.full_selector().unwrap_or_default();
    let literal = ts_string(&selector);
    let default_value = ts_string(step.value.as_deref().unwrap_or_default());

    out.push_str("  /**\n");
    let _ = writeln!(
        out,
        "   * {} {}",
        capitalize(step.action.verb()),
        doc_text(&step.target_label())
    );
    let _ = writeln!(out, "   * Selector: {}", doc_text(&selector));
    out.push_str("   */\n");

    match step.action {
        Action::Click => {
            let _ = writeln!(out, "  async {name}(): Promise<void> {{");
            let _ = writeln!(out, "    await waitAndClick(this.page, {literal});");
        }
        Action::Fill => {
            let _ = writeln!(out, "  async {name}(value: string = {default_value}): Promise<void> {{");
            let _ = writeln!(out, "    await waitAndFill(this.page, {literal}, value);");
        }
        Action::Select => {
            let _ = writeln!(out, "  async {name}(value: string = {default_value}): Promise<void> {{");
            let _ = writeln!(out, "    await this.page.locator({literal}).selectOption(value);");
        }
        Action::Press => {
            let _ = writeln!(out, "  async {name}(key: string = {default_value}): Promise<void> {{");
            let _ = writeln!(out, "    await this.page.locator({literal}).press(key);");
        }
        Action::Check => {
            let _ = writeln!(out, "  async {name}(): Promise<void> {{");
            let _ = writeln!(out, "    await this.page.locator({literal}).check();");
        }
        Action::Goto | Action::Other => unreachable!("filtered by caller"),
    }
    out.push_str("  }\n");
}

fn capitalize(verb: &str) -> String {
    crate::recorder::ident::upper_first(verb)
}
