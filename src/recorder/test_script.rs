//! Sequential test-script emitter.

use crate::codegen::ts_string;
use crate::recorder::ident::lower_first;
use crate::recorder::step::{Action, StepRecord};
use std::collections::HashSet;
use std::fmt::Write as _;

/// Title used when a recording yields no describable steps.
const FALLBACK_TITLE: &str = "recorded flow";

/// Emits a test that replays the recording through the page object.
#[derive(Debug, Clone)]
pub struct TestScriptEmitter {
    class_name: String,
    page_module: String,
    logger_module: String,
}

/// One line of the test body, prior to rendering.
enum Line {
    Call { description: String, call: String },
    Comment { raw: String },
}

impl TestScriptEmitter {
    /// `page_module` is the import specifier of the page-object file.
    #[must_use]
    pub fn new(class_name: impl Into<String>, page_module: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            page_module: page_module.into(),
            logger_module: "../../utils/logger".to_string(),
        }
    }

    /// Override where `logger` is imported from.
    #[must_use]
    pub fn with_logger_module(mut self, module: impl Into<String>) -> Self {
        self.logger_module = module.into();
        self
    }

    /// Render the test source.
    #[must_use]
    pub fn emit(&self, steps: &[StepRecord]) -> String {
        let instance = lower_first(&self.class_name);
        let lines = plan(steps, &instance);

        let descriptions: Vec<&str> = lines
            .iter()
            .filter_map(|line| match line {
                Line::Call { description, .. } => Some(description.as_str()),
                Line::Comment { .. } => None,
            })
            .collect();
        let title = if descriptions.is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            descriptions.join(", ")
        };
        let title_literal = ts_string(&title);

        let mut out = String::new();
        out.push_str("import { test } from '@playwright/test';\n");
        let _ = writeln!(
            out,
            "import {{ {} }} from {};",
            self.class_name,
            ts_string(&self.page_module)
        );
        let _ = writeln!(out, "import logger from {};", ts_string(&self.logger_module));
        out.push('\n');
        let _ = writeln!(out, "test({title_literal}, async ({{ page }}) => {{");
        let _ = writeln!(out, "  const {instance} = new {}(page);", self.class_name);
        let _ = writeln!(out, "  logger.info(`Starting test: ${{{title_literal}}}`);");
        out.push_str("  try {\n");

        for (idx, line) in lines.iter().enumerate() {
            let number = idx + 1;
            match line {
                Line::Call { description, call } => {
                    let _ = writeln!(out, "    // Step {number}: {description}");
                    let _ = writeln!(out, "    {call}");
                }
                Line::Comment { raw } => {
                    let _ = writeln!(out, "    // Step {number}: unrecognized step");
                    let _ = writeln!(out, "    // {raw}");
                }
            }
        }

        let _ = writeln!(out, "    logger.info(`Finished test: ${{{title_literal}}}`);");
        out.push_str("  } catch (error) {\n");
        out.push_str("    logger.error(`Test failed: ${error}`);\n");
        out.push_str("    throw error;\n");
        out.push_str("  }\n");
        out.push_str("});\n");
        out
    }
}

/// Decide which steps become calls, in recorded order.
///
/// Only the first navigation is replayed. Identical click, select, press
/// and check calls are replayed once; fills always are.
fn plan(steps: &[StepRecord], instance: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut navigated = false;
    let mut seen_calls: HashSet<String> = HashSet::new();

    for step in steps {
        match step.action {
            Action::Goto => {
                if navigated {
                    continue;
                }
                navigated = true;
                lines.push(Line::Call {
                    description: step.describe(),
                    call: format!("await {instance}.goto();"),
                });
            }
            Action::Other => lines.push(Line::Comment {
                raw: step.raw.clone(),
            }),
            action => {
                let Some(method) = step.method_name.as_deref() else {
                    continue;
                };
                let args = step
                    .value
                    .as_deref()
                    .filter(|_| action.takes_value())
                    .map(ts_string)
                    .unwrap_or_default();
                let call = format!("await {instance}.{method}({args});");
                if action != Action::Fill && !seen_calls.insert(call.clone()) {
                    continue;
                }
                lines.push(Line::Call {
                    description: step.describe(),
                    call,
                });
            }
        }
    }
    lines
}
