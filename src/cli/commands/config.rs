//! Config command: show the resolved configuration.

use crate::config::{Config, PROJECT_CONFIG_FILENAME};
use crate::error::Result;
use crate::output::OutputContext;
use std::path::Path;

/// Execute the config command.
///
/// Prints YAML for humans and JSON with `--json`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn execute(config: &Config, config_path: Option<&Path>, ctx: &OutputContext) -> Result<()> {
    if ctx.is_json() {
        return ctx.json_pretty(config);
    }

    let source = match config_path {
        Some(path) => path.display().to_string(),
        None if Path::new(PROJECT_CONFIG_FILENAME).is_file() => PROJECT_CONFIG_FILENAME.to_string(),
        None => "defaults".to_string(),
    };
    ctx.print(&format!("# source: {source}"));
    ctx.print(render_yaml(config)?.trim_end());
    Ok(())
}

/// The configuration as YAML text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_yaml(config: &Config) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}
