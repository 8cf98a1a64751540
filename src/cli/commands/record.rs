//! Record command: one recording in, page object and test out.

use crate::cli::RecordArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputContext;
use crate::recorder::{generate_named, names_for_recording};
use tracing::info;

/// Execute the record command.
///
/// # Errors
///
/// Returns an error if the recording is missing or the output cannot be written.
pub fn execute(args: &RecordArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let (derived_class, derived_prefix) = names_for_recording(&args.file);
    let class_name = args.class_name.clone().unwrap_or(derived_class);
    let test_prefix = args.test_prefix.clone().unwrap_or(derived_prefix);
    info!(file = %args.file.display(), class = %class_name, prefix = %test_prefix, "Generating from recording");

    let files = generate_named(&args.file, &class_name, &test_prefix, config)?;

    ctx.json_pretty(&files)?;
    ctx.print(&files.summary());
    Ok(())
}
