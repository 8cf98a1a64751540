//! API command: batch-generate models, classes and specs.

use crate::api::{ItemOutcome, generate_items, load_definitions};
use crate::cli::ApiArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputContext;
use crate::util::progress::{create_progress_bar, should_show_progress};
use tracing::info;

/// Execute the api command.
///
/// Per-item failures are reported and do not change the exit status.
///
/// # Errors
///
/// Returns an error only if the input file is missing or malformed.
pub fn execute(args: &ApiArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let input = args.file.clone().unwrap_or_else(|| config.api_input.clone());
    let definitions = load_definitions(&input)?;

    let show = should_show_progress() && !ctx.is_json() && !ctx.is_quiet();
    let pb = create_progress_bar(definitions.len() as u64, "Generating APIs", show);

    let report = generate_items(&definitions, config, |outcome| {
        pb.suspend(|| match outcome {
            ItemOutcome::Generated { .. } => ctx.print(&outcome.report_line()),
            ItemOutcome::Failed { .. } => ctx.error(&outcome.report_line()),
        });
        pb.inc(1);
    });
    pb.finish_and_clear();

    info!(
        generated = report.generated_count(),
        failed = report.failed_count(),
        input = %input.display(),
        "API batch finished"
    );
    ctx.json_pretty(&report)?;
    Ok(())
}
