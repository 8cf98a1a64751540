use clap::Parser;
use pagesmith::cli::commands;
use pagesmith::cli::{Cli, Commands};
use pagesmith::config;
use pagesmith::logging::init_logging;
use pagesmith::output::OutputContext;
use pagesmith::{GenError, StructuredError};
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let ctx = OutputContext::from_args(&cli);
    let overrides = build_cli_overrides(&cli);

    // These never need the project config.
    let result = match &cli.command {
        Commands::Version => Some(commands::version::execute(&ctx)),
        Commands::Completions(args) => Some(commands::completions::execute(args, &ctx)),
        Commands::Schema => Some(commands::schema::execute()),
        _ => None,
    };

    let result = result.unwrap_or_else(|| {
        config::load_config(cli.config.as_deref(), &overrides).and_then(|config| {
            match &cli.command {
                Commands::Record(args) => commands::record::execute(args, &config, &ctx),
                Commands::Watch(args) => commands::watch::execute(args, &config, &ctx),
                Commands::Api(args) => commands::api::execute(args, &config, &ctx),
                Commands::Config => {
                    commands::config::execute(&config, cli.config.as_deref(), &ctx)
                }
                Commands::Version | Commands::Completions(_) | Commands::Schema => Ok(()),
            }
        })
    });

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs a human-readable error with optional color.
fn handle_error(err: &GenError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    let (nav_timeout_ms, wait_until) = match &cli.command {
        Commands::Record(args) => (args.timeout, args.wait_until.clone()),
        _ => (None, None),
    };
    config::CliOverrides {
        out_dir: cli.out.clone(),
        recordings_dir: match &cli.command {
            Commands::Watch(args) => args.dir.clone(),
            _ => None,
        },
        api_input: match &cli.command {
            Commands::Api(args) => args.file.clone(),
            _ => None,
        },
        nav_timeout_ms,
        wait_until,
    }
}
