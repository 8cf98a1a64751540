//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Generate Playwright page objects, tests and API clients from recordings and JSON definitions
#[derive(Parser, Debug)]
#[command(name = "pagesmith", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output root for generated files
    #[arg(long, global = true, env = "PAGESMITH_OUT_DIR")]
    pub out: Option<PathBuf>,

    /// Project config file (default: ./pagesmith.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a page object and test from one recording
    Record(RecordArgs),

    /// Watch a directory and generate code for each new recording
    Watch(WatchArgs),

    /// Generate API models, classes and specs from a JSON definition file
    Api(ApiArgs),

    /// Print the JSON schema of the API definition file
    Schema,

    /// Show the resolved configuration
    Config,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Recorded interaction script
    pub file: PathBuf,

    /// Page-object class name (default: derived from the file name)
    #[arg(long)]
    pub class_name: Option<String>,

    /// Test file prefix (default: derived from the file name)
    #[arg(long)]
    pub test_prefix: Option<String>,

    /// Navigation timeout baked into the generated goto (ms)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Navigation wait strategy (load, domcontentloaded, networkidle, commit)
    #[arg(long)]
    pub wait_until: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Directory to watch (default: configured recordings dir)
    pub dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// JSON array of API definitions (default: configured input, tests.json)
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}
