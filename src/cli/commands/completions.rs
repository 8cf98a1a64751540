//! Shell completions generation command.
//!
//! ```bash
//! pagesmith completions bash > ~/.local/share/bash-completion/completions/pagesmith
//! pagesmith completions zsh -o ~/.zsh/completions/_pagesmith
//! ```

use crate::cli::{Cli, CompletionsArgs, ShellType};
use crate::error::Result;
use crate::output::OutputContext;
use crate::recorder::writer::write_file;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;
use tracing::info;

const BIN_NAME: &str = "pagesmith";

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn execute(args: &CompletionsArgs, ctx: &OutputContext) -> Result<()> {
    let shell = convert_shell_type(args.shell);

    if let Some(output_path) = &args.output {
        let script = render(shell);
        write_file(output_path, &script)?;
        info!(shell = %shell, path = %output_path.display(), "Wrote completion script");
        ctx.print(&format!(
            "Generated {shell} completions to {}",
            output_path.display()
        ));
    } else {
        generate(shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
    }
    Ok(())
}

/// Completion script for `shell` as text.
#[must_use]
pub fn render(shell: Shell) -> String {
    let mut buffer = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

const fn convert_shell_type(shell: ShellType) -> Shell {
    match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
        ShellType::PowerShell => Shell::PowerShell,
        ShellType::Elvish => Shell::Elvish,
    }
}
