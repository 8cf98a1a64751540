use crate::cli::Cli;
use crate::error::Result;
use serde::Serialize;

/// Central output coordinator that respects json/quiet modes.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable lines
    Plain,
    /// JSON output only
    Json,
    /// Errors only
    Quiet,
}

impl OutputContext {
    /// Create from CLI global args.
    #[must_use]
    pub const fn from_args(args: &Cli) -> Self {
        Self::from_flags(args.json, args.quiet)
    }

    /// Create from CLI-style flags. `json` wins over `quiet`.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Plain
        };
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.mode, OutputMode::Json)
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        matches!(self.mode, OutputMode::Quiet)
    }

    /// A stdout line, shown in plain mode only.
    pub fn print(&self, content: &str) {
        if self.mode == OutputMode::Plain {
            println!("{content}");
        }
    }

    /// A stderr line, shown unless JSON output was requested.
    pub fn error(&self, message: &str) {
        if self.mode != OutputMode::Json {
            eprintln!("{message}");
        }
    }

    /// Pretty JSON on stdout, in JSON mode only.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json_pretty<T: Serialize>(&self, value: &T) -> Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_wins_over_quiet() {
        assert_eq!(OutputContext::from_flags(true, true).mode(), OutputMode::Json);
        assert_eq!(OutputContext::from_flags(false, true).mode(), OutputMode::Quiet);
        assert_eq!(OutputContext::from_flags(false, false).mode(), OutputMode::Plain);
    }

    #[test]
    fn json_pretty_is_silent_outside_json_mode() {
        let ctx = OutputContext::from_flags(false, false);
        assert!(ctx.json_pretty(&serde_json::json!({ "ok": true })).is_ok());
        assert!(!ctx.is_json());
        assert!(!ctx.is_quiet());
    }
}
