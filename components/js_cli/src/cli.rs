//! Command line arguments

use crate::error::CliResult;
use clap::{Parser, ValueEnum};
use lossless_parser::{ParseOptions, SourceType};
use std::path::PathBuf;

/// What to print after a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PrintMode {
    /// The reconstructed source text
    #[default]
    Source,
    /// One line per token
    Tokens,
    /// One line per comment
    Comments,
    /// Errors collected in tolerant mode
    Errors,
    /// Only verify that the reconstruction matches the input
    Check,
}

/// Lossless JavaScript/JSX parser front end
#[derive(Debug, Parser)]
#[command(name = "js-roundtrip", version, about)]
pub struct Cli {
    /// Source file to parse
    pub file: Option<PathBuf>,

    /// Parse this text instead of a file
    #[arg(short, long)]
    pub eval: Option<String>,

    /// Parse as an ES module
    #[arg(short, long)]
    pub module: bool,

    /// Collect recoverable errors instead of stopping at the first
    #[arg(short, long)]
    pub tolerant: bool,

    /// Reject JSX syntax
    #[arg(long)]
    pub no_jsx: bool,

    /// JSON file with parse options (camelCase keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output to produce
    #[arg(short, long, value_enum, default_value_t = PrintMode::Source)]
    pub print: PrintMode,

    /// Start the interactive shell
    #[arg(short, long)]
    pub repl: bool,
}

impl Cli {
    /// Options from `--config`, overridden by explicit flags.
    pub fn parse_options(&self) -> CliResult<ParseOptions> {
        let mut options = match &self.config {
            Some(path) => {
                log::debug!("loading parse options from {}", path.display());
                serde_json::from_str(&std::fs::read_to_string(path)?)?
            }
            None => ParseOptions::default(),
        };
        if self.module {
            options.source_type = SourceType::Module;
        }
        if self.tolerant || self.print == PrintMode::Errors {
            options.tolerant = true;
        }
        if self.no_jsx {
            options.jsx = false;
        }
        match self.print {
            PrintMode::Tokens => options.tokens = true,
            PrintMode::Comments => options.comments = true,
            _ => {}
        }
        if options.source.is_none() {
            options.source = self.file.as_ref().map(|path| path.display().to_string());
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from(["js-roundtrip", "app.mjs", "--module", "--no-jsx"]).unwrap();
        let options = cli.parse_options().unwrap();
        assert_eq!(options.source_type, SourceType::Module);
        assert!(!options.jsx);
        assert_eq!(options.source.as_deref(), Some("app.mjs"));
    }

    #[test]
    fn test_print_mode_enables_collection() {
        let cli = Cli::try_parse_from(["js-roundtrip", "-e", "x", "--print", "tokens"]).unwrap();
        assert!(cli.parse_options().unwrap().tokens);
        let cli = Cli::try_parse_from(["js-roundtrip", "-e", "x", "--print", "errors"]).unwrap();
        assert!(cli.parse_options().unwrap().tolerant);
    }
}
