//! Parse-and-print driver shared by the one-shot command and the shell.

use crate::cli::PrintMode;
use crate::error::{CliError, CliResult};
use lossless_parser::{parse, ParseOptions, RenderContext, Unparse};
use std::fmt::Write as _;
use std::path::Path;

/// Parses sources with fixed options and renders the requested output.
#[derive(Debug, Clone)]
pub struct Session {
    options: ParseOptions,
    print: PrintMode,
}

impl Session {
    /// Create a session printing reconstructed source.
    ///
    /// # Example
    /// ```
    /// use js_cli::Session;
    /// use lossless_parser::ParseOptions;
    ///
    /// let session = Session::new(ParseOptions::default());
    /// assert_eq!(session.process_string("a  =1").unwrap(), "a  =1");
    /// ```
    pub fn new(options: ParseOptions) -> Self {
        Session {
            options,
            print: PrintMode::Source,
        }
    }

    /// Select the output.
    pub fn with_print(mut self, print: PrintMode) -> Self {
        self.print = print;
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Mutable options, used by shell commands.
    pub fn options_mut(&mut self) -> &mut ParseOptions {
        &mut self.options
    }

    /// Read and process a file.
    ///
    /// # Errors
    /// Returns `CliError::Io` if the file cannot be read, otherwise as
    /// [`Session::process_string`].
    pub fn process_file(&self, path: &Path) -> CliResult<String> {
        let source = std::fs::read_to_string(path)?;
        self.process_string(&source)
    }

    /// Parse `source` and render the selected output.
    ///
    /// # Errors
    /// `CliError::Syntax` when parsing fails, `CliError::Mismatch` when
    /// checking and the reconstruction differs.
    pub fn process_string(&self, source: &str) -> CliResult<String> {
        let output = parse(source, &self.options)?;
        for error in &output.errors {
            log::warn!("tolerated: {}", error);
        }
        let mut out = String::new();
        match self.print {
            PrintMode::Source => output.program.unparse_into(&mut out, RenderContext::Normal),
            PrintMode::Tokens => {
                for token in output.tokens.unwrap_or_default() {
                    let _ = writeln!(out, "{} {:?}", token.kind, token.value);
                }
            }
            PrintMode::Comments => {
                for comment in output.comments.unwrap_or_default() {
                    let _ = writeln!(out, "{:?} {:?}", comment.kind, comment.value);
                }
            }
            PrintMode::Errors => {
                for error in &output.errors {
                    let _ = writeln!(out, "{}", error);
                }
            }
            PrintMode::Check => {
                let printed = output.program.unparse();
                if let Some(offset) = first_difference(source, &printed) {
                    return Err(CliError::Mismatch(offset));
                }
                out.push_str("round trip ok\n");
            }
        }
        Ok(out)
    }
}

/// Byte offset of the first difference, if any.
fn first_difference(a: &str, b: &str) -> Option<usize> {
    if a == b {
        return None;
    }
    let common = a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count();
    Some(common)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("abc", "abc"), None);
        assert_eq!(first_difference("abc", "abd"), Some(2));
        assert_eq!(first_difference("ab", "abc"), Some(2));
    }

    #[test]
    fn test_check_mode() {
        let session = Session::new(ParseOptions::default()).with_print(PrintMode::Check);
        assert_eq!(session.process_string("f( x )\n").unwrap(), "round trip ok\n");
    }

    #[test]
    fn test_errors_mode_lists_tolerated_errors() {
        let options = ParseOptions::default().with_tolerant(true);
        let session = Session::new(options).with_print(PrintMode::Errors);
        let out = session.process_string("let let = 1;").unwrap();
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let session = Session::new(ParseOptions::default());
        assert!(matches!(session.process_string("a b"), Err(CliError::Syntax(_))));
    }
}
