//! Error types for the CLI

use core_types::JsError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Source failed to parse
    #[error("Syntax error: {0}")]
    Syntax(#[from] JsError),

    /// Options file could not be read as JSON
    #[error("Config error: {0}")]
    Config(String),

    /// Printed text differs from the input
    #[error("Round trip differs from input at byte {0}")]
    Mismatch(usize),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ErrorKind;

    #[test]
    fn test_syntax_error_display() {
        let error: CliError = JsError::new(ErrorKind::Grammar, "Unexpected token )", 3, 1, 4).into();
        assert_eq!(error.to_string(), "Syntax error: Line 1: Unexpected token )");
    }

    #[test]
    fn test_config_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(CliError::from(json_error), CliError::Config(_)));
    }
}
