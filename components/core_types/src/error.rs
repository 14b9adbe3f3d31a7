//! Structured syntax errors.
//!
//! Every error the scanner or parser raises is a [`JsError`]: a message plus
//! the index, line and column of the offending token, and the configured
//! source label when there is one.

use serde::Serialize;
use thiserror::Error;

/// The stage of parsing that detected an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Illegal character, unterminated literal, invalid escape
    Scanner,
    /// Unexpected token, invalid assignment target, bad label and the like
    Grammar,
    /// A parenthesized group that is neither an expression nor a parameter list
    CoverGrammar,
    /// Unterminated tag, mismatched closing tag, invalid attribute
    Jsx,
}

/// A syntax error with its location.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
///
/// let error = JsError::new(ErrorKind::Scanner, "Invalid or unexpected token", 7, 2, 3)
///     .with_source(Some("main.js".to_string()));
/// assert_eq!(error.to_string(), "main.js:Line 2: Invalid or unexpected token");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}Line {line}: {message}", source_prefix(.source_name))]
pub struct JsError {
    /// Which stage raised the error
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Byte offset of the offending token
    pub index: usize,
    /// Line of the offending token (1-based)
    pub line: u32,
    /// Column of the offending token (1-based)
    pub column: u32,
    /// Source label, when one was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

fn source_prefix(source: &Option<String>) -> String {
    match source {
        Some(label) => format!("{}:", label),
        None => String::new(),
    }
}

impl JsError {
    /// Creates an error without a source label.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        index: usize,
        line: u32,
        column: u32,
    ) -> Self {
        JsError {
            kind,
            message: message.into(),
            index,
            line,
            column,
            source_name: None,
        }
    }

    /// Attaches a source label.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source_name = source;
        self
    }

    /// Returns the bare message without the location prefix.
    pub fn description(&self) -> &str {
        &self.message
    }
}

/// Result alias used throughout the parser.
pub type JsResult<T> = Result<T, JsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_error_display() {
        let error = JsError::new(ErrorKind::Grammar, "Unexpected token ;", 10, 2, 4);
        assert_eq!(error.to_string(), "Line 2: Unexpected token ;");
        assert_eq!(error.description(), "Unexpected token ;");
    }

    #[test]
    fn test_js_error_display_with_source() {
        let error = JsError::new(ErrorKind::Jsx, "Unterminated tag", 0, 1, 1)
            .with_source(Some("view.jsx".to_string()));
        assert_eq!(error.to_string(), "view.jsx:Line 1: Unterminated tag");
    }

    #[test]
    fn test_js_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&JsError::new(ErrorKind::Scanner, "x", 0, 1, 1));
    }
}
