//! Parse configuration.

use serde::Deserialize;

/// Goal symbol of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Classic script: no `import`/`export`, sloppy mode unless opted in
    #[default]
    Script,
    /// ES module: strict, `import`/`export` allowed
    Module,
}

/// Options recognised by the entry points.
///
/// Loadable from JSON with camelCase keys; absent keys take their defaults.
///
/// ```
/// use lossless_parser::{ParseOptions, SourceType};
///
/// let options: ParseOptions = serde_json::from_str(r#"{"sourceType": "module", "range": true}"#).unwrap();
/// assert_eq!(options.source_type, SourceType::Module);
/// assert!(options.range);
/// assert!(options.jsx);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Script or module
    pub source_type: SourceType,
    /// Fill `Span::range` on nodes
    pub range: bool,
    /// Fill `Span::loc` on nodes
    pub loc: bool,
    /// Label used in error messages and locations
    pub source: Option<String>,
    /// Collect the token array
    pub tokens: bool,
    /// Collect comments
    pub comments: bool,
    /// Record recoverable errors instead of failing
    pub tolerant: bool,
    /// Accept JSX in expression position
    pub jsx: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            source_type: SourceType::Script,
            range: false,
            loc: false,
            source: None,
            tokens: false,
            comments: false,
            tolerant: false,
            jsx: true,
        }
    }
}

impl ParseOptions {
    /// Sets the goal symbol.
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Toggles byte ranges.
    pub fn with_range(mut self, range: bool) -> Self {
        self.range = range;
        self
    }

    /// Toggles line/column locations.
    pub fn with_loc(mut self, loc: bool) -> Self {
        self.loc = loc;
        self
    }

    /// Sets the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Toggles token collection.
    pub fn with_tokens(mut self, tokens: bool) -> Self {
        self.tokens = tokens;
        self
    }

    /// Toggles comment collection.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Toggles tolerant mode.
    pub fn with_tolerant(mut self, tolerant: bool) -> Self {
        self.tolerant = tolerant;
        self
    }

    /// Toggles JSX.
    pub fn with_jsx(mut self, jsx: bool) -> Self {
        self.jsx = jsx;
        self
    }

    /// True for module goal.
    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.source_type, SourceType::Script);
        assert!(options.jsx);
        assert!(!options.tolerant);
    }

    #[test]
    fn test_builders_chain() {
        let options = ParseOptions::default()
            .with_source_type(SourceType::Module)
            .with_tolerant(true)
            .with_source("app.js");
        assert!(options.is_module());
        assert!(options.tolerant);
        assert_eq!(options.source.as_deref(), Some("app.js"));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"tolerant": true, "jsx": false, "loc": true}"#).unwrap();
        assert!(options.tolerant);
        assert!(!options.jsx);
        assert!(options.loc);
        assert!(!options.range);
    }
}
