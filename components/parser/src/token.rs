//! Tokens produced by the scanner.
//!
//! A token owns the trivia (whitespace and comments) that precedes it, so
//! joining `ws_before` and `raw` for every token of a source, followed by the
//! trailing trivia, gives back the source exactly.

use crate::ast::Span;

/// Token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `true` or `false`
    BooleanLiteral,
    /// End of input
    Eof,
    /// Identifier, including contextual keywords such as `let` or `async`
    Identifier,
    /// Reserved word
    Keyword,
    /// `null`
    NullLiteral,
    /// Numeric literal
    NumericLiteral,
    /// BigInt literal (`10n`)
    BigIntLiteral,
    /// Operator or delimiter
    Punctuator,
    /// String literal
    StringLiteral,
    /// Regular expression literal
    RegularExpression,
    /// Template literal piece
    Template,
    /// `#name`
    PrivateIdentifier,
    /// JSX tag or attribute name (may contain `-`)
    JsxIdentifier,
    /// Raw text between JSX tags
    JsxText,
}

impl TokenKind {
    /// Label used in token arrays and error messages.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::BooleanLiteral => "Boolean",
            TokenKind::Eof => "<end>",
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::NullLiteral => "Null",
            TokenKind::NumericLiteral => "Numeric",
            TokenKind::BigIntLiteral => "BigInt",
            TokenKind::Punctuator => "Punctuator",
            TokenKind::StringLiteral => "String",
            TokenKind::RegularExpression => "RegularExpression",
            TokenKind::Template => "Template",
            TokenKind::PrivateIdentifier => "PrivateIdentifier",
            TokenKind::JsxIdentifier => "JSXIdentifier",
            TokenKind::JsxText => "JSXText",
        }
    }
}

/// Decoded payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Nothing beyond the raw text
    Empty,
    /// Decoded text: identifier name, cooked string, decoded JSX text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Regular expression body and flags
    RegExp {
        /// Pattern between the slashes
        pattern: String,
        /// Flags after the closing slash
        flags: String,
    },
    /// Template piece
    Template {
        /// Cooked value; `None` when the piece holds an invalid escape
        cooked: Option<String>,
        /// Starts with a backtick
        head: bool,
        /// Ends with a backtick
        tail: bool,
    },
}

/// A scanned token with its leading trivia.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// Category
    pub kind: TokenKind,
    /// Decoded payload
    pub value: TokenValue,
    /// Exact source text of the token
    pub raw: &'a str,
    /// Whitespace and comments between the previous token and this one
    pub ws_before: &'a str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset just past the last character
    pub end: usize,
    /// Line of the first character (1-based)
    pub line: u32,
    /// Column of the first character (0-based)
    pub column: u32,
    /// Byte offset of the start of `line`
    pub line_start: usize,
    /// Line of the end position
    pub end_line: u32,
    /// Column of the end position
    pub end_column: u32,
    /// The trivia before this token contains a line terminator
    pub newline_before: bool,
    /// Legacy octal literal, or a string containing an octal escape
    pub octal: bool,
    /// Identifier spelled with unicode escapes
    pub escaped: bool,
}

impl<'a> Token<'a> {
    /// True for the given punctuator.
    pub fn is_punctuator(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.raw == punct
    }

    /// True for the given reserved word.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.raw == keyword
    }

    /// True for an unescaped identifier with the given name.
    pub fn is_contextual(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && !self.escaped && self.raw == name
    }

    /// Decoded text when present, raw spelling otherwise.
    pub fn text(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            _ => self.raw,
        }
    }

    /// True at end of input.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Comment flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`, hashbang, or HTML-like comment
    Line,
    /// `/* ... */`
    Block,
}

/// A comment recorded for passthrough when comment collection is on.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Flavour
    pub kind: CommentKind,
    /// Text without the delimiters
    pub value: String,
    /// Extent of the whole comment
    pub span: Span,
}

/// Entry of the token array returned when token collection is on.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenEntry {
    /// Token category label, for example `Punctuator`
    pub kind: &'static str,
    /// Raw spelling
    pub value: String,
    /// Extent
    pub span: Span,
}
