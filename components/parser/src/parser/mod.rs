//! Recursive descent parser
//!
//! The parser keeps exactly one token of lookahead. Every node records the
//! trivia of the tokens it consumes itself, so the tree can be unparsed back
//! to the original text. Statements and declarations live in `statement`,
//! expressions in `expression`, functions and classes in `function`, cover
//! grammar handling in `pattern`, modules in `module` and JSX in `jsx`.

mod expression;
mod function;
mod jsx;
mod module;
mod pattern;
mod statement;

use crate::ast::{NodeKind, Program, Semicolon, Span};
use crate::error::{messages, ErrorHandler, ErrorSite};
use crate::options::{ParseOptions, SourceType};
use crate::scanner::{Scanner, ScannerState};
use crate::token::{Comment, Token, TokenEntry, TokenKind};
use crate::character::is_strict_mode_reserved_word;
use core_types::{ErrorKind, JsError, JsResult, SourceLocation, SourcePosition};

/// Receives every node as it is finalized, children before parents.
pub trait Delegate {
    /// Called once per finished node with its kind and extent.
    fn node_finalized(&mut self, kind: NodeKind, span: &Span);
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// The tree
    pub program: Program,
    /// Errors recorded in tolerant mode
    pub errors: Vec<JsError>,
    /// Token array, when requested
    pub tokens: Option<Vec<TokenEntry>>,
    /// Comments, when requested
    pub comments: Option<Vec<Comment>>,
}

/// Snapshot of a position taken before parsing a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Marker {
    pub index: usize,
    pub line: u32,
    /// 0-based
    pub column: u32,
}

impl Marker {
    pub fn site(self) -> ErrorSite {
        ErrorSite {
            index: self.index,
            line: self.line,
            column: self.column + 1,
        }
    }
}

/// Parse-time flags, saved and restored around nested functions.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    /// Strict mode code
    pub strict: bool,
    /// Module goal
    pub is_module: bool,
    /// `in` is a relational operator (false in a `for` head)
    pub allow_in: bool,
    /// `yield` is an operator
    pub allow_yield: bool,
    /// `await` is an operator
    pub is_async: bool,
    /// Inside a function body (`return` and `new.target` allowed)
    pub in_function_body: bool,
    /// Inside a loop (`continue` allowed)
    pub in_iteration: bool,
    /// Inside a switch (`break` allowed)
    pub in_switch: bool,
    /// Parsing formal parameters (`yield`/`await` expressions rejected)
    pub in_parameters: bool,
    /// Labels in scope
    pub labels: Vec<String>,
    /// First `{ a = 1 }` shorthand awaiting reinterpretation as a pattern
    pub cover_initialized_name: Option<ErrorSite>,
}

impl Context {
    fn new(is_module: bool) -> Self {
        Context {
            strict: is_module,
            is_module,
            allow_in: true,
            allow_yield: false,
            is_async: is_module,
            in_function_body: false,
            in_iteration: false,
            in_switch: false,
            in_parameters: false,
            labels: Vec::new(),
            cover_initialized_name: None,
        }
    }
}

/// JavaScript parser producing a lossless tree.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    options: ParseOptions,
    handler: ErrorHandler,
    delegate: Option<&'a mut dyn Delegate>,
    lookahead: Token<'a>,
    /// Scanner state before `lookahead` was scanned, for relexing
    before_lookahead: ScannerState,
    /// End of the last consumed token
    last_end: Marker,
    context: Context,
    tokens: Vec<TokenEntry>,
    jsx_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and scans the first token.
    pub fn new(source: &'a str, options: ParseOptions) -> JsResult<Self> {
        let is_module = options.is_module();
        let mut scanner = Scanner::new(source)
            .with_module(is_module)
            .with_comments(options.comments);
        let handler = ErrorHandler::new(options.tolerant, options.source.clone());
        let before_lookahead = scanner.save_state();
        let lookahead = scanner.next_token().map_err(|e| handler.label(e))?;
        Ok(Parser {
            scanner,
            options,
            handler,
            delegate: None,
            lookahead,
            before_lookahead,
            last_end: Marker::default(),
            context: Context::new(is_module),
            tokens: Vec::new(),
            jsx_depth: 0,
        })
    }

    /// Installs a delegate notified of every finalized node.
    pub fn with_delegate(mut self, delegate: &'a mut dyn Delegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Parses the whole input as a script or module, per the options.
    pub fn parse_program(mut self) -> JsResult<ParseOutput> {
        let marker = self.start_node();
        let source_type = self.options.source_type;
        let mut body = self.parse_directive_prologue()?;
        while !self.lookahead.is_eof() {
            let statement = match source_type {
                SourceType::Module => self.parse_module_item()?,
                SourceType::Script => self.parse_statement_list_item()?,
            };
            body.push(statement);
        }
        let ws_after = self.lookahead.ws_before.to_string();
        let span = self.finalize(marker, NodeKind::Program);
        let program = Program {
            source_type,
            body,
            ws_after,
            span,
        };
        let comments = if self.options.comments {
            Some(self.scanner.take_comments())
        } else {
            None
        };
        let tokens = if self.options.tokens {
            Some(std::mem::take(&mut self.tokens))
        } else {
            None
        };
        Ok(ParseOutput {
            program,
            errors: self.handler.into_errors(),
            tokens,
            comments,
        })
    }

    // ==================== Token plumbing ====================

    /// Consumes the lookahead, scans the next token and returns the consumed one.
    pub(crate) fn next_token(&mut self) -> JsResult<Token<'a>> {
        let state = self.scanner.save_state();
        let next = self.scanner.next_token().map_err(|e| self.handler.label(e))?;
        let token = std::mem::replace(&mut self.lookahead, next);
        self.before_lookahead = state;
        self.last_end = Marker {
            index: token.end,
            line: token.end_line,
            column: token.end_column,
        };
        if self.options.tokens && !token.is_eof() {
            let span = self.span_between(
                Marker {
                    index: token.start,
                    line: token.line,
                    column: token.column,
                },
                self.last_end,
            );
            self.tokens.push(TokenEntry {
                kind: token.kind.label(),
                value: token.raw.to_string(),
                span,
            });
        }
        Ok(token)
    }

    /// Scans the token after the lookahead without consuming anything.
    pub(crate) fn peek_token(&mut self) -> JsResult<Token<'a>> {
        let state = self.scanner.save_state();
        let token = self.scanner.next_token();
        self.scanner.restore_state(state);
        token.map_err(|e| self.handler.label(e))
    }

    /// Rewinds to just before the lookahead and scans it again under the
    /// current lexer mode.
    pub(crate) fn relex_lookahead(&mut self) -> JsResult<()> {
        self.scanner.restore_state(self.before_lookahead.clone());
        self.lookahead = self.scanner.next_token().map_err(|e| self.handler.label(e))?;
        Ok(())
    }

    /// Rescans a `/` or `/=` lookahead as a regular expression literal.
    pub(crate) fn relex_regex(&mut self) -> JsResult<()> {
        self.scanner.restore_state(self.before_lookahead.clone());
        self.lookahead = self.scanner.next_regex_token().map_err(|e| self.handler.label(e))?;
        Ok(())
    }

    pub(crate) fn matches(&self, punct: &str) -> bool {
        self.lookahead.is_punctuator(punct)
    }

    pub(crate) fn matches_keyword(&self, keyword: &str) -> bool {
        self.lookahead.is_keyword(keyword)
    }

    pub(crate) fn matches_contextual(&self, name: &str) -> bool {
        self.lookahead.is_contextual(name)
    }

    /// Consumes `punct` and returns its leading trivia.
    pub(crate) fn expect(&mut self, punct: &str) -> JsResult<String> {
        if !self.matches(punct) {
            return Err(self.unexpected(&self.lookahead));
        }
        Ok(self.next_token()?.ws_before.to_string())
    }

    /// Consumes the reserved word `keyword` and returns its leading trivia.
    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> JsResult<String> {
        if !self.matches_keyword(keyword) {
            return Err(self.unexpected(&self.lookahead));
        }
        Ok(self.next_token()?.ws_before.to_string())
    }

    /// Consumes the contextual keyword `name` and returns its leading trivia.
    pub(crate) fn expect_contextual(&mut self, name: &str) -> JsResult<String> {
        if !self.matches_contextual(name) {
            return Err(self.unexpected(&self.lookahead));
        }
        Ok(self.next_token()?.ws_before.to_string())
    }

    /// Consumes `,` and returns its spelling with trivia.
    pub(crate) fn expect_separator(&mut self) -> JsResult<String> {
        let ws = self.expect(",")?;
        Ok(ws + ",")
    }

    /// Explicit `;`, or an inserted one before `}`, end of input or a line break.
    pub(crate) fn consume_semicolon(&mut self) -> JsResult<Semicolon> {
        if self.matches(";") {
            let token = self.next_token()?;
            return Ok(Semicolon {
                ws_before: token.ws_before.to_string(),
                spelling: ";".to_string(),
            });
        }
        if self.lookahead.newline_before || self.matches("}") || self.lookahead.is_eof() {
            return Ok(Semicolon::inserted());
        }
        Err(self.unexpected(&self.lookahead))
    }

    // ==================== Positions ====================

    pub(crate) fn start_node(&self) -> Marker {
        Marker {
            index: self.lookahead.start,
            line: self.lookahead.line,
            column: self.lookahead.column,
        }
    }

    pub(crate) fn span_between(&self, start: Marker, end: Marker) -> Span {
        let range = if self.options.range {
            Some((start.index, end.index))
        } else {
            None
        };
        let loc = if self.options.loc {
            Some(
                SourceLocation::new(
                    SourcePosition::new(start.line, start.column, start.index),
                    SourcePosition::new(end.line, end.column, end.index),
                )
                .with_source(self.options.source.clone()),
            )
        } else {
            None
        };
        Span { range, loc }
    }

    /// Closes a node that started at `marker` and ends at the last consumed token.
    pub(crate) fn finalize(&mut self, marker: Marker, kind: NodeKind) -> Span {
        let end = self.last_end;
        self.finalize_at(marker, end, kind)
    }

    pub(crate) fn finalize_at(&mut self, marker: Marker, end: Marker, kind: NodeKind) -> Span {
        let span = self.span_between(marker, end);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.node_finalized(kind, &span);
        }
        span
    }

    // ==================== Errors ====================

    pub(crate) fn token_site(token: &Token<'_>) -> ErrorSite {
        ErrorSite {
            index: token.start,
            line: token.line,
            column: token.column + 1,
        }
    }

    /// `Unexpected ...` error for `token`, worded by token category.
    pub(crate) fn unexpected(&self, token: &Token<'_>) -> JsError {
        let message = match token.kind {
            TokenKind::Eof => messages::UNEXPECTED_EOS.to_string(),
            TokenKind::NumericLiteral | TokenKind::BigIntLiteral => messages::UNEXPECTED_NUMBER.to_string(),
            TokenKind::StringLiteral => messages::UNEXPECTED_STRING.to_string(),
            TokenKind::Template => messages::UNEXPECTED_TEMPLATE.to_string(),
            TokenKind::Keyword => messages::unexpected_token(token.raw),
            TokenKind::Identifier if self.context.strict && is_strict_mode_reserved_word(token.raw) => {
                messages::UNEXPECTED_RESERVED.to_string()
            }
            TokenKind::Identifier => messages::UNEXPECTED_IDENTIFIER.to_string(),
            _ => messages::unexpected_token(token.raw),
        };
        self.handler
            .throw_error(Self::token_site(token), ErrorKind::Grammar, message)
    }

    /// Builds an error at a token.
    pub(crate) fn error_at(&self, token: &Token<'_>, kind: ErrorKind, message: impl Into<String>) -> JsError {
        self.handler.throw_error(Self::token_site(token), kind, message)
    }

    /// Builds an error at a position.
    pub(crate) fn error_at_site(&self, site: ErrorSite, kind: ErrorKind, message: impl Into<String>) -> JsError {
        self.handler.throw_error(site, kind, message)
    }

    /// Records a recoverable grammar error, or fails when not tolerant.
    pub(crate) fn tolerate_site(&mut self, site: ErrorSite, message: impl Into<String>) -> JsResult<()> {
        let error = self.handler.create_error(site, ErrorKind::Grammar, message);
        self.handler.tolerate(error)
    }

    pub(crate) fn tolerate_at(&mut self, token: &Token<'_>, message: impl Into<String>) -> JsResult<()> {
        self.tolerate_site(Self::token_site(token), message)
    }

    // ==================== Context ====================

    /// Runs `f` under `context`, restoring the current context afterwards.
    pub(crate) fn with_context<T>(
        &mut self,
        context: Context,
        f: impl FnOnce(&mut Self) -> JsResult<T>,
    ) -> JsResult<T> {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Runs `f` with `allow_in` set as given.
    pub(crate) fn with_allow_in<T>(
        &mut self,
        allow_in: bool,
        f: impl FnOnce(&mut Self) -> JsResult<T>,
    ) -> JsResult<T> {
        let saved = self.context.allow_in;
        self.context.allow_in = allow_in;
        let result = f(self);
        self.context.allow_in = saved;
        result
    }
}

/// Parses `source` according to `options`.
///
/// ```
/// use lossless_parser::{parse, ParseOptions, Unparse};
///
/// let source = "let x = 1 /* one */;\n";
/// let output = parse(source, &ParseOptions::default()).unwrap();
/// assert_eq!(output.program.unparse(), source);
/// ```
pub fn parse(source: &str, options: &ParseOptions) -> JsResult<ParseOutput> {
    Parser::new(source, options.clone())?.parse_program()
}

/// Parses `source` as a script.
pub fn parse_script(source: &str, options: &ParseOptions) -> JsResult<ParseOutput> {
    parse(source, &options.clone().with_source_type(SourceType::Script))
}

/// Parses `source` as a module.
pub fn parse_module(source: &str, options: &ParseOptions) -> JsResult<ParseOutput> {
    parse(source, &options.clone().with_source_type(SourceType::Module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unparse::Unparse;

    fn script(source: &str) -> Program {
        parse_script(source, &ParseOptions::default()).unwrap().program
    }

    #[test]
    fn test_parse_round_trips_trivia() {
        let source = "  a /* x */ ;\n// tail\n";
        assert_eq!(script(source).unparse(), source);
    }

    #[test]
    fn test_ranges_and_locations() {
        let options = ParseOptions::default().with_range(true).with_loc(true);
        let output = parse_script("\n  foo;", &options).unwrap();
        assert_eq!(output.program.span.range, Some((3, 7)));
        let loc = output.program.span.loc.unwrap();
        assert_eq!(loc.start.line, 2);
        assert_eq!(loc.start.column, 2);
    }

    #[test]
    fn test_token_collection() {
        let options = ParseOptions::default().with_tokens(true);
        let output = parse_script("a = 1", &options).unwrap();
        let kinds: Vec<_> = output.tokens.unwrap().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec!["Identifier", "Punctuator", "Numeric"]);
    }

    #[test]
    fn test_comment_collection() {
        let options = ParseOptions::default().with_comments(true);
        let output = parse_script("/* a */ x; // b", &options).unwrap();
        let comments = output.comments.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].value, " b");
    }

    #[test]
    fn test_regex_token_in_token_array() {
        let options = ParseOptions::default().with_tokens(true);
        let output = parse_script("x = /a+/g", &options).unwrap();
        let tokens = output.tokens.unwrap();
        assert_eq!(tokens[2].kind, "RegularExpression");
        assert_eq!(tokens[2].value, "/a+/g");
    }

    struct Recorder(Vec<NodeKind>);

    impl Delegate for Recorder {
        fn node_finalized(&mut self, kind: NodeKind, _span: &Span) {
            self.0.push(kind);
        }
    }

    #[test]
    fn test_delegate_sees_nodes_bottom_up() {
        let mut recorder = Recorder(Vec::new());
        let parser = Parser::new("a + 1;", ParseOptions::default())
            .unwrap()
            .with_delegate(&mut recorder);
        parser.parse_program().unwrap();
        assert_eq!(
            recorder.0,
            vec![
                NodeKind::Identifier,
                NodeKind::Literal,
                NodeKind::BinaryExpression,
                NodeKind::ExpressionStatement,
                NodeKind::Program,
            ]
        );
    }

    #[test]
    fn test_source_label_on_errors() {
        let options = ParseOptions::default().with_source("app.js");
        let err = parse_script("a b", &options).unwrap_err();
        assert_eq!(err.source_name.as_deref(), Some("app.js"));
        assert_eq!(err.to_string(), "app.js:Line 1: Unexpected identifier");
    }
}
