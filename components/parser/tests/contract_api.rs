//! Contract tests for the public parser API
//!
//! These tests exercise the crate only through its exported surface.

use lossless_parser::ast::*;
use lossless_parser::error::messages;
use lossless_parser::{
    join_into, parse, parse_module, parse_script, Delegate, ErrorKind, JsError, LexMode, NodeKind, ParseOptions,
    Parser, Scanner, Separators, SourceType, Span, TokenKind, Unparse,
};

// =============================================================================
// Scanner Contract Tests
// =============================================================================

#[test]
fn test_scanner_attaches_trivia_to_next_token() {
    let mut scanner = Scanner::new("  /* c */ x");
    let token = scanner.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.ws_before, "  /* c */ ");
    assert_eq!(token.raw, "x");
    assert!(scanner.next_token().unwrap().is_eof());
}

#[test]
fn test_scanner_save_and_restore() {
    let mut scanner = Scanner::new("a b");
    let state = scanner.save_state();
    let first = scanner.next_token().unwrap();
    scanner.restore_state(state);
    let again = scanner.next_token().unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_scanner_newline_flag() {
    let mut scanner = Scanner::new("a\nb");
    assert!(!scanner.next_token().unwrap().newline_before);
    assert!(scanner.next_token().unwrap().newline_before);
}

#[test]
fn test_scanner_jsx_modes() {
    let mut scanner = Scanner::new("data-id text");
    scanner.set_mode(LexMode::JsxTag);
    let name = scanner.next_token().unwrap();
    assert_eq!(name.kind, TokenKind::JsxIdentifier);
    assert_eq!(name.raw, "data-id");
    scanner.set_mode(LexMode::JsxText);
    let text = scanner.next_token().unwrap();
    assert_eq!(text.kind, TokenKind::JsxText);
    assert_eq!(text.raw, " text");
}

#[test]
fn test_scanner_reports_unterminated_string() {
    let mut scanner = Scanner::new("'abc");
    let error: JsError = scanner.next_token().unwrap_err();
    assert_eq!(error.kind, ErrorKind::Scanner);
}

// =============================================================================
// Entry Point Contract Tests
// =============================================================================

#[test]
fn test_parse_dispatches_on_source_type() {
    let module = ParseOptions::default().with_source_type(SourceType::Module);
    let output = parse("export const a = 1;", &module).unwrap();
    assert_eq!(output.program.source_type, SourceType::Module);
    assert!(parse("export const a = 1;", &ParseOptions::default()).is_err());
}

#[test]
fn test_modules_are_strict() {
    let error = parse_module("with (a) b;", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.message, messages::STRICT_MODE_WITH);
    assert!(parse_script("with (a) b;", &ParseOptions::default()).is_ok());
}

#[test]
fn test_options_from_json() {
    let options: ParseOptions =
        serde_json::from_str(r#"{"sourceType": "module", "tolerant": true, "jsx": false}"#).unwrap();
    assert_eq!(options.source_type, SourceType::Module);
    assert!(options.tolerant);
    assert!(!options.jsx);
    assert!(!options.range);
}

#[test]
fn test_error_position_is_reported() {
    let error = parse_script("var a = 1;\nvar = 2;", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Grammar);
    assert_eq!(error.line, 2);
    assert_eq!(error.column, 5);
    assert_eq!(error.index, 15);
}

#[test]
fn test_tolerant_output_keeps_tree_and_errors() {
    let options = ParseOptions::default().with_tolerant(true);
    let output = parse_script("function f() { 'use strict'; var eval; }", &options).unwrap();
    assert_eq!(output.program.body.len(), 1);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].message, messages::STRICT_VAR_NAME);
}

#[test]
fn test_unexpected_end_of_input() {
    let error = parse_script("if (a", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.message, messages::UNEXPECTED_EOS);
}

// =============================================================================
// Delegate Contract Tests
// =============================================================================

struct Counter {
    jsx_nodes: usize,
    ranges: Vec<(usize, usize)>,
}

impl Delegate for Counter {
    fn node_finalized(&mut self, kind: NodeKind, span: &Span) {
        if kind.name().starts_with("JSX") {
            self.jsx_nodes += 1;
        }
        if let Some(range) = span.range {
            self.ranges.push(range);
        }
    }
}

#[test]
fn test_delegate_receives_every_node() {
    let mut counter = Counter {
        jsx_nodes: 0,
        ranges: Vec::new(),
    };
    let options = ParseOptions::default().with_range(true);
    let parser = Parser::new("<a>hi</a>;", options).unwrap().with_delegate(&mut counter);
    parser.parse_program().unwrap();
    // identifier, opening, text, identifier, closing, element
    assert_eq!(counter.jsx_nodes, 6);
    assert_eq!(counter.ranges.last(), Some(&(0, 10)));
}

// =============================================================================
// Unparse Contract Tests
// =============================================================================

#[test]
fn test_constructed_nodes_use_default_spacing() {
    let items = vec![
        Expression::Identifier(Identifier::new("a")),
        Expression::Identifier(Identifier::new("b")),
    ];
    let mut out = String::new();
    join_into(&mut out, &items, Separators::PerPosition(&[], ", "));
    assert_eq!(out, "a, b");
}

#[test]
fn test_new_literal_has_canonical_spelling() {
    let literal = Literal::new(LiteralValue::String("it's".to_string()));
    assert_eq!(literal.raw(), "\"it's\"");
    assert_eq!(Literal::new(LiteralValue::Number(0.5)).raw(), "0.5");
}

#[test]
fn test_unparse_of_subtree() {
    let program = parse_script("foo( a ,b )", &ParseOptions::default()).unwrap().program;
    let Statement::Expression(statement) = &program.body[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(statement.expression.unparse(), "foo( a ,b )");
}
