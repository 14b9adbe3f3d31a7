//! Behavioural properties of the parser as a whole.

use lossless_parser::ast::*;
use lossless_parser::error::messages;
use lossless_parser::{parse_script, ErrorKind, ParseOptions, Unparse};
use pretty_assertions::assert_eq;

fn script(source: &str) -> Program {
    parse_script(source, &ParseOptions::default()).unwrap().program
}

const SAMPLES: &[&str] = &[
    "var a = 1 /* one */ ;\n",
    "function f(x, ...rest) {\n  return x ?? rest[0];\n}\r\n",
    "class A { static #count = 0; get count() { return A.#count } }",
    "label: for (const [k, v] of Object.entries(o)) if (k) continue label\n",
    "x = <List items={[1, 2]}>{items.map(i => <Item key={i} />)}</List>;",
];

#[test]
fn test_round_trip_identity() {
    for source in SAMPLES {
        assert_eq!(script(source).unparse(), *source);
    }
}

#[test]
fn test_reparse_is_idempotent() {
    for source in SAMPLES {
        let first = script(source);
        let second = script(&first.unparse());
        assert_eq!(first, second);
    }
}

#[test]
fn test_literal_edit_changes_only_its_span() {
    let source = "let a = 1, b = 'old';  // keep\nconsole.log(a, b);\n";
    let mut program = script(source);
    let Statement::Variable(declaration) = &mut program.body[0] else {
        panic!("expected variable declaration");
    };
    let Some(Initializer {
        value: Expression::Literal(literal),
        ..
    }) = &mut declaration.declarations[1].init
    else {
        panic!("expected literal initializer");
    };
    literal.set_value(LiteralValue::String("new".to_string()));
    assert_eq!(program.unparse(), "let a = 1, b = 'new';  // keep\nconsole.log(a, b);\n");
}

#[test]
fn test_negative_literal_edit_stays_one_operand() {
    let mut program = script("x = a-5");
    let Statement::Expression(statement) = &mut program.body[0] else {
        panic!("expected expression statement");
    };
    let Expression::Assignment { right, .. } = &mut statement.expression else {
        panic!("expected assignment");
    };
    let Expression::Binary { right, .. } = right.as_mut() else {
        panic!("expected subtraction");
    };
    let Expression::Literal(literal) = right.as_mut() else {
        panic!("expected literal operand");
    };
    literal.set_value(LiteralValue::Number(-1.0));
    let printed = program.unparse();
    assert_eq!(printed, "x = a-(-1)");
    assert_eq!(script(&printed).unparse(), printed);
}

#[test]
fn test_identifier_edit_keeps_trivia() {
    let mut program = script("call( /* arg */ value );");
    let Statement::Expression(statement) = &mut program.body[0] else {
        panic!("expected expression statement");
    };
    let Expression::Call(call) = &mut statement.expression else {
        panic!("expected call");
    };
    let Expression::Identifier(id) = &mut call.arguments.items[0] else {
        panic!("expected identifier argument");
    };
    id.set_name("renamed");
    assert_eq!(program.unparse(), "call( /* arg */ renamed );");
}

#[test]
fn test_asi_splits_on_newline() {
    let program = script("a\nb");
    assert_eq!(program.body.len(), 2);
    let Statement::Expression(first) = &program.body[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(first.semicolon.spelling, "");

    let program = script("a;b");
    assert_eq!(program.body.len(), 2);
    let Statement::Expression(first) = &program.body[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(first.semicolon.spelling, ";");
}

#[test]
fn test_closing_brace_ends_block() {
    let program = script("{a}");
    assert_eq!(program.body.len(), 1);
    assert!(matches!(program.body[0], Statement::Block(_)));
    assert!(parse_script("a b", &ParseOptions::default()).is_err());
}

#[test]
fn test_cover_grammar_disambiguation() {
    let Statement::Expression(statement) = &script("(a, b)").body[0] else {
        panic!("expected expression statement");
    };
    let Expression::Parenthesized { expression, .. } = &statement.expression else {
        panic!("expected parenthesized expression, got {:?}", statement.expression);
    };
    assert!(matches!(**expression, Expression::Sequence { .. }));

    let Statement::Expression(statement) = &script("(a, b) => a").body[0] else {
        panic!("expected expression statement");
    };
    let Expression::Arrow(arrow) = &statement.expression else {
        panic!("expected arrow function");
    };
    let ArrowParameters::Parenthesized(params) = &arrow.params else {
        panic!("expected parameter list");
    };
    assert_eq!(params.items.len(), 2);

    let error = parse_script("(...a) ", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::CoverGrammar);
}

#[test]
fn test_jsx_round_trip_and_tag_matching() {
    let source = "<a b={1}>{x}<c/></a>";
    assert_eq!(script(source).unparse(), source);

    let error = parse_script("<a b={1}>{x}<c/></z>", &ParseOptions::default()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Jsx);
    assert_eq!(error.message, messages::mismatched_closing_tag("a"));
}

#[test]
fn test_tolerant_mode_collects_errors() {
    let options = ParseOptions::default().with_tolerant(true);
    let output = parse_script("let let = 1;", &options).unwrap();
    assert_eq!(output.program.body.len(), 1);
    assert!(!output.errors.is_empty());
    assert_eq!(output.errors[0].message, messages::LET_IN_LEXICAL_BINDING);

    assert!(parse_script("let let = 1;", &ParseOptions::default()).is_err());
}

#[test]
fn test_tolerant_mode_keeps_invalid_targets() {
    let options = ParseOptions::default().with_tolerant(true);
    let cases = [
        ("1 = 2;", messages::INVALID_LHS_IN_ASSIGNMENT),
        ("++f();", messages::INVALID_LHS_IN_ASSIGNMENT),
        ("f()--;", messages::INVALID_LHS_IN_ASSIGNMENT),
        ("[a + b] = c;", messages::INVALID_LHS_IN_ASSIGNMENT),
        ("for (a + b in c);", messages::INVALID_LHS_IN_FOR_IN),
    ];
    for (source, message) in cases {
        let output = parse_script(source, &options).unwrap();
        assert_eq!(output.errors.len(), 1, "{}", source);
        assert_eq!(output.errors[0].message, message);
        assert_eq!(output.errors[0].kind, ErrorKind::Grammar);
        assert_eq!(output.program.unparse(), source);

        let error = parse_script(source, &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, message);
    }
}
