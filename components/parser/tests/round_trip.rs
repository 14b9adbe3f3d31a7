//! Round-trip corpus: every source below must print back byte for byte.

use lossless_parser::{parse, ParseOptions, SourceType, Unparse};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn round_trip(source: &str, source_type: SourceType) {
    let options = ParseOptions::default().with_source_type(source_type);
    let output = parse(source, &options).unwrap_or_else(|e| panic!("{:?} failed to parse: {}", source, e));
    assert!(output.errors.is_empty(), "unexpected tolerated errors: {:?}", output.errors);
    assert_eq!(output.program.unparse(), source);
}

#[rstest]
#[case::empty("")]
#[case::only_trivia("  // nothing here\n/* at all */\n")]
#[case::hashbang("#!/usr/bin/env node\nconsole.log(1)\n")]
#[case::asi_newlines("a\nb\n++c\nreturnValue = d\n")]
#[case::explicit_semicolons("a ; b ;c;")]
#[case::crlf_line_endings("var a = 1;\r\nvar b = 2;\r\n\r\n")]
#[case::unicode_line_separators("a\u{2028}b\u{2029}")]
#[case::numbers("x = [0, 1.5, .5, 1e10, 0x1F, 0o17, 0b101, 1_000_000, 10n, 017, 08];")]
#[case::strings("s = ['a', \"b\", 'it\\'s', \"\\u0041\\x41\\n\", '\\\n'];")]
#[case::templates("t = `a${b}c${ `nested ${d}` }e`; tag`raw\\n${x}`;")]
#[case::regex("r = /ab+c/gi.test(s) ? /[/]/ : a / b / c;")]
#[case::operators("x = a ** b ** c + -d * !e - ~f % g << h >>> i & j | k ^ l;")]
#[case::logical("y = a && b || c; z = (a ?? b) || c; w ??= x; v ||= u; t &&= s;")]
#[case::optional_chain("a?.b?.[c]?.(d).e;")]
#[case::conditional("r = a ? b : c ? d : e;")]
#[case::comma_sequence("for (i = 0, j = 10; i < j; i++, j--) {}")]
#[case::object_literal("o = { a, b: 1, [c]: 2, 'd': 3, 4: 5, ...e, get f() { return 1 }, set f(v) {}, g() {}, async h() {}, *i() {}, async *j() {}, };")]
#[case::array_holes("a = [, , 1, , ...b, ];")]
#[case::destructuring("const { a, b: [c, , d = 1, ...e], ...f } = obj;")]
#[case::destructuring_assignment("({ a, b: c.d } = obj); [x, y] = [y, x];")]
#[case::arrows("f = () => {}; g = a => a * 2; h = (a, { b }, [c], d = 1, ...e) => ({ a });")]
#[case::async_arrows("f = async () => { await x; }; g = async a => a; h = async (a, b) => a + b;")]
#[case::functions("function f(a, b = 2, ...c) { return a + b; }\nfunction s(a) { 'use strict'; return a; }\nfunction* g() { yield; yield* h(); }\nasync function i() { for await (const x of y) {} }")]
#[case::classes("class A extends B { #x = 1; static y; static { init(); } constructor() { super(); } get z() { return this.#x; } static async *w() {} #m() { return this.#x; } }")]
#[case::class_expression("C = class Named { 'quoted'() {} [computed] = 2 };")]
#[case::control_flow("if (a) b; else if (c) { d } else e\nwhile (x) { if (y) break; else continue }\ndo x++; while (x < 10)\n")]
#[case::for_forms("for (;;) {}\nfor (var i in o);\nfor (let [k, v] of m) {}\nfor (x.y of z) {}\nfor (const k in o) {}")]
#[case::labels("outer: for (;;) { inner: while (true) { continue outer; break inner; } }")]
#[case::switch("switch (x) {\n  case 1:\n  case 2: f(); break;\n  default:\n    g()\n}")]
#[case::try_catch("try { a() } catch { b() } finally { c() }\ntry {} catch ({ message }) {}")]
#[case::misc_statements("debugger;\nthrow new Error('x')\n;;\n{ }\nwith (o) p;")]
#[case::new_and_calls("new A; new A.B(); new (f())(); a(...b, c,);\nfunction F() { return new.target; }")]
#[case::let_as_identifier("let = 1; var let; let.x = 2;")]
#[case::comments_everywhere("/*1*/ var /*2*/ a /*3*/ = /*4*/ 1 /*5*/ ; // 6\n/*7*/")]
#[case::jsx("x = <div className=\"a\" {...rest}>\n  text &amp; more {value} <br/>\n  <>{/* empty */}</>\n</div>;")]
#[case::jsx_names("y = <a.b.c x:y='1' data-z={<i />}></a.b.c>;")]
fn test_script_round_trip(#[case] source: &str) {
    round_trip(source, SourceType::Script);
}

#[rstest]
#[case::imports("import a from 'a';\nimport * as b from \"b\"\nimport { c, d as e, 'f g' as h } from 'c';\nimport i, { j } from 'd';\nimport 'e';")]
#[case::exports("export var a = 1;\nexport { a as b, c };\nexport default function () {}\nexport * from 'x';\nexport * as ns from 'y';\nexport { z } from 'z';")]
#[case::export_default_expression("export default (a, b) => a + b;")]
#[case::top_level_await("const data = await fetch(url);\n")]
#[case::import_meta("console.log(import.meta.url, await import('./m.js'));")]
fn test_module_round_trip(#[case] source: &str) {
    round_trip(source, SourceType::Module);
}
