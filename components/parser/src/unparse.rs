//! Source reconstruction
//!
//! Every node writes its own trivia and token spellings followed by its
//! children in grammar order. Nothing here consults a parent: the one
//! construct whose spelling depends on its container, a method's function
//! value, is told so through [`RenderContext`].

use crate::ast::*;

/// How a node is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderContext {
    /// Standalone rendering
    #[default]
    Normal,
    /// A function rendered as the value of a method: parameters and body
    /// only, modifiers and key belong to the enclosing node
    Method,
}

/// Separator used when a list carries no spelling for a position.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Separators between list items.
#[derive(Debug, Clone, Copy)]
pub enum Separators<'s> {
    /// The same text between every pair
    Uniform(&'s str),
    /// Recorded spellings by position, with a fallback for missing entries.
    /// An entry past the last gap is a trailing separator.
    PerPosition(&'s [String], &'s str),
}

/// Textual reconstruction of a node.
pub trait Unparse {
    /// Appends the node's text to `out`.
    fn unparse_into(&self, out: &mut String, ctx: RenderContext);

    /// Returns the node's text.
    fn unparse(&self) -> String {
        let mut out = String::new();
        self.unparse_into(&mut out, RenderContext::Normal);
        out
    }
}

/// Writes `items` separated according to `separators`.
pub fn join_into<T: Unparse>(out: &mut String, items: &[T], separators: Separators<'_>) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            match separators {
                Separators::Uniform(sep) => out.push_str(sep),
                Separators::PerPosition(seps, default) => {
                    out.push_str(seps.get(i - 1).map(String::as_str).unwrap_or(default))
                }
            }
        }
        item.unparse_into(out, RenderContext::Normal);
    }
    if let Separators::PerPosition(seps, _) = separators {
        if !items.is_empty() && seps.len() >= items.len() {
            out.push_str(&seps[items.len() - 1]);
        }
    }
}

fn join_list<T: Unparse>(out: &mut String, items: &[T], separators: &[String]) {
    join_into(out, items, Separators::PerPosition(separators, DEFAULT_SEPARATOR));
}

fn join_plain<T: Unparse>(out: &mut String, items: &[T]) {
    join_into(out, items, Separators::Uniform(""));
}

fn token(out: &mut String, ws: &str, spelling: &str) {
    out.push_str(ws);
    out.push_str(spelling);
}

/// Canonical spelling for a number.
pub fn render_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let spelling = if value > 0.0 { "Infinity" } else { "-Infinity" };
        spelling.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value)
    } else {
        let mut buffer = ryu::Buffer::new();
        buffer.format_finite(value).to_string()
    }
}

/// Spelling of a literal value; strings use `quote`.
///
/// Negative numbers are parenthesized so the spelling stays a single
/// operand wherever it is spliced in.
pub fn render_literal(value: &LiteralValue, quote: char) -> String {
    match value {
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Number(n) if n.is_sign_negative() && !n.is_nan() => format!("({})", render_number(*n)),
        LiteralValue::Number(n) => render_number(*n),
        LiteralValue::BigInt(b) => format!("{}n", b),
        LiteralValue::String(s) => quote_string(s, quote),
        LiteralValue::RegExp { pattern, flags } => format!("/{}/{}", pattern, flags),
    }
}

fn quote_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '\0' => {
                if chars.peek().map_or(false, char::is_ascii_digit) {
                    out.push_str("\\x00");
                } else {
                    out.push_str("\\0");
                }
            }
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

impl<T: Unparse> Unparse for Option<T> {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        if let Some(inner) = self {
            inner.unparse_into(out, ctx);
        }
    }
}

impl<T: Unparse> Unparse for Box<T> {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        (**self).unparse_into(out, ctx);
    }
}

impl Unparse for Program {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        join_plain(out, &self.body);
        out.push_str(&self.ws_after);
    }
}

impl Unparse for Semicolon {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, &self.spelling);
    }
}

impl Unparse for Identifier {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, self.raw());
    }
}

impl Unparse for PrivateIdentifier {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, "#");
        out.push_str(&self.name);
    }
}

impl Unparse for Literal {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, self.raw());
    }
}

impl Unparse for TemplateLiteral {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        for (i, quasi) in self.quasis.iter().enumerate() {
            token(out, &quasi.ws_before, if i == 0 { "`" } else { "}" });
            out.push_str(&quasi.raw);
            if quasi.tail {
                out.push('`');
            } else {
                out.push_str("${");
                if let Some(expr) = self.expressions.get(i) {
                    expr.unparse_into(out, RenderContext::Normal);
                }
            }
        }
    }
}

// ==================== Expressions ====================

impl Unparse for Expression {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            Expression::Identifier(id) => id.unparse_into(out, ctx),
            Expression::Literal(lit) => lit.unparse_into(out, ctx),
            Expression::Template(template) => template.unparse_into(out, ctx),
            Expression::TaggedTemplate { tag, quasi, .. } => {
                tag.unparse_into(out, ctx);
                quasi.unparse_into(out, ctx);
            }
            Expression::This { ws_before, .. } => token(out, ws_before, "this"),
            Expression::Super { ws_before, .. } => token(out, ws_before, "super"),
            Expression::Array(array) => array.unparse_into(out, ctx),
            Expression::Object(object) => object.unparse_into(out, ctx),
            Expression::Function(function) => function.unparse_into(out, ctx),
            Expression::Arrow(arrow) => arrow.unparse_into(out, ctx),
            Expression::Class(class) => class.unparse_into(out, ctx),
            Expression::Unary {
                ws_before,
                operator,
                argument,
                ..
            } => {
                token(out, ws_before, operator.as_str());
                argument.unparse_into(out, ctx);
            }
            Expression::Update {
                operator,
                prefix,
                ws_operator,
                argument,
                ..
            } => {
                if *prefix {
                    token(out, ws_operator, operator.as_str());
                    argument.unparse_into(out, ctx);
                } else {
                    argument.unparse_into(out, ctx);
                    token(out, ws_operator, operator.as_str());
                }
            }
            Expression::Binary {
                left,
                ws_operator,
                operator,
                right,
                ..
            } => {
                left.unparse_into(out, ctx);
                token(out, ws_operator, operator.as_str());
                right.unparse_into(out, ctx);
            }
            Expression::Assignment {
                left,
                ws_operator,
                operator,
                right,
                ..
            } => {
                left.unparse_into(out, ctx);
                token(out, ws_operator, operator.as_str());
                right.unparse_into(out, ctx);
            }
            Expression::Conditional {
                test,
                ws_question,
                consequent,
                ws_colon,
                alternate,
                ..
            } => {
                test.unparse_into(out, ctx);
                token(out, ws_question, "?");
                consequent.unparse_into(out, ctx);
                token(out, ws_colon, ":");
                alternate.unparse_into(out, ctx);
            }
            Expression::Sequence {
                expressions,
                separators,
                ..
            } => join_list(out, expressions, separators),
            Expression::Call(call) => call.unparse_into(out, ctx),
            Expression::New {
                ws_before,
                callee,
                arguments,
                ..
            } => {
                token(out, ws_before, "new");
                callee.unparse_into(out, ctx);
                arguments.unparse_into(out, ctx);
            }
            Expression::Member(member) => member.unparse_into(out, ctx),
            Expression::MetaProperty {
                meta,
                ws_dot,
                property,
                ..
            } => {
                meta.unparse_into(out, ctx);
                token(out, ws_dot, ".");
                property.unparse_into(out, ctx);
            }
            Expression::Import {
                ws_before,
                ws_open,
                source,
                ws_close,
                ..
            } => {
                token(out, ws_before, "import");
                token(out, ws_open, "(");
                source.unparse_into(out, ctx);
                token(out, ws_close, ")");
            }
            Expression::Parenthesized {
                ws_before,
                expression,
                ws_close,
                ..
            } => {
                token(out, ws_before, "(");
                expression.unparse_into(out, ctx);
                token(out, ws_close, ")");
            }
            Expression::Spread(spread) => spread.unparse_into(out, ctx),
            Expression::Yield {
                ws_before,
                delegate,
                argument,
                ..
            } => {
                token(out, ws_before, "yield");
                if let Some(ws_star) = delegate {
                    token(out, ws_star, "*");
                }
                argument.unparse_into(out, ctx);
            }
            Expression::Await {
                ws_before, argument, ..
            } => {
                token(out, ws_before, "await");
                argument.unparse_into(out, ctx);
            }
            Expression::JsxElement(element) => element.unparse_into(out, ctx),
            Expression::JsxFragment(fragment) => fragment.unparse_into(out, ctx),
            Expression::CoverParameters(cover) => {
                if let Some(ws_async) = &cover.ws_async {
                    token(out, ws_async, "async");
                }
                token(out, &cover.ws_open, "(");
                join_list(out, &cover.items, &cover.separators);
                token(out, &cover.ws_close, ")");
            }
        }
    }
}

impl Unparse for ArrayExpression {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, "[");
        join_list(out, &self.elements, &self.separators);
        token(out, &self.ws_close, "]");
    }
}

impl Unparse for ObjectExpression {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, "{");
        join_list(out, &self.properties, &self.separators);
        token(out, &self.ws_close, "}");
    }
}

impl Unparse for ObjectMember {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            ObjectMember::Property(prop) => prop.unparse_into(out, ctx),
            ObjectMember::Spread(spread) => spread.unparse_into(out, ctx),
        }
    }
}

fn accessor_spelling(kind: PropertyKind) -> &'static str {
    match kind {
        PropertyKind::Get => "get",
        PropertyKind::Set => "set",
        PropertyKind::Init => "",
    }
}

fn prefix_into(out: &mut String, prefix: &MethodPrefix, accessor: &str) {
    if let Some(ws) = &prefix.ws_static {
        token(out, ws, "static");
    }
    if let Some(ws) = &prefix.ws_async {
        token(out, ws, "async");
    }
    if let Some(ws) = &prefix.ws_accessor {
        token(out, ws, accessor);
    }
    if let Some(ws) = &prefix.ws_star {
        token(out, ws, "*");
    }
}

impl Unparse for Property {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        if self.shorthand {
            self.value.unparse_into(out, RenderContext::Normal);
            return;
        }
        prefix_into(out, &self.prefix, accessor_spelling(self.kind));
        self.key.unparse_into(out, RenderContext::Normal);
        if self.method || self.kind != PropertyKind::Init {
            self.value.unparse_into(out, RenderContext::Method);
        } else {
            token(out, &self.ws_colon, ":");
            self.value.unparse_into(out, RenderContext::Normal);
        }
    }
}

impl Unparse for PropertyKey {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            PropertyKey::Identifier(id) => id.unparse_into(out, ctx),
            PropertyKey::Literal(lit) => lit.unparse_into(out, ctx),
            PropertyKey::Private(private) => private.unparse_into(out, ctx),
            PropertyKey::Computed {
                ws_open,
                expression,
                ws_close,
            } => {
                token(out, ws_open, "[");
                expression.unparse_into(out, ctx);
                token(out, ws_close, "]");
            }
        }
    }
}

impl Unparse for SpreadElement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "...");
        self.argument.unparse_into(out, ctx);
    }
}

impl Unparse for Arguments {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_open, "(");
        join_list(out, &self.items, &self.separators);
        token(out, &self.ws_close, ")");
    }
}

impl Unparse for CallExpression {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        self.callee.unparse_into(out, ctx);
        if self.optional {
            token(out, &self.ws_optional, "?.");
        }
        self.arguments.unparse_into(out, ctx);
    }
}

impl Unparse for MemberExpression {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        self.object.unparse_into(out, ctx);
        let dot = if self.optional { "?." } else { "." };
        match &self.property {
            MemberProperty::Static(id) => {
                token(out, &self.ws_dot, dot);
                id.unparse_into(out, ctx);
            }
            MemberProperty::Private(private) => {
                token(out, &self.ws_dot, dot);
                private.unparse_into(out, ctx);
            }
            MemberProperty::Computed {
                ws_open,
                expression,
                ws_close,
            } => {
                if self.optional {
                    token(out, &self.ws_dot, "?.");
                }
                token(out, ws_open, "[");
                expression.unparse_into(out, ctx);
                token(out, ws_close, "]");
            }
        }
    }
}

// ==================== Functions and classes ====================

impl Unparse for FormalParameters {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_open, "(");
        join_list(out, &self.items, &self.separators);
        token(out, &self.ws_close, ")");
    }
}

impl Unparse for FunctionBody {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_open, "{");
        join_plain(out, &self.body);
        token(out, &self.ws_close, "}");
    }
}

impl Unparse for Function {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        if ctx == RenderContext::Normal {
            if self.is_async {
                token(out, &self.ws_async, "async");
            }
            token(out, &self.ws_keyword, "function");
            if self.generator {
                token(out, &self.ws_star, "*");
            }
            self.id.unparse_into(out, RenderContext::Normal);
        }
        self.params.unparse_into(out, RenderContext::Normal);
        self.body.unparse_into(out, RenderContext::Normal);
    }
}

impl Unparse for ArrowFunction {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        if self.is_async {
            token(out, &self.ws_async, "async");
        }
        match &self.params {
            ArrowParameters::Bare(id) => id.unparse_into(out, ctx),
            ArrowParameters::Parenthesized(params) => params.unparse_into(out, ctx),
        }
        token(out, &self.ws_arrow, "=>");
        match &self.body {
            ArrowBody::Block(body) => body.unparse_into(out, ctx),
            ArrowBody::Expression(expr) => expr.unparse_into(out, ctx),
        }
    }
}

impl Unparse for Class {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "class");
        self.id.unparse_into(out, ctx);
        if let Some(heritage) = &self.super_class {
            token(out, &heritage.ws_extends, "extends");
            heritage.expression.unparse_into(out, ctx);
        }
        token(out, &self.ws_open, "{");
        join_plain(out, &self.body);
        token(out, &self.ws_close, "}");
    }
}

impl Unparse for ClassElement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            ClassElement::Method(method) => method.unparse_into(out, ctx),
            ClassElement::Property(field) => field.unparse_into(out, ctx),
            ClassElement::StaticBlock(block) => block.unparse_into(out, ctx),
            ClassElement::Empty { ws_before, .. } => token(out, ws_before, ";"),
        }
    }
}

impl Unparse for MethodDefinition {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        let accessor = match self.kind {
            MethodKind::Get => "get",
            MethodKind::Set => "set",
            _ => "",
        };
        prefix_into(out, &self.prefix, accessor);
        self.key.unparse_into(out, RenderContext::Normal);
        self.value.unparse_into(out, RenderContext::Method);
    }
}

impl Unparse for PropertyDefinition {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        prefix_into(out, &self.prefix, "");
        self.key.unparse_into(out, ctx);
        self.value.unparse_into(out, ctx);
        self.semicolon.unparse_into(out, ctx);
    }
}

impl Unparse for StaticBlock {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, "static");
        token(out, &self.ws_open, "{");
        join_plain(out, &self.body);
        token(out, &self.ws_close, "}");
    }
}

impl Unparse for Initializer {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_eq, "=");
        self.value.unparse_into(out, ctx);
    }
}

// ==================== Patterns ====================

impl Unparse for Pattern {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            Pattern::Identifier(id) => id.unparse_into(out, ctx),
            Pattern::Expression(expr) => expr.unparse_into(out, ctx),
            Pattern::Array(array) => {
                token(out, &array.ws_before, "[");
                join_list(out, &array.elements, &array.separators);
                token(out, &array.ws_close, "]");
            }
            Pattern::Object(object) => {
                token(out, &object.ws_before, "{");
                join_list(out, &object.properties, &object.separators);
                token(out, &object.ws_close, "}");
            }
            Pattern::Assignment(assign) => {
                assign.left.unparse_into(out, ctx);
                token(out, &assign.ws_eq, "=");
                assign.right.unparse_into(out, ctx);
            }
            Pattern::Rest(rest) => rest.unparse_into(out, ctx),
        }
    }
}

impl Unparse for ObjectPatternMember {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            ObjectPatternMember::Property(prop) => {
                if !prop.shorthand {
                    prop.key.unparse_into(out, ctx);
                    token(out, &prop.ws_colon, ":");
                }
                prop.value.unparse_into(out, ctx);
            }
            ObjectPatternMember::Rest(rest) => rest.unparse_into(out, ctx),
        }
    }
}

impl Unparse for RestElement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "...");
        self.argument.unparse_into(out, ctx);
    }
}

// ==================== Statements ====================

impl Unparse for Statement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            Statement::Expression(stmt) => {
                stmt.expression.unparse_into(out, ctx);
                stmt.semicolon.unparse_into(out, ctx);
            }
            Statement::Variable(decl) => decl.unparse_into(out, ctx),
            Statement::Function(function) => function.unparse_into(out, ctx),
            Statement::Class(class) => class.unparse_into(out, ctx),
            Statement::Block(block) => block.unparse_into(out, ctx),
            Statement::Empty { ws_before, .. } => token(out, ws_before, ";"),
            Statement::If {
                ws_before,
                ws_open,
                test,
                ws_close,
                consequent,
                alternate,
                ..
            } => {
                token(out, ws_before, "if");
                token(out, ws_open, "(");
                test.unparse_into(out, ctx);
                token(out, ws_close, ")");
                consequent.unparse_into(out, ctx);
                if let Some(clause) = alternate {
                    token(out, &clause.ws_else, "else");
                    clause.body.unparse_into(out, ctx);
                }
            }
            Statement::For(stmt) => stmt.unparse_into(out, ctx),
            Statement::ForIn(stmt) => stmt.unparse_into(out, ctx),
            Statement::ForOf(stmt) => stmt.unparse_into(out, ctx),
            Statement::While {
                ws_before,
                ws_open,
                test,
                ws_close,
                body,
                ..
            } => {
                token(out, ws_before, "while");
                token(out, ws_open, "(");
                test.unparse_into(out, ctx);
                token(out, ws_close, ")");
                body.unparse_into(out, ctx);
            }
            Statement::DoWhile {
                ws_before,
                body,
                ws_while,
                ws_open,
                test,
                ws_close,
                semicolon,
                ..
            } => {
                token(out, ws_before, "do");
                body.unparse_into(out, ctx);
                token(out, ws_while, "while");
                token(out, ws_open, "(");
                test.unparse_into(out, ctx);
                token(out, ws_close, ")");
                semicolon.unparse_into(out, ctx);
            }
            Statement::Return {
                ws_before,
                argument,
                semicolon,
                ..
            } => {
                token(out, ws_before, "return");
                argument.unparse_into(out, ctx);
                semicolon.unparse_into(out, ctx);
            }
            Statement::Break {
                ws_before,
                label,
                semicolon,
                ..
            } => {
                token(out, ws_before, "break");
                label.unparse_into(out, ctx);
                semicolon.unparse_into(out, ctx);
            }
            Statement::Continue {
                ws_before,
                label,
                semicolon,
                ..
            } => {
                token(out, ws_before, "continue");
                label.unparse_into(out, ctx);
                semicolon.unparse_into(out, ctx);
            }
            Statement::Throw {
                ws_before,
                argument,
                semicolon,
                ..
            } => {
                token(out, ws_before, "throw");
                argument.unparse_into(out, ctx);
                semicolon.unparse_into(out, ctx);
            }
            Statement::Try(stmt) => stmt.unparse_into(out, ctx),
            Statement::Switch(stmt) => stmt.unparse_into(out, ctx),
            Statement::Labeled {
                label,
                ws_colon,
                body,
                ..
            } => {
                label.unparse_into(out, ctx);
                token(out, ws_colon, ":");
                body.unparse_into(out, ctx);
            }
            Statement::Debugger {
                ws_before,
                semicolon,
                ..
            } => {
                token(out, ws_before, "debugger");
                semicolon.unparse_into(out, ctx);
            }
            Statement::With {
                ws_before,
                ws_open,
                object,
                ws_close,
                body,
                ..
            } => {
                token(out, ws_before, "with");
                token(out, ws_open, "(");
                object.unparse_into(out, ctx);
                token(out, ws_close, ")");
                body.unparse_into(out, ctx);
            }
            Statement::Import(decl) => decl.unparse_into(out, ctx),
            Statement::ExportNamed(decl) => decl.unparse_into(out, ctx),
            Statement::ExportDefault(decl) => decl.unparse_into(out, ctx),
            Statement::ExportAll(decl) => decl.unparse_into(out, ctx),
        }
    }
}

impl Unparse for BlockStatement {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, "{");
        join_plain(out, &self.body);
        token(out, &self.ws_close, "}");
    }
}

impl Unparse for VariableDeclaration {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, self.kind.as_str());
        join_list(out, &self.declarations, &self.separators);
        self.semicolon.unparse_into(out, ctx);
    }
}

impl Unparse for VariableDeclarator {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        self.id.unparse_into(out, ctx);
        self.init.unparse_into(out, ctx);
    }
}

impl Unparse for ForInit {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            ForInit::Variable(decl) => decl.unparse_into(out, ctx),
            ForInit::Expression(expr) => expr.unparse_into(out, ctx),
        }
    }
}

impl Unparse for ForTarget {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            ForTarget::Variable(decl) => decl.unparse_into(out, ctx),
            ForTarget::Pattern(pattern) => pattern.unparse_into(out, ctx),
        }
    }
}

impl Unparse for ForStatement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "for");
        token(out, &self.ws_open, "(");
        self.init.unparse_into(out, ctx);
        token(out, &self.ws_first_semi, ";");
        self.test.unparse_into(out, ctx);
        token(out, &self.ws_second_semi, ";");
        self.update.unparse_into(out, ctx);
        token(out, &self.ws_close, ")");
        self.body.unparse_into(out, ctx);
    }
}

impl Unparse for ForInStatement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "for");
        token(out, &self.ws_open, "(");
        self.left.unparse_into(out, ctx);
        token(out, &self.ws_in, "in");
        self.right.unparse_into(out, ctx);
        token(out, &self.ws_close, ")");
        self.body.unparse_into(out, ctx);
    }
}

impl Unparse for ForOfStatement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "for");
        if let Some(ws_await) = &self.ws_await {
            token(out, ws_await, "await");
        }
        token(out, &self.ws_open, "(");
        self.left.unparse_into(out, ctx);
        token(out, &self.ws_of, "of");
        self.right.unparse_into(out, ctx);
        token(out, &self.ws_close, ")");
        self.body.unparse_into(out, ctx);
    }
}

impl Unparse for TryStatement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "try");
        self.block.unparse_into(out, ctx);
        if let Some(handler) = &self.handler {
            token(out, &handler.ws_before, "catch");
            if let Some(param) = &handler.param {
                token(out, &param.ws_open, "(");
                param.pattern.unparse_into(out, ctx);
                token(out, &param.ws_close, ")");
            }
            handler.body.unparse_into(out, ctx);
        }
        if let Some(finalizer) = &self.finalizer {
            token(out, &finalizer.ws_finally, "finally");
            finalizer.body.unparse_into(out, ctx);
        }
    }
}

impl Unparse for SwitchStatement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "switch");
        token(out, &self.ws_open, "(");
        self.discriminant.unparse_into(out, ctx);
        token(out, &self.ws_close, ")");
        token(out, &self.ws_lbrace, "{");
        join_plain(out, &self.cases);
        token(out, &self.ws_rbrace, "}");
    }
}

impl Unparse for SwitchCase {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match &self.test {
            Some(test) => {
                token(out, &self.ws_before, "case");
                test.unparse_into(out, ctx);
            }
            None => token(out, &self.ws_before, "default"),
        }
        token(out, &self.ws_colon, ":");
        join_plain(out, &self.consequent);
    }
}

// ==================== Modules ====================

impl Unparse for ModuleExportName {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            ModuleExportName::Identifier(id) => id.unparse_into(out, ctx),
            ModuleExportName::String(lit) => lit.unparse_into(out, ctx),
        }
    }
}

impl Unparse for ImportSpecifier {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        self.imported.unparse_into(out, ctx);
        if let Some(alias) = &self.alias {
            token(out, &alias.ws_as, "as");
            alias.local.unparse_into(out, ctx);
        }
    }
}

impl Unparse for ImportDeclaration {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "import");
        if let Some(clause) = &self.clause {
            clause.default.unparse_into(out, ctx);
            if clause.default.is_some() && (clause.namespace.is_some() || clause.named.is_some()) {
                token(out, &clause.ws_comma, ",");
            }
            if let Some(namespace) = &clause.namespace {
                token(out, &namespace.ws_star, "*");
                token(out, &namespace.ws_as, "as");
                namespace.local.unparse_into(out, ctx);
            }
            if let Some(named) = &clause.named {
                token(out, &named.ws_open, "{");
                join_list(out, &named.specifiers, &named.separators);
                token(out, &named.ws_close, "}");
            }
            token(out, &self.ws_from, "from");
        }
        self.source.unparse_into(out, ctx);
        self.semicolon.unparse_into(out, ctx);
    }
}

impl Unparse for ExportSpecifier {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        self.local.unparse_into(out, ctx);
        if let Some(alias) = &self.alias {
            token(out, &alias.ws_as, "as");
            alias.exported.unparse_into(out, ctx);
        }
    }
}

impl Unparse for ExportNamedDeclaration {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "export");
        self.declaration.unparse_into(out, ctx);
        if let Some(named) = &self.specifiers {
            token(out, &named.ws_open, "{");
            join_list(out, &named.specifiers, &named.separators);
            token(out, &named.ws_close, "}");
        }
        if let Some(from) = &self.source {
            token(out, &from.ws_from, "from");
            from.source.unparse_into(out, ctx);
        }
        self.semicolon.unparse_into(out, ctx);
    }
}

impl Unparse for ExportDefaultDeclaration {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "export");
        token(out, &self.ws_default, "default");
        match &self.declaration {
            ExportDefaultKind::Function(function) => function.unparse_into(out, ctx),
            ExportDefaultKind::Class(class) => class.unparse_into(out, ctx),
            ExportDefaultKind::Expression {
                expression,
                semicolon,
            } => {
                expression.unparse_into(out, ctx);
                semicolon.unparse_into(out, ctx);
            }
        }
    }
}

impl Unparse for ExportAllDeclaration {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "export");
        token(out, &self.ws_star, "*");
        if let Some(alias) = &self.exported {
            token(out, &alias.ws_as, "as");
            alias.exported.unparse_into(out, ctx);
        }
        token(out, &self.ws_from, "from");
        self.source.unparse_into(out, ctx);
        self.semicolon.unparse_into(out, ctx);
    }
}

// ==================== JSX ====================

impl Unparse for JsxIdentifier {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, &self.name);
    }
}

impl Unparse for JsxNamespacedName {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        self.namespace.unparse_into(out, ctx);
        token(out, &self.ws_colon, ":");
        self.name.unparse_into(out, ctx);
    }
}

impl Unparse for JsxElementName {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            JsxElementName::Identifier(id) => id.unparse_into(out, ctx),
            JsxElementName::Namespaced(ns) => ns.unparse_into(out, ctx),
            JsxElementName::Member(member) => {
                member.object.unparse_into(out, ctx);
                token(out, &member.ws_dot, ".");
                member.property.unparse_into(out, ctx);
            }
        }
    }
}

impl Unparse for JsxAttributeItem {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            JsxAttributeItem::Attribute(attr) => {
                match &attr.name {
                    JsxAttributeName::Identifier(id) => id.unparse_into(out, ctx),
                    JsxAttributeName::Namespaced(ns) => ns.unparse_into(out, ctx),
                }
                if let Some(value) = &attr.value {
                    token(out, &attr.ws_eq, "=");
                    match value {
                        JsxAttributeValue::String(lit) => lit.unparse_into(out, ctx),
                        JsxAttributeValue::Expression(container) => {
                            container.unparse_into(out, ctx)
                        }
                        JsxAttributeValue::Element(element) => element.unparse_into(out, ctx),
                        JsxAttributeValue::Fragment(fragment) => fragment.unparse_into(out, ctx),
                    }
                }
            }
            JsxAttributeItem::Spread(spread) => {
                token(out, &spread.ws_before, "{");
                token(out, &spread.ws_dots, "...");
                spread.argument.unparse_into(out, ctx);
                token(out, &spread.ws_close, "}");
            }
        }
    }
}

impl Unparse for JsxElement {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        let opening = &self.opening;
        token(out, &opening.ws_before, "<");
        opening.name.unparse_into(out, ctx);
        join_plain(out, &opening.attributes);
        if let Some(ws_slash) = &opening.self_closing {
            token(out, ws_slash, "/");
        }
        token(out, &opening.ws_close, ">");
        join_plain(out, &self.children);
        if let Some(closing) = &self.closing {
            token(out, &closing.ws_before, "<");
            token(out, &closing.ws_slash, "/");
            closing.name.unparse_into(out, ctx);
            token(out, &closing.ws_close, ">");
        }
    }
}

impl Unparse for JsxFragment {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        token(out, &self.ws_before, "<");
        token(out, &self.ws_open_close, ">");
        join_plain(out, &self.children);
        token(out, &self.ws_closing, "<");
        token(out, &self.ws_closing_slash, "/");
        token(out, &self.ws_closing_close, ">");
    }
}

impl Unparse for JsxExpressionContainer {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        token(out, &self.ws_before, "{");
        match &self.expression {
            JsxExpression::Empty(empty) => out.push_str(&empty.ws),
            JsxExpression::Expression(expr) => expr.unparse_into(out, ctx),
        }
        token(out, &self.ws_close, "}");
    }
}

impl Unparse for JsxChild {
    fn unparse_into(&self, out: &mut String, ctx: RenderContext) {
        match self {
            JsxChild::Text(text) => out.push_str(text.raw()),
            JsxChild::Expression(container) => container.unparse_into(out, ctx),
            JsxChild::Spread(spread) => {
                token(out, &spread.ws_before, "{");
                token(out, &spread.ws_dots, "...");
                spread.expression.unparse_into(out, ctx);
                token(out, &spread.ws_close, "}");
            }
            JsxChild::Element(element) => element.unparse_into(out, ctx),
            JsxChild::Fragment(fragment) => fragment.unparse_into(out, ctx),
        }
    }
}

impl Unparse for JsxText {
    fn unparse_into(&self, out: &mut String, _ctx: RenderContext) {
        out.push_str(self.raw());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(ws: &str, name: &str) -> Expression {
        let mut id = Identifier::new(name);
        id.ws_before = ws.to_string();
        Expression::Identifier(id)
    }

    #[test]
    fn test_join_into_per_position_with_default() {
        let items = vec![ident("", "a"), ident("", "b"), ident("", "c")];
        let mut out = String::new();
        join_into(&mut out, &items, Separators::PerPosition(&[" ,".to_string()], DEFAULT_SEPARATOR));
        assert_eq!(out, "a ,b, c");
    }

    #[test]
    fn test_join_into_trailing_separator() {
        let items = vec![ident("", "a")];
        let mut out = String::new();
        join_into(&mut out, &items, Separators::PerPosition(&[",".to_string()], DEFAULT_SEPARATOR));
        assert_eq!(out, "a,");
    }

    #[test]
    fn test_join_into_uniform() {
        let items = vec![ident("", "x"), ident("", "y")];
        let mut out = String::new();
        join_into(&mut out, &items, Separators::Uniform(" | "));
        assert_eq!(out, "x | y");
    }

    #[test]
    fn test_array_holes_render() {
        let array = ArrayExpression {
            ws_before: String::new(),
            elements: vec![None, Some(ident("", "a")), None],
            separators: vec![",".into(), ",".into(), ",".into()],
            ws_close: String::new(),
            span: Span::default(),
        };
        assert_eq!(array.unparse(), "[,a,,]");
    }

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(5.0), "5");
        assert_eq!(render_number(0.5), "0.5");
        assert_eq!(render_number(1e21), "1e21");
        assert_eq!(render_number(123456789.0), "123456789");
    }

    #[test]
    fn test_render_literal_wraps_negative_numbers() {
        assert_eq!(render_literal(&LiteralValue::Number(-1.0), '"'), "(-1)");
        assert_eq!(render_literal(&LiteralValue::Number(-0.5), '"'), "(-0.5)");
        assert_eq!(render_literal(&LiteralValue::Number(2.0), '"'), "2");
    }

    #[test]
    fn test_render_literal_strings() {
        let value = LiteralValue::String("a\"b\n".into());
        assert_eq!(render_literal(&value, '"'), "\"a\\\"b\\n\"");
        assert_eq!(render_literal(&value, '\''), "'a\"b\\n'");
        assert_eq!(render_literal(&LiteralValue::String("\0".into()), '"'), "\"\\0\"");
    }

    #[test]
    fn test_method_context_omits_keyword() {
        let function = Function {
            is_async: true,
            ws_async: String::new(),
            ws_keyword: " ".into(),
            generator: false,
            ws_star: String::new(),
            id: None,
            params: FormalParameters::default(),
            body: FunctionBody {
                ws_open: " ".into(),
                ..FunctionBody::default()
            },
            span: Span::default(),
        };
        assert_eq!(function.unparse(), "async function() {}");
        let mut out = String::new();
        function.unparse_into(&mut out, RenderContext::Method);
        assert_eq!(out, "() {}");
    }

    #[test]
    fn test_semicolon_spellings() {
        assert_eq!(Semicolon::explicit().unparse(), ";");
        assert_eq!(Semicolon::inserted().unparse(), "");
    }
}
