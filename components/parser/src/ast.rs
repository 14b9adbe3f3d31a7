//! Abstract Syntax Tree node definitions
//!
//! Every node keeps the trivia that preceded each token it consumed, in a
//! `ws_*` field named after the token. Trivia before a child's first token
//! lives in the child. Comma-separated children come with a parallel list of
//! separator spellings (trivia plus the comma); a missing entry falls back to
//! `", "`. With both in place [`crate::Unparse`] gives back the exact source.

use crate::options::SourceType;
use core_types::SourceLocation;
use num_bigint::BigInt;

/// Source extent of a node or token.
///
/// `range` and `loc` are filled independently, according to the parse
/// options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offsets `(start, end)`
    pub range: Option<(usize, usize)>,
    /// Line/column location
    pub loc: Option<SourceLocation>,
}

/// Optional statement terminator, recorded as spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semicolon {
    /// Trivia before `;` (empty when the semicolon was inserted)
    pub ws_before: String,
    /// `";"` or `""`
    pub spelling: String,
}

impl Semicolon {
    /// An explicit `;` with no leading trivia.
    pub fn explicit() -> Self {
        Semicolon {
            ws_before: String::new(),
            spelling: ";".to_string(),
        }
    }

    /// An automatically inserted semicolon.
    pub fn inserted() -> Self {
        Semicolon {
            ws_before: String::new(),
            spelling: String::new(),
        }
    }

    /// True when the source spelled the semicolon out.
    pub fn is_explicit(&self) -> bool {
        !self.spelling.is_empty()
    }
}

impl Default for Semicolon {
    fn default() -> Self {
        Semicolon::explicit()
    }
}

/// Root of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Script or module
    pub source_type: SourceType,
    /// Top-level statements, directives included
    pub body: Vec<Statement>,
    /// Trivia after the last token
    pub ws_after: String,
    /// Extent
    pub span: Span,
}

// ==================== Leaves ====================

/// Identifier reference or binding.
///
/// The name is decoded; the raw spelling keeps any unicode escapes. Editing
/// goes through [`Identifier::set_name`], which keeps both in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// Trivia before the identifier
    pub ws_before: String,
    name: String,
    raw: String,
    /// Extent
    pub span: Span,
}

impl Identifier {
    /// Creates an identifier spelled exactly as its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Identifier {
            ws_before: String::new(),
            raw: name.clone(),
            name,
            span: Span::default(),
        }
    }

    pub(crate) fn from_parts(ws_before: &str, name: &str, raw: &str, span: Span) -> Self {
        Identifier {
            ws_before: ws_before.to_string(),
            name: name.to_string(),
            raw: raw.to_string(),
            span,
        }
    }

    /// Decoded name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spelling as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Renames; the new name is written without escapes.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.raw = self.name.clone();
    }

    /// Same identifier without leading trivia or position.
    pub(crate) fn bare(&self) -> Self {
        Identifier {
            ws_before: String::new(),
            name: self.name.clone(),
            raw: self.raw.clone(),
            span: Span::default(),
        }
    }
}

/// `#name` in classes and member accesses.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateIdentifier {
    /// Trivia before `#`
    pub ws_before: String,
    /// Name without the `#`
    pub name: String,
    /// Extent
    pub span: Span,
}

/// Value carried by a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// Numeric literal
    Number(f64),
    /// BigInt literal
    BigInt(BigInt),
    /// String literal (cooked)
    String(String),
    /// Regular expression literal
    RegExp {
        /// Body
        pattern: String,
        /// Flags
        flags: String,
    },
}

/// Literal with its value and exact spelling.
///
/// Unedited literals re-emit `raw`. [`Literal::set_value`] re-renders the
/// spelling from the new value, keeping the original quote style.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Trivia before the literal
    pub ws_before: String,
    value: LiteralValue,
    raw: String,
    /// Extent
    pub span: Span,
}

impl Literal {
    /// Creates a literal with a canonical spelling.
    pub fn new(value: LiteralValue) -> Self {
        let raw = crate::unparse::render_literal(&value, '"');
        Literal {
            ws_before: String::new(),
            value,
            raw,
            span: Span::default(),
        }
    }

    pub(crate) fn from_parts(ws_before: &str, value: LiteralValue, raw: &str, span: Span) -> Self {
        Literal {
            ws_before: ws_before.to_string(),
            value,
            raw: raw.to_string(),
            span,
        }
    }

    /// Current value.
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// Current spelling.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replaces the value and re-renders the spelling.
    pub fn set_value(&mut self, value: LiteralValue) {
        let quote = match self.raw.chars().next() {
            Some('\'') => '\'',
            _ => '"',
        };
        self.raw = crate::unparse::render_literal(&value, quote);
        self.value = value;
    }

    /// String value, when this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One static piece of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    /// Trivia before the piece; for pieces after a substitution this is
    /// the trivia before its closing `}`
    pub ws_before: String,
    /// Text between the delimiters, as written
    pub raw: String,
    /// Cooked text; `None` for invalid escapes in tagged templates
    pub cooked: Option<String>,
    /// Last piece
    pub tail: bool,
    /// Extent
    pub span: Span,
}

/// `` `a${b}c` ``
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// Static pieces; always one more than `expressions`
    pub quasis: Vec<TemplateElement>,
    /// Substitutions
    pub expressions: Vec<Expression>,
    /// Extent
    pub span: Span,
}

// ==================== Operators ====================

/// Prefix operators other than `++`/`--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `!`
    Not,
    /// `~`
    BitwiseNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

impl UnaryOperator {
    /// Maps a token spelling to an operator.
    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "-" => UnaryOperator::Minus,
            "+" => UnaryOperator::Plus,
            "!" => UnaryOperator::Not,
            "~" => UnaryOperator::BitwiseNot,
            "typeof" => UnaryOperator::Typeof,
            "void" => UnaryOperator::Void,
            "delete" => UnaryOperator::Delete,
            _ => return None,
        })
    }

    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// `++` / `--`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

impl UpdateOperator {
    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// Binary and logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `??`
    NullishCoalescing,
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `&`
    BitwiseAnd,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `===`
    StrictEqual,
    /// `!==`
    StrictNotEqual,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `instanceof`
    Instanceof,
    /// `in`
    In,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `>>>`
    UnsignedRightShift,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Remainder,
    /// `**`
    Exponent,
}

impl BinaryOperator {
    /// Maps a token spelling to an operator.
    pub fn from_token(text: &str) -> Option<Self> {
        use BinaryOperator::*;
        Some(match text {
            "??" => NullishCoalescing,
            "||" => LogicalOr,
            "&&" => LogicalAnd,
            "|" => BitwiseOr,
            "^" => BitwiseXor,
            "&" => BitwiseAnd,
            "==" => Equal,
            "!=" => NotEqual,
            "===" => StrictEqual,
            "!==" => StrictNotEqual,
            "<" => LessThan,
            ">" => GreaterThan,
            "<=" => LessEqual,
            ">=" => GreaterEqual,
            "instanceof" => Instanceof,
            "in" => In,
            "<<" => LeftShift,
            ">>" => RightShift,
            ">>>" => UnsignedRightShift,
            "+" => Add,
            "-" => Subtract,
            "*" => Multiply,
            "/" => Divide,
            "%" => Remainder,
            "**" => Exponent,
            _ => return None,
        })
    }

    /// Binding power used by precedence climbing; higher binds tighter.
    pub fn precedence(self) -> u8 {
        use BinaryOperator::*;
        match self {
            NullishCoalescing => 1,
            LogicalOr => 1,
            LogicalAnd => 2,
            BitwiseOr => 3,
            BitwiseXor => 4,
            BitwiseAnd => 5,
            Equal | NotEqual | StrictEqual | StrictNotEqual => 6,
            LessThan | GreaterThan | LessEqual | GreaterEqual | Instanceof | In => 7,
            LeftShift | RightShift | UnsignedRightShift => 8,
            Add | Subtract => 9,
            Multiply | Divide | Remainder => 11,
            Exponent => 12,
        }
    }

    /// `&&`, `||` and `??`.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr | BinaryOperator::NullishCoalescing
        )
    }

    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            NullishCoalescing => "??",
            LogicalOr => "||",
            LogicalAnd => "&&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseAnd => "&",
            Equal => "==",
            NotEqual => "!=",
            StrictEqual => "===",
            StrictNotEqual => "!==",
            LessThan => "<",
            GreaterThan => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Instanceof => "instanceof",
            In => "in",
            LeftShift => "<<",
            RightShift => ">>",
            UnsignedRightShift => ">>>",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Remainder => "%",
            Exponent => "**",
        }
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// `=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Subtract,
    /// `*=`
    Multiply,
    /// `/=`
    Divide,
    /// `%=`
    Remainder,
    /// `**=`
    Exponent,
    /// `<<=`
    LeftShift,
    /// `>>=`
    RightShift,
    /// `>>>=`
    UnsignedRightShift,
    /// `|=`
    BitwiseOr,
    /// `^=`
    BitwiseXor,
    /// `&=`
    BitwiseAnd,
    /// `&&=`
    LogicalAnd,
    /// `||=`
    LogicalOr,
    /// `??=`
    NullishCoalescing,
}

impl AssignmentOperator {
    /// Maps a token spelling to an operator.
    pub fn from_token(text: &str) -> Option<Self> {
        use AssignmentOperator::*;
        Some(match text {
            "=" => Assign,
            "+=" => Add,
            "-=" => Subtract,
            "*=" => Multiply,
            "/=" => Divide,
            "%=" => Remainder,
            "**=" => Exponent,
            "<<=" => LeftShift,
            ">>=" => RightShift,
            ">>>=" => UnsignedRightShift,
            "|=" => BitwiseOr,
            "^=" => BitwiseXor,
            "&=" => BitwiseAnd,
            "&&=" => LogicalAnd,
            "||=" => LogicalOr,
            "??=" => NullishCoalescing,
            _ => return None,
        })
    }

    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        use AssignmentOperator::*;
        match self {
            Assign => "=",
            Add => "+=",
            Subtract => "-=",
            Multiply => "*=",
            Divide => "/=",
            Remainder => "%=",
            Exponent => "**=",
            LeftShift => "<<=",
            RightShift => ">>=",
            UnsignedRightShift => ">>>=",
            BitwiseOr => "|=",
            BitwiseXor => "^=",
            BitwiseAnd => "&=",
            LogicalAnd => "&&=",
            LogicalOr => "||=",
            NullishCoalescing => "??=",
        }
    }
}

// ==================== Expressions ====================

/// JavaScript expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),

    /// Literal value
    Literal(Literal),

    /// Template literal
    Template(TemplateLiteral),

    /// Tagged template
    TaggedTemplate {
        /// Tag function
        tag: Box<Expression>,
        /// Template
        quasi: TemplateLiteral,
        /// Extent
        span: Span,
    },

    /// `this`
    This {
        /// Trivia before the keyword
        ws_before: String,
        /// Extent
        span: Span,
    },

    /// `super` (only as callee or member object)
    Super {
        /// Trivia before the keyword
        ws_before: String,
        /// Extent
        span: Span,
    },

    /// Array literal
    Array(ArrayExpression),

    /// Object literal
    Object(ObjectExpression),

    /// Function expression
    Function(Box<Function>),

    /// Arrow function
    Arrow(Box<ArrowFunction>),

    /// Class expression
    Class(Box<Class>),

    /// Prefix unary operation
    Unary {
        /// Trivia before the operator
        ws_before: String,
        /// Operator
        operator: UnaryOperator,
        /// Operand
        argument: Box<Expression>,
        /// Extent
        span: Span,
    },

    /// `++` / `--`
    Update {
        /// Operator
        operator: UpdateOperator,
        /// Prefix form
        prefix: bool,
        /// Trivia before the operator
        ws_operator: String,
        /// Operand
        argument: Box<Expression>,
        /// Extent
        span: Span,
    },

    /// Binary or logical operation
    Binary {
        /// Left operand
        left: Box<Expression>,
        /// Trivia before the operator
        ws_operator: String,
        /// Operator
        operator: BinaryOperator,
        /// Right operand
        right: Box<Expression>,
        /// Extent
        span: Span,
    },

    /// Assignment
    Assignment {
        /// Target
        left: Box<Pattern>,
        /// Trivia before the operator
        ws_operator: String,
        /// Operator
        operator: AssignmentOperator,
        /// Value
        right: Box<Expression>,
        /// Extent
        span: Span,
    },

    /// `test ? consequent : alternate`
    Conditional {
        /// Condition
        test: Box<Expression>,
        /// Trivia before `?`
        ws_question: String,
        /// Value when truthy
        consequent: Box<Expression>,
        /// Trivia before `:`
        ws_colon: String,
        /// Value when falsy
        alternate: Box<Expression>,
        /// Extent
        span: Span,
    },

    /// Comma expression
    Sequence {
        /// Operands
        expressions: Vec<Expression>,
        /// Separator spellings
        separators: Vec<String>,
        /// Extent
        span: Span,
    },

    /// Call, including optional calls
    Call(CallExpression),

    /// `new callee(args)`
    New {
        /// Trivia before `new`
        ws_before: String,
        /// Constructor
        callee: Box<Expression>,
        /// Arguments; `None` for `new X` without parentheses
        arguments: Option<Arguments>,
        /// Extent
        span: Span,
    },

    /// Property access
    Member(MemberExpression),

    /// `new.target` / `import.meta`
    MetaProperty {
        /// `new` or `import`
        meta: Identifier,
        /// Trivia before `.`
        ws_dot: String,
        /// `target` or `meta`
        property: Identifier,
        /// Extent
        span: Span,
    },

    /// Dynamic `import(source)`
    Import {
        /// Trivia before `import`
        ws_before: String,
        /// Trivia before `(`
        ws_open: String,
        /// Module specifier
        source: Box<Expression>,
        /// Trivia before `)`
        ws_close: String,
        /// Extent
        span: Span,
    },

    /// `( expression )`
    Parenthesized {
        /// Trivia before `(`
        ws_before: String,
        /// Inner expression
        expression: Box<Expression>,
        /// Trivia before `)`
        ws_close: String,
        /// Extent
        span: Span,
    },

    /// `...argument` in arrays, calls and objects
    Spread(SpreadElement),

    /// `yield` / `yield* argument`
    Yield {
        /// Trivia before `yield`
        ws_before: String,
        /// Trivia before `*` when delegating
        delegate: Option<String>,
        /// Operand
        argument: Option<Box<Expression>>,
        /// Extent
        span: Span,
    },

    /// `await argument`
    Await {
        /// Trivia before `await`
        ws_before: String,
        /// Operand
        argument: Box<Expression>,
        /// Extent
        span: Span,
    },

    /// JSX element
    JsxElement(Box<JsxElement>),

    /// JSX fragment
    JsxFragment(Box<JsxFragment>),

    /// Parenthesized group awaiting `=>`; never present in a finished tree
    CoverParameters(CoverParameters),
}

/// `[a, , ...b]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    /// Trivia before `[`
    pub ws_before: String,
    /// Elements; `None` marks a hole
    pub elements: Vec<Option<Expression>>,
    /// Comma spellings, including a trailing comma
    pub separators: Vec<String>,
    /// Trivia before `]`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `{ a, b: 1, ...c }`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    /// Trivia before `{`
    pub ws_before: String,
    /// Members
    pub properties: Vec<ObjectMember>,
    /// Comma spellings, including a trailing comma
    pub separators: Vec<String>,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// Object literal member.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// `key: value`, shorthand, method or accessor
    Property(Property),
    /// `...expression`
    Spread(SpreadElement),
}

/// Property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Plain value or method
    Init,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// Modifier keywords written before a method or field key.
///
/// Each is `Some(trivia)` when present. Accessor spelling comes from the
/// owning node's kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodPrefix {
    /// `static`
    pub ws_static: Option<String>,
    /// `async`
    pub ws_async: Option<String>,
    /// `get` / `set`
    pub ws_accessor: Option<String>,
    /// `*`
    pub ws_star: Option<String>,
}

/// Object literal property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Modifiers
    pub prefix: MethodPrefix,
    /// Key
    pub key: PropertyKey,
    /// Value; a [`Function`] rendered as a bare method when `method` or an
    /// accessor
    pub value: Expression,
    /// Kind
    pub kind: PropertyKind,
    /// `key() {}`
    pub method: bool,
    /// `{ a }` or `{ a = 1 }`; the value carries the only spelling
    pub shorthand: bool,
    /// Trivia before `:`
    pub ws_colon: String,
    /// Extent
    pub span: Span,
}

/// Property and method keys.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// `a`, keywords included
    Identifier(Identifier),
    /// `"a"`, `1`
    Literal(Literal),
    /// `#a` (classes only)
    Private(PrivateIdentifier),
    /// `[expression]`
    Computed {
        /// Trivia before `[`
        ws_open: String,
        /// Key expression
        expression: Box<Expression>,
        /// Trivia before `]`
        ws_close: String,
    },
}

impl PropertyKey {
    /// Static name of the key, if it has one.
    pub fn static_name(&self) -> Option<String> {
        match self {
            PropertyKey::Identifier(id) => Some(id.name().to_string()),
            PropertyKey::Literal(lit) => match lit.value() {
                LiteralValue::String(s) => Some(s.clone()),
                LiteralValue::Number(n) => Some(crate::unparse::render_number(*n)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// `...argument`
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    /// Trivia before `...`
    pub ws_before: String,
    /// Operand
    pub argument: Box<Expression>,
    /// Extent
    pub span: Span,
}

/// Parenthesized argument list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    /// Trivia before `(`
    pub ws_open: String,
    /// Arguments, spreads included
    pub items: Vec<Expression>,
    /// Comma spellings, including a trailing comma
    pub separators: Vec<String>,
    /// Trivia before `)`
    pub ws_close: String,
}

/// `callee(args)` and `callee?.(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// Function
    pub callee: Box<Expression>,
    /// `?.` before the arguments
    pub optional: bool,
    /// Trivia before `?.`
    pub ws_optional: String,
    /// Arguments
    pub arguments: Arguments,
    /// Extent
    pub span: Span,
}

/// Property of a member access.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `.name`
    Static(Identifier),
    /// `.#name`
    Private(PrivateIdentifier),
    /// `[expression]`
    Computed {
        /// Trivia before `[`
        ws_open: String,
        /// Key
        expression: Box<Expression>,
        /// Trivia before `]`
        ws_close: String,
    },
}

/// `object.property`, `object[property]`, `object?.property`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// Object
    pub object: Box<Expression>,
    /// `?.` access
    pub optional: bool,
    /// Trivia before `.` or `?.`
    pub ws_dot: String,
    /// Property
    pub property: MemberProperty,
    /// Extent
    pub span: Span,
}

/// Raw fragments of `( ... )` or `async( ... )` kept until `=>` decides
/// what they are.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverParameters {
    /// Trivia before `async`, when the group follows `async`
    pub ws_async: Option<String>,
    /// Trivia before `(`
    pub ws_open: String,
    /// Elements parsed permissively
    pub items: Vec<Expression>,
    /// Comma spellings
    pub separators: Vec<String>,
    /// Trivia before `)`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

// ==================== Functions and classes ====================

/// Formal parameter list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormalParameters {
    /// Trivia before `(`
    pub ws_open: String,
    /// Parameters
    pub items: Vec<Pattern>,
    /// Comma spellings, including a trailing comma
    pub separators: Vec<String>,
    /// Trivia before `)`
    pub ws_close: String,
}

impl FormalParameters {
    /// Plain identifiers only: no defaults, patterns or rest.
    pub fn is_simple(&self) -> bool {
        self.items.iter().all(|p| matches!(p, Pattern::Identifier(_)))
    }
}

/// `{ statements }` of a function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionBody {
    /// Trivia before `{`
    pub ws_open: String,
    /// Statements, directives first
    pub body: Vec<Statement>,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// Function declaration, expression or method value.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// `async function`
    pub is_async: bool,
    /// Trivia before `async`
    pub ws_async: String,
    /// Trivia before `function`
    pub ws_keyword: String,
    /// `function*`
    pub generator: bool,
    /// Trivia before `*`
    pub ws_star: String,
    /// Name
    pub id: Option<Identifier>,
    /// Parameters
    pub params: FormalParameters,
    /// Body
    pub body: FunctionBody,
    /// Extent
    pub span: Span,
}

/// Arrow parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowParameters {
    /// `x => ...`
    Bare(Identifier),
    /// `(a, b) => ...`
    Parenthesized(FormalParameters),
}

/// Arrow body.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    /// `=> { ... }`
    Block(FunctionBody),
    /// `=> expression`
    Expression(Box<Expression>),
}

/// `(params) => body`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    /// `async` arrow
    pub is_async: bool,
    /// Trivia before `async`
    pub ws_async: String,
    /// Parameters
    pub params: ArrowParameters,
    /// Trivia before `=>`
    pub ws_arrow: String,
    /// Body
    pub body: ArrowBody,
    /// Extent
    pub span: Span,
}

/// `extends expression`
#[derive(Debug, Clone, PartialEq)]
pub struct Heritage {
    /// Trivia before `extends`
    pub ws_extends: String,
    /// Superclass
    pub expression: Box<Expression>,
}

/// Class declaration or expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Trivia before `class`
    pub ws_before: String,
    /// Name
    pub id: Option<Identifier>,
    /// Superclass
    pub super_class: Option<Heritage>,
    /// Trivia before `{`
    pub ws_open: String,
    /// Members
    pub body: Vec<ClassElement>,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// Method kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `constructor() {}`
    Constructor,
    /// Ordinary method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Class member.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassElement {
    /// Method, accessor or constructor
    Method(MethodDefinition),
    /// Field
    Property(PropertyDefinition),
    /// `static { ... }`
    StaticBlock(StaticBlock),
    /// Stray `;`
    Empty {
        /// Trivia before `;`
        ws_before: String,
        /// Extent
        span: Span,
    },
}

/// Class method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Modifiers
    pub prefix: MethodPrefix,
    /// Kind
    pub kind: MethodKind,
    /// Key
    pub key: PropertyKey,
    /// Function, rendered as a bare method
    pub value: Function,
    /// Extent
    pub span: Span,
}

/// Class field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// Modifiers (`static` only)
    pub prefix: MethodPrefix,
    /// Key
    pub key: PropertyKey,
    /// Initializer
    pub value: Option<Initializer>,
    /// Terminator
    pub semicolon: Semicolon,
    /// Extent
    pub span: Span,
}

/// `static { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBlock {
    /// Trivia before `static`
    pub ws_before: String,
    /// Trivia before `{`
    pub ws_open: String,
    /// Statements
    pub body: Vec<Statement>,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `= value`
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    /// Trivia before `=`
    pub ws_eq: String,
    /// Value
    pub value: Expression,
}

// ==================== Patterns ====================

/// Binding and assignment targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// `x`
    Identifier(Identifier),
    /// Member access or parenthesized simple target (assignment only)
    Expression(Box<Expression>),
    /// `[a, b]`
    Array(ArrayPattern),
    /// `{ a, b: c }`
    Object(ObjectPattern),
    /// `target = default`
    Assignment(AssignmentPattern),
    /// `...target`
    Rest(RestElement),
}

/// `[a, , ...b]` as a target.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// Trivia before `[`
    pub ws_before: String,
    /// Elements; `None` marks a hole
    pub elements: Vec<Option<Pattern>>,
    /// Comma spellings
    pub separators: Vec<String>,
    /// Trivia before `]`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `{ a, b: c, ...d }` as a target.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    /// Trivia before `{`
    pub ws_before: String,
    /// Members
    pub properties: Vec<ObjectPatternMember>,
    /// Comma spellings
    pub separators: Vec<String>,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// Object pattern member.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternMember {
    /// `key: target` or shorthand
    Property(PatternProperty),
    /// `...target`
    Rest(RestElement),
}

/// Object pattern property.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    /// Key
    pub key: PropertyKey,
    /// Target
    pub value: Pattern,
    /// `{ a }` / `{ a = 1 }`
    pub shorthand: bool,
    /// Trivia before `:`
    pub ws_colon: String,
    /// Extent
    pub span: Span,
}

/// `target = default`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    /// Target
    pub left: Box<Pattern>,
    /// Trivia before `=`
    pub ws_eq: String,
    /// Default value
    pub right: Box<Expression>,
    /// Extent
    pub span: Span,
}

/// `...target`
#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    /// Trivia before `...`
    pub ws_before: String,
    /// Target
    pub argument: Box<Pattern>,
    /// Extent
    pub span: Span,
}

impl Pattern {
    /// Names bound by this pattern, in source order.
    pub fn bound_names(&self) -> Vec<&Identifier> {
        let mut names = Vec::new();
        self.collect_bound_names(&mut names);
        names
    }

    fn collect_bound_names<'p>(&'p self, names: &mut Vec<&'p Identifier>) {
        match self {
            Pattern::Identifier(id) => names.push(id),
            Pattern::Expression(_) => {}
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    element.collect_bound_names(names);
                }
            }
            Pattern::Object(object) => {
                for member in &object.properties {
                    match member {
                        ObjectPatternMember::Property(prop) => prop.value.collect_bound_names(names),
                        ObjectPatternMember::Rest(rest) => rest.argument.collect_bound_names(names),
                    }
                }
            }
            Pattern::Assignment(assign) => assign.left.collect_bound_names(names),
            Pattern::Rest(rest) => rest.argument.collect_bound_names(names),
        }
    }
}

// ==================== Statements ====================

/// JavaScript statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Expression statement or directive
    Expression(ExpressionStatement),

    /// `var` / `let` / `const`
    Variable(VariableDeclaration),

    /// Function declaration
    Function(Box<Function>),

    /// Class declaration
    Class(Box<Class>),

    /// `{ ... }`
    Block(BlockStatement),

    /// `;`
    Empty {
        /// Trivia before `;`
        ws_before: String,
        /// Extent
        span: Span,
    },

    /// `if (test) consequent else alternate`
    If {
        /// Trivia before `if`
        ws_before: String,
        /// Trivia before `(`
        ws_open: String,
        /// Condition
        test: Expression,
        /// Trivia before `)`
        ws_close: String,
        /// Then branch
        consequent: Box<Statement>,
        /// Else branch
        alternate: Option<ElseClause>,
        /// Extent
        span: Span,
    },

    /// `for (init; test; update) body`
    For(ForStatement),

    /// `for (left in right) body`
    ForIn(ForInStatement),

    /// `for (left of right) body`
    ForOf(ForOfStatement),

    /// `while (test) body`
    While {
        /// Trivia before `while`
        ws_before: String,
        /// Trivia before `(`
        ws_open: String,
        /// Condition
        test: Expression,
        /// Trivia before `)`
        ws_close: String,
        /// Body
        body: Box<Statement>,
        /// Extent
        span: Span,
    },

    /// `do body while (test);`
    DoWhile {
        /// Trivia before `do`
        ws_before: String,
        /// Body
        body: Box<Statement>,
        /// Trivia before `while`
        ws_while: String,
        /// Trivia before `(`
        ws_open: String,
        /// Condition
        test: Expression,
        /// Trivia before `)`
        ws_close: String,
        /// Terminator
        semicolon: Semicolon,
        /// Extent
        span: Span,
    },

    /// `return argument;`
    Return {
        /// Trivia before `return`
        ws_before: String,
        /// Value
        argument: Option<Expression>,
        /// Terminator
        semicolon: Semicolon,
        /// Extent
        span: Span,
    },

    /// `break label;`
    Break {
        /// Trivia before `break`
        ws_before: String,
        /// Target label
        label: Option<Identifier>,
        /// Terminator
        semicolon: Semicolon,
        /// Extent
        span: Span,
    },

    /// `continue label;`
    Continue {
        /// Trivia before `continue`
        ws_before: String,
        /// Target label
        label: Option<Identifier>,
        /// Terminator
        semicolon: Semicolon,
        /// Extent
        span: Span,
    },

    /// `throw argument;`
    Throw {
        /// Trivia before `throw`
        ws_before: String,
        /// Exception
        argument: Expression,
        /// Terminator
        semicolon: Semicolon,
        /// Extent
        span: Span,
    },

    /// `try` / `catch` / `finally`
    Try(TryStatement),

    /// `switch`
    Switch(SwitchStatement),

    /// `label: body`
    Labeled {
        /// Label
        label: Identifier,
        /// Trivia before `:`
        ws_colon: String,
        /// Body
        body: Box<Statement>,
        /// Extent
        span: Span,
    },

    /// `debugger;`
    Debugger {
        /// Trivia before `debugger`
        ws_before: String,
        /// Terminator
        semicolon: Semicolon,
        /// Extent
        span: Span,
    },

    /// `with (object) body`
    With {
        /// Trivia before `with`
        ws_before: String,
        /// Trivia before `(`
        ws_open: String,
        /// Scope object
        object: Expression,
        /// Trivia before `)`
        ws_close: String,
        /// Body
        body: Box<Statement>,
        /// Extent
        span: Span,
    },

    /// `import ... from "m";`
    Import(ImportDeclaration),

    /// `export { ... }` or `export declaration`
    ExportNamed(ExportNamedDeclaration),

    /// `export default ...`
    ExportDefault(ExportDefaultDeclaration),

    /// `export * from "m";`
    ExportAll(ExportAllDeclaration),
}

/// Expression statement; `directive` holds the raw text of a prologue string.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// Expression
    pub expression: Expression,
    /// Directive text without quotes, for prologue strings
    pub directive: Option<String>,
    /// Terminator
    pub semicolon: Semicolon,
    /// Extent
    pub span: Span,
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Trivia before `{`
    pub ws_before: String,
    /// Statements
    pub body: Vec<Statement>,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `else body`
#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    /// Trivia before `else`
    pub ws_else: String,
    /// Body
    pub body: Box<Statement>,
}

/// Declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

impl VariableKind {
    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// `var a = 1, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Trivia before the keyword
    pub ws_before: String,
    /// Keyword
    pub kind: VariableKind,
    /// Declarators
    pub declarations: Vec<VariableDeclarator>,
    /// Comma spellings
    pub separators: Vec<String>,
    /// Terminator; `None` inside a `for` head
    pub semicolon: Option<Semicolon>,
    /// Extent
    pub span: Span,
}

/// `id = init`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Target
    pub id: Pattern,
    /// Initializer
    pub init: Option<Initializer>,
    /// Extent
    pub span: Span,
}

/// Initializer of a `for` head.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// Declaration
    Variable(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// Left side of `for-in` / `for-of`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForTarget {
    /// `var x` / `let [a, b]`
    Variable(VariableDeclaration),
    /// Assignment target
    Pattern(Pattern),
}

/// `for (init; test; update) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// Trivia before `for`
    pub ws_before: String,
    /// Trivia before `(`
    pub ws_open: String,
    /// Initializer
    pub init: Option<ForInit>,
    /// Trivia before the first `;`
    pub ws_first_semi: String,
    /// Condition
    pub test: Option<Expression>,
    /// Trivia before the second `;`
    pub ws_second_semi: String,
    /// Update
    pub update: Option<Expression>,
    /// Trivia before `)`
    pub ws_close: String,
    /// Body
    pub body: Box<Statement>,
    /// Extent
    pub span: Span,
}

/// `for (left in right) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// Trivia before `for`
    pub ws_before: String,
    /// Trivia before `(`
    pub ws_open: String,
    /// Target
    pub left: ForTarget,
    /// Trivia before `in`
    pub ws_in: String,
    /// Object
    pub right: Expression,
    /// Trivia before `)`
    pub ws_close: String,
    /// Body
    pub body: Box<Statement>,
    /// Extent
    pub span: Span,
}

/// `for await? (left of right) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    /// Trivia before `for`
    pub ws_before: String,
    /// Trivia before `await`, for `for await`
    pub ws_await: Option<String>,
    /// Trivia before `(`
    pub ws_open: String,
    /// Target
    pub left: ForTarget,
    /// Trivia before `of`
    pub ws_of: String,
    /// Iterable
    pub right: Expression,
    /// Trivia before `)`
    pub ws_close: String,
    /// Body
    pub body: Box<Statement>,
    /// Extent
    pub span: Span,
}

/// `try block catch (param) body finally body`
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// Trivia before `try`
    pub ws_before: String,
    /// Protected block
    pub block: BlockStatement,
    /// Handler
    pub handler: Option<CatchClause>,
    /// Finalizer
    pub finalizer: Option<FinallyClause>,
    /// Extent
    pub span: Span,
}

/// `catch (param) body`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Trivia before `catch`
    pub ws_before: String,
    /// Parameter; absent for `catch {}`
    pub param: Option<CatchParameter>,
    /// Body
    pub body: BlockStatement,
    /// Extent
    pub span: Span,
}

/// `(pattern)` after `catch`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchParameter {
    /// Trivia before `(`
    pub ws_open: String,
    /// Binding
    pub pattern: Pattern,
    /// Trivia before `)`
    pub ws_close: String,
}

/// `finally body`
#[derive(Debug, Clone, PartialEq)]
pub struct FinallyClause {
    /// Trivia before `finally`
    pub ws_finally: String,
    /// Body
    pub body: BlockStatement,
}

/// `switch (discriminant) { cases }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// Trivia before `switch`
    pub ws_before: String,
    /// Trivia before `(`
    pub ws_open: String,
    /// Value switched on
    pub discriminant: Expression,
    /// Trivia before `)`
    pub ws_close: String,
    /// Trivia before `{`
    pub ws_lbrace: String,
    /// Clauses
    pub cases: Vec<SwitchCase>,
    /// Trivia before `}`
    pub ws_rbrace: String,
    /// Extent
    pub span: Span,
}

/// `case test:` / `default:`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Trivia before `case` / `default`
    pub ws_before: String,
    /// Test; `None` for `default`
    pub test: Option<Expression>,
    /// Trivia before `:`
    pub ws_colon: String,
    /// Statements
    pub consequent: Vec<Statement>,
    /// Extent
    pub span: Span,
}

// ==================== Modules ====================

/// Name in an import or export list: identifier or string.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    /// `a`
    Identifier(Identifier),
    /// `"a-b"`
    String(Literal),
}

/// `as name`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportAlias {
    /// Trivia before `as`
    pub ws_as: String,
    /// Local binding
    pub local: Identifier,
}

/// `imported as local`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    /// Exported name in the source module
    pub imported: ModuleExportName,
    /// Renaming
    pub alias: Option<ImportAlias>,
    /// Extent
    pub span: Span,
}

/// `* as name`
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceImport {
    /// Trivia before `*`
    pub ws_star: String,
    /// Trivia before `as`
    pub ws_as: String,
    /// Local binding
    pub local: Identifier,
    /// Extent
    pub span: Span,
}

/// `{ a, b as c }`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedImports {
    /// Trivia before `{`
    pub ws_open: String,
    /// Specifiers
    pub specifiers: Vec<ImportSpecifier>,
    /// Comma spellings
    pub separators: Vec<String>,
    /// Trivia before `}`
    pub ws_close: String,
}

/// Bindings of an import declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportClause {
    /// Default binding
    pub default: Option<Identifier>,
    /// Trivia before the `,` after the default binding
    pub ws_comma: String,
    /// `* as ns`
    pub namespace: Option<NamespaceImport>,
    /// `{ ... }`
    pub named: Option<NamedImports>,
}

/// `import clause from "m";` / `import "m";`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// Trivia before `import`
    pub ws_before: String,
    /// Bindings; `None` for a bare import
    pub clause: Option<ImportClause>,
    /// Trivia before `from`
    pub ws_from: String,
    /// Module specifier
    pub source: Literal,
    /// Terminator
    pub semicolon: Semicolon,
    /// Extent
    pub span: Span,
}

/// `as exported`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAlias {
    /// Trivia before `as`
    pub ws_as: String,
    /// Exported name
    pub exported: ModuleExportName,
}

/// `local as exported`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// Local name
    pub local: ModuleExportName,
    /// Renaming
    pub alias: Option<ExportAlias>,
    /// Extent
    pub span: Span,
}

/// `{ a, b as c }` in an export.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedExports {
    /// Trivia before `{`
    pub ws_open: String,
    /// Specifiers
    pub specifiers: Vec<ExportSpecifier>,
    /// Comma spellings
    pub separators: Vec<String>,
    /// Trivia before `}`
    pub ws_close: String,
}

/// `from "m"`
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    /// Trivia before `from`
    pub ws_from: String,
    /// Module specifier
    pub source: Literal,
}

/// `export declaration` / `export { ... } from "m";`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDeclaration {
    /// Trivia before `export`
    pub ws_before: String,
    /// Exported declaration
    pub declaration: Option<Box<Statement>>,
    /// Export list
    pub specifiers: Option<NamedExports>,
    /// Re-export source
    pub source: Option<FromClause>,
    /// Terminator for the list form
    pub semicolon: Option<Semicolon>,
    /// Extent
    pub span: Span,
}

/// What follows `export default`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultKind {
    /// Function declaration (name optional)
    Function(Box<Function>),
    /// Class declaration (name optional)
    Class(Box<Class>),
    /// Any assignment expression
    Expression {
        /// Value
        expression: Expression,
        /// Terminator
        semicolon: Semicolon,
    },
}

/// `export default ...`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultDeclaration {
    /// Trivia before `export`
    pub ws_before: String,
    /// Trivia before `default`
    pub ws_default: String,
    /// Exported value
    pub declaration: ExportDefaultKind,
    /// Extent
    pub span: Span,
}

/// `export * as ns from "m";`
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDeclaration {
    /// Trivia before `export`
    pub ws_before: String,
    /// Trivia before `*`
    pub ws_star: String,
    /// `as ns`
    pub exported: Option<ExportAlias>,
    /// Trivia before `from`
    pub ws_from: String,
    /// Module specifier
    pub source: Literal,
    /// Terminator
    pub semicolon: Semicolon,
    /// Extent
    pub span: Span,
}

// ==================== JSX ====================

/// Tag or attribute name part (may contain `-`).
#[derive(Debug, Clone, PartialEq)]
pub struct JsxIdentifier {
    /// Trivia before the name
    pub ws_before: String,
    /// Name
    pub name: String,
    /// Extent
    pub span: Span,
}

/// `ns:name`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxNamespacedName {
    /// Namespace
    pub namespace: JsxIdentifier,
    /// Trivia before `:`
    pub ws_colon: String,
    /// Local name
    pub name: JsxIdentifier,
    /// Extent
    pub span: Span,
}

/// `a.b.c`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxMemberExpression {
    /// Object
    pub object: Box<JsxElementName>,
    /// Trivia before `.`
    pub ws_dot: String,
    /// Property
    pub property: JsxIdentifier,
    /// Extent
    pub span: Span,
}

/// Element name.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxElementName {
    /// `div`
    Identifier(JsxIdentifier),
    /// `svg:rect`
    Namespaced(JsxNamespacedName),
    /// `Foo.Bar`
    Member(JsxMemberExpression),
}

impl JsxElementName {
    /// Name as written, without trivia; used to match closing tags.
    pub fn qualified_name(&self) -> String {
        match self {
            JsxElementName::Identifier(id) => id.name.clone(),
            JsxElementName::Namespaced(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
            JsxElementName::Member(member) => {
                format!("{}.{}", member.object.qualified_name(), member.property.name)
            }
        }
    }
}

/// Attribute name.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeName {
    /// `id`
    Identifier(JsxIdentifier),
    /// `xlink:href`
    Namespaced(JsxNamespacedName),
}

/// Attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeValue {
    /// `"text"` (entities decoded in the value, no escapes)
    String(Literal),
    /// `{expression}`
    Expression(JsxExpressionContainer),
    /// `<a/>`
    Element(Box<JsxElement>),
    /// `<></>`
    Fragment(Box<JsxFragment>),
}

/// `name=value` or bare `name`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttribute {
    /// Name
    pub name: JsxAttributeName,
    /// Trivia before `=`
    pub ws_eq: String,
    /// Value
    pub value: Option<JsxAttributeValue>,
    /// Extent
    pub span: Span,
}

/// `{...argument}` inside a tag
#[derive(Debug, Clone, PartialEq)]
pub struct JsxSpreadAttribute {
    /// Trivia before `{`
    pub ws_before: String,
    /// Trivia before `...`
    pub ws_dots: String,
    /// Spread operand
    pub argument: Expression,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// Attribute list entry.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeItem {
    /// `name=value`
    Attribute(JsxAttribute),
    /// `{...spread}`
    Spread(JsxSpreadAttribute),
}

/// `<name attributes>` / `<name attributes />`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxOpeningElement {
    /// Trivia before `<`
    pub ws_before: String,
    /// Name
    pub name: JsxElementName,
    /// Attributes
    pub attributes: Vec<JsxAttributeItem>,
    /// Trivia before `/` for self-closing tags
    pub self_closing: Option<String>,
    /// Trivia before `>`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `</name>`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxClosingElement {
    /// Trivia before `<`
    pub ws_before: String,
    /// Trivia before `/`
    pub ws_slash: String,
    /// Name
    pub name: JsxElementName,
    /// Trivia before `>`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `<a>children</a>` / `<a/>`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    /// Opening tag
    pub opening: JsxOpeningElement,
    /// Children
    pub children: Vec<JsxChild>,
    /// Closing tag; `None` when self-closing
    pub closing: Option<JsxClosingElement>,
    /// Extent
    pub span: Span,
}

/// `<>children</>`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxFragment {
    /// Trivia before the opening `<`
    pub ws_before: String,
    /// Trivia before the opening `>`
    pub ws_open_close: String,
    /// Children
    pub children: Vec<JsxChild>,
    /// Trivia before the closing `<`
    pub ws_closing: String,
    /// Trivia before the closing `/`
    pub ws_closing_slash: String,
    /// Trivia before the closing `>`
    pub ws_closing_close: String,
    /// Extent
    pub span: Span,
}

/// Text between tags.
///
/// `raw` is emitted while unedited; [`JsxText::set_value`] re-encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxText {
    value: String,
    raw: String,
    /// Extent
    pub span: Span,
}

impl JsxText {
    pub(crate) fn from_parts(value: &str, raw: &str, span: Span) -> Self {
        JsxText {
            value: value.to_string(),
            raw: raw.to_string(),
            span,
        }
    }

    /// Decoded text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Text as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replaces the text; markup characters are written as references.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.raw = crate::entities::encode_text(&self.value);
    }
}

/// Empty `{}` or `{/* comment */}` child or attribute value.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxEmptyExpression {
    /// Trivia inside the braces
    pub ws: String,
    /// Extent
    pub span: Span,
}

/// Contents of `{ ... }`.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxExpression {
    /// Nothing but trivia
    Empty(JsxEmptyExpression),
    /// An expression
    Expression(Box<Expression>),
}

/// `{expression}`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxExpressionContainer {
    /// Trivia before `{`
    pub ws_before: String,
    /// Contents
    pub expression: JsxExpression,
    /// Trivia before `}` (empty for an empty expression)
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// `{...expression}` as a child
#[derive(Debug, Clone, PartialEq)]
pub struct JsxSpreadChild {
    /// Trivia before `{`
    pub ws_before: String,
    /// Trivia before `...`
    pub ws_dots: String,
    /// Operand
    pub expression: Expression,
    /// Trivia before `}`
    pub ws_close: String,
    /// Extent
    pub span: Span,
}

/// Child of an element or fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    /// Text run
    Text(JsxText),
    /// `{expression}`
    Expression(JsxExpressionContainer),
    /// `{...expression}`
    Spread(JsxSpreadChild),
    /// Nested element
    Element(Box<JsxElement>),
    /// Nested fragment
    Fragment(Box<JsxFragment>),
}

// ==================== Node kinds ====================

macro_rules! node_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Closed set of node kinds reported to a [`crate::Delegate`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $(
                #[allow(missing_docs)]
                $variant,
            )*
        }

        impl NodeKind {
            /// Conventional (ESTree) type name.
            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $name,)*
                }
            }
        }
    };
}

node_kinds! {
    Program => "Program",
    Identifier => "Identifier",
    PrivateIdentifier => "PrivateIdentifier",
    Literal => "Literal",
    TemplateElement => "TemplateElement",
    TemplateLiteral => "TemplateLiteral",
    TaggedTemplateExpression => "TaggedTemplateExpression",
    ThisExpression => "ThisExpression",
    Super => "Super",
    ArrayExpression => "ArrayExpression",
    ObjectExpression => "ObjectExpression",
    Property => "Property",
    SpreadElement => "SpreadElement",
    FunctionExpression => "FunctionExpression",
    FunctionDeclaration => "FunctionDeclaration",
    ArrowFunctionExpression => "ArrowFunctionExpression",
    ClassExpression => "ClassExpression",
    ClassDeclaration => "ClassDeclaration",
    MethodDefinition => "MethodDefinition",
    PropertyDefinition => "PropertyDefinition",
    StaticBlock => "StaticBlock",
    UnaryExpression => "UnaryExpression",
    UpdateExpression => "UpdateExpression",
    BinaryExpression => "BinaryExpression",
    LogicalExpression => "LogicalExpression",
    AssignmentExpression => "AssignmentExpression",
    ConditionalExpression => "ConditionalExpression",
    SequenceExpression => "SequenceExpression",
    CallExpression => "CallExpression",
    NewExpression => "NewExpression",
    MemberExpression => "MemberExpression",
    MetaProperty => "MetaProperty",
    ImportExpression => "ImportExpression",
    ParenthesizedExpression => "ParenthesizedExpression",
    YieldExpression => "YieldExpression",
    AwaitExpression => "AwaitExpression",
    ArrayPattern => "ArrayPattern",
    ObjectPattern => "ObjectPattern",
    AssignmentPattern => "AssignmentPattern",
    RestElement => "RestElement",
    ExpressionStatement => "ExpressionStatement",
    Directive => "Directive",
    VariableDeclaration => "VariableDeclaration",
    VariableDeclarator => "VariableDeclarator",
    BlockStatement => "BlockStatement",
    EmptyStatement => "EmptyStatement",
    IfStatement => "IfStatement",
    ForStatement => "ForStatement",
    ForInStatement => "ForInStatement",
    ForOfStatement => "ForOfStatement",
    WhileStatement => "WhileStatement",
    DoWhileStatement => "DoWhileStatement",
    ReturnStatement => "ReturnStatement",
    BreakStatement => "BreakStatement",
    ContinueStatement => "ContinueStatement",
    ThrowStatement => "ThrowStatement",
    TryStatement => "TryStatement",
    CatchClause => "CatchClause",
    SwitchStatement => "SwitchStatement",
    SwitchCase => "SwitchCase",
    LabeledStatement => "LabeledStatement",
    DebuggerStatement => "DebuggerStatement",
    WithStatement => "WithStatement",
    ImportDeclaration => "ImportDeclaration",
    ImportSpecifier => "ImportSpecifier",
    ImportNamespaceSpecifier => "ImportNamespaceSpecifier",
    ExportNamedDeclaration => "ExportNamedDeclaration",
    ExportSpecifier => "ExportSpecifier",
    ExportDefaultDeclaration => "ExportDefaultDeclaration",
    ExportAllDeclaration => "ExportAllDeclaration",
    JsxIdentifier => "JSXIdentifier",
    JsxNamespacedName => "JSXNamespacedName",
    JsxMemberExpression => "JSXMemberExpression",
    JsxAttribute => "JSXAttribute",
    JsxSpreadAttribute => "JSXSpreadAttribute",
    JsxOpeningElement => "JSXOpeningElement",
    JsxClosingElement => "JSXClosingElement",
    JsxElement => "JSXElement",
    JsxFragment => "JSXFragment",
    JsxText => "JSXText",
    JsxExpressionContainer => "JSXExpressionContainer",
    JsxEmptyExpression => "JSXEmptyExpression",
    JsxSpreadChild => "JSXSpreadChild",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_names() {
        assert_eq!(NodeKind::Program.name(), "Program");
        assert_eq!(NodeKind::JsxElement.name(), "JSXElement");
        assert_eq!(NodeKind::LogicalExpression.name(), "LogicalExpression");
    }

    #[test]
    fn test_identifier_set_name_drops_escapes() {
        let mut id = Identifier::from_parts(" ", "abc", "\\u0061bc", Span::default());
        assert_eq!(id.name(), "abc");
        id.set_name("xyz");
        assert_eq!(id.raw(), "xyz");
        assert_eq!(id.ws_before, " ");
    }

    #[test]
    fn test_literal_set_value_keeps_quote_style() {
        let mut lit = Literal::from_parts("", LiteralValue::String("a".into()), "'a'", Span::default());
        lit.set_value(LiteralValue::String("it's".into()));
        assert_eq!(lit.raw(), "'it\\'s'");
        assert_eq!(lit.as_str(), Some("it's"));
    }

    #[test]
    fn test_operator_precedence_table() {
        assert!(BinaryOperator::Multiply.precedence() > BinaryOperator::Add.precedence());
        assert!(BinaryOperator::Add.precedence() > BinaryOperator::LessThan.precedence());
        assert!(BinaryOperator::LogicalAnd.precedence() > BinaryOperator::LogicalOr.precedence());
        assert_eq!(BinaryOperator::from_token("instanceof"), Some(BinaryOperator::Instanceof));
        assert_eq!(AssignmentOperator::from_token("??="), Some(AssignmentOperator::NullishCoalescing));
    }

    #[test]
    fn test_pattern_bound_names() {
        let pattern = Pattern::Array(ArrayPattern {
            ws_before: String::new(),
            elements: vec![
                Some(Pattern::Identifier(Identifier::new("a"))),
                None,
                Some(Pattern::Rest(RestElement {
                    ws_before: String::new(),
                    argument: Box::new(Pattern::Identifier(Identifier::new("b"))),
                    span: Span::default(),
                })),
            ],
            separators: vec![",".into(), ",".into()],
            ws_close: String::new(),
            span: Span::default(),
        });
        let names: Vec<_> = pattern.bound_names().iter().map(|id| id.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_jsx_qualified_name() {
        let ident = |name: &str| JsxIdentifier {
            ws_before: String::new(),
            name: name.to_string(),
            span: Span::default(),
        };
        let name = JsxElementName::Member(JsxMemberExpression {
            object: Box::new(JsxElementName::Identifier(ident("Foo"))),
            ws_dot: String::new(),
            property: ident("Bar"),
            span: Span::default(),
        });
        assert_eq!(name.qualified_name(), "Foo.Bar");
    }

    #[test]
    fn test_jsx_text_set_value_encodes() {
        let mut text = JsxText::from_parts("a", "a", Span::default());
        text.set_value("1 < 2");
        assert_eq!(text.raw(), "1 &lt; 2");
    }
}
