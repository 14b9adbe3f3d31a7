//! Error construction and the throw/tolerate policy.
//!
//! The scanner and parser never format messages ad hoc: every wording lives
//! in [`messages`], and every error passes through an [`ErrorHandler`] that
//! either hands it back for `?` propagation or records it and lets parsing
//! continue.

use core_types::{ErrorKind, JsError, JsResult};

/// Message texts shared by the scanner and parser.
#[allow(missing_docs)]
pub mod messages {
    pub const UNEXPECTED_EOS: &str = "Unexpected end of input";
    pub const UNEXPECTED_IDENTIFIER: &str = "Unexpected identifier";
    pub const UNEXPECTED_NUMBER: &str = "Unexpected number";
    pub const UNEXPECTED_STRING: &str = "Unexpected string";
    pub const UNEXPECTED_TEMPLATE: &str = "Unexpected quasi";
    pub const UNEXPECTED_RESERVED: &str = "Unexpected reserved word";
    pub const UNEXPECTED_TOKEN_ILLEGAL: &str = "Invalid or unexpected token";
    pub const UNTERMINATED_COMMENT: &str = "Unterminated multi-line comment";
    pub const UNTERMINATED_TEMPLATE: &str = "Unterminated template literal";
    pub const UNTERMINATED_REGEXP: &str = "Invalid regular expression: missing /";
    pub const INVALID_REGEXP_FLAGS: &str = "Invalid regular expression flags";
    pub const INVALID_ESCAPE: &str = "Invalid hexadecimal escape sequence";
    pub const INVALID_UNICODE_ESCAPE: &str = "Invalid Unicode escape sequence";
    pub const ESCAPED_KEYWORD: &str = "Keyword must not contain escaped characters";
    pub const INVALID_LHS_IN_ASSIGNMENT: &str = "Invalid left-hand side in assignment";
    pub const INVALID_LHS_IN_FOR_IN: &str = "Invalid left-hand side in for-in";
    pub const INVALID_LHS_IN_FOR_LOOP: &str = "Invalid left-hand side in for-loop";
    pub const INVALID_DESTRUCTURING_TARGET: &str = "Invalid destructuring assignment target";
    pub const INVALID_REST_POSITION: &str = "Rest element must be last element";
    pub const INVALID_COVER_INITIALIZED_NAME: &str = "Invalid shorthand property initializer";
    pub const ILLEGAL_BREAK: &str = "Illegal break statement";
    pub const ILLEGAL_CONTINUE: &str = "Illegal continue statement: no surrounding iteration statement";
    pub const ILLEGAL_RETURN: &str = "Illegal return statement";
    pub const NEWLINE_AFTER_THROW: &str = "Illegal newline after throw";
    pub const NO_CATCH_OR_FINALLY: &str = "Missing catch or finally after try";
    pub const MULTIPLE_DEFAULTS_IN_SWITCH: &str = "More than one default clause in switch statement";
    pub const STRICT_MODE_WITH: &str = "Strict mode code may not include a with statement";
    pub const STRICT_CATCH_VARIABLE: &str = "Catch variable may not be eval or arguments in strict mode";
    pub const STRICT_VAR_NAME: &str = "Variable name may not be eval or arguments in strict mode";
    pub const STRICT_PARAM_NAME: &str = "Parameter name eval or arguments is not allowed in strict mode";
    pub const STRICT_PARAM_DUPE: &str = "Strict mode function may not have duplicate parameter names";
    pub const DUPLICATE_PARAMETER: &str = "Duplicate parameter name not allowed in this context";
    pub const STRICT_FUNCTION_NAME: &str = "Function name may not be eval or arguments in strict mode";
    pub const STRICT_OCTAL_LITERAL: &str = "Octal literals are not allowed in strict mode.";
    pub const STRICT_LEADING_ZERO: &str = "Decimals with leading zeros are not allowed in strict mode.";
    pub const TEMPLATE_OCTAL_LITERAL: &str = "Octal escape sequences are not allowed in template strings.";
    pub const STRICT_DELETE: &str = "Delete of an unqualified identifier in strict mode.";
    pub const STRICT_LHS_ASSIGNMENT: &str = "Assignment to eval or arguments is not allowed in strict mode";
    pub const STRICT_LHS_POSTFIX: &str = "Postfix increment/decrement may not have eval or arguments operand in strict mode";
    pub const STRICT_LHS_PREFIX: &str = "Prefix increment/decrement may not have eval or arguments operand in strict mode";
    pub const STRICT_RESERVED_WORD: &str = "Use of future reserved word in strict mode";
    pub const STRICT_FUNCTION: &str = "In strict mode code, functions can only be declared at top level or inside a block";
    pub const ILLEGAL_USE_STRICT: &str = "Illegal 'use strict' directive in function with non-simple parameter list";
    pub const LET_IN_LEXICAL_BINDING: &str = "let is disallowed as a lexically bound name";
    pub const DECLARATION_MISSING_INITIALIZER: &str = "Missing initializer in const declaration";
    pub const DESTRUCTURING_MISSING_INITIALIZER: &str = "Missing initializer in destructuring declaration";
    pub const FOR_IN_OF_LOOP_INITIALIZER: &str = "for-in/of loop variable declaration may not have an initializer.";
    pub const CONSTRUCTOR_SPECIAL_METHOD: &str = "Class constructor may not be an accessor";
    pub const CONSTRUCTOR_FIELD: &str = "Classes may not have a field named 'constructor'";
    pub const DUPLICATE_CONSTRUCTOR: &str = "A class may only have one constructor";
    pub const STATIC_PROTOTYPE: &str = "Classes may not have static property named prototype";
    pub const BAD_GETTER_ARITY: &str = "Getter must not have any formal parameters.";
    pub const BAD_SETTER_ARITY: &str = "Setter must have exactly one formal parameter.";
    pub const BAD_SETTER_REST_PARAMETER: &str = "Setter function argument must not be a rest parameter";
    pub const PARAMETER_AFTER_REST: &str = "Rest parameter must be last formal parameter";
    pub const DEFAULT_REST_PARAMETER: &str = "Unexpected token =";
    pub const ILLEGAL_IMPORT_DECLARATION: &str = "Unexpected token import";
    pub const ILLEGAL_EXPORT_DECLARATION: &str = "Unexpected token export";
    pub const MISSING_FROM_CLAUSE: &str = "Unexpected token";
    pub const NEW_TARGET_OUTSIDE_FUNCTION: &str = "new.target expression is not allowed here";
    pub const IMPORT_META_OUTSIDE_MODULE: &str = "Cannot use 'import.meta' outside a module";
    pub const NULLISH_MIXED_WITH_LOGICAL: &str = "Nullish coalescing cannot be mixed with && or || without parentheses";
    pub const UNARY_BEFORE_EXPONENT: &str = "Unary operator used immediately before exponentiation expression. Parenthesis must be used to disambiguate operator precedence";
    pub const INVALID_OPTIONAL_CHAIN_TEMPLATE: &str = "Invalid tagged template on optional chain";
    pub const REST_IN_PARENTHESIZED: &str = "Unexpected token ... in parenthesized expression";
    pub const ARROW_PARAMETERS_EXPECTED: &str = "Malformed arrow function parameter list";
    pub const AWAIT_IN_PARAMETER: &str = "Illegal await-expression in formal parameters of async function";
    pub const YIELD_IN_PARAMETER: &str = "Yield expression not allowed in formal parameter";
    pub const INVALID_ENTITY: &str = "Invalid character reference";
    pub const UNTERMINATED_JSX_STRING: &str = "Unterminated string in JSX attribute";
    pub const JSX_DISABLED: &str = "JSX syntax is not enabled";

    /// `Unexpected token {}` for a punctuator, keyword or identifier.
    pub fn unexpected_token(token: &str) -> String {
        format!("Unexpected token {}", token)
    }

    /// `Undefined label '{}'`
    pub fn unknown_label(label: &str) -> String {
        format!("Undefined label '{}'", label)
    }

    /// `Label '{}' has already been declared`
    pub fn label_redeclaration(label: &str) -> String {
        format!("Label '{}' has already been declared", label)
    }

    /// `Expected corresponding JSX closing tag for {}`
    pub fn mismatched_closing_tag(name: &str) -> String {
        format!("Expected corresponding JSX closing tag for {}", name)
    }

    /// `Unterminated JSX contents` for the named element
    pub fn unterminated_jsx(name: &str) -> String {
        format!("Unterminated JSX contents for <{}>", name)
    }

    /// `Invalid character reference {}`
    pub fn invalid_entity(reference: &str) -> String {
        format!("{} {}", INVALID_ENTITY, reference)
    }
}

/// Location of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorSite {
    /// Byte offset
    pub index: usize,
    /// Line (1-based)
    pub line: u32,
    /// Column (1-based)
    pub column: u32,
}

/// Decides whether an error aborts the parse or is collected.
#[derive(Debug, Default)]
pub struct ErrorHandler {
    tolerant: bool,
    source: Option<String>,
    errors: Vec<JsError>,
}

impl ErrorHandler {
    /// Creates a handler; `tolerant` enables error collection.
    pub fn new(tolerant: bool, source: Option<String>) -> Self {
        ErrorHandler {
            tolerant,
            source,
            errors: Vec::new(),
        }
    }

    /// Whether recoverable errors are collected instead of thrown.
    pub fn is_tolerant(&self) -> bool {
        self.tolerant
    }

    /// Builds an error labelled with the configured source.
    pub fn create_error(&self, site: ErrorSite, kind: ErrorKind, message: impl Into<String>) -> JsError {
        JsError::new(kind, message, site.index, site.line, site.column).with_source(self.source.clone())
    }

    /// Labels an error built elsewhere (for example by the scanner).
    pub fn label(&self, error: JsError) -> JsError {
        if error.source_name.is_some() {
            return error;
        }
        error.with_source(self.source.clone())
    }

    /// Builds an error that the caller returns with `Err(..)`.
    pub fn throw_error(&self, site: ErrorSite, kind: ErrorKind, message: impl Into<String>) -> JsError {
        self.create_error(site, kind, message)
    }

    /// Records the error in tolerant mode; hands it back otherwise.
    pub fn tolerate(&mut self, error: JsError) -> JsResult<()> {
        if self.tolerant {
            log::warn!("tolerating syntax error: {}", error);
            self.errors.push(error);
            Ok(())
        } else {
            Err(error)
        }
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[JsError] {
        &self.errors
    }

    /// Consumes the handler and returns the recorded errors.
    pub fn into_errors(self) -> Vec<JsError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> ErrorSite {
        ErrorSite {
            index: 4,
            line: 1,
            column: 5,
        }
    }

    #[test]
    fn test_throw_error_carries_source_label() {
        let handler = ErrorHandler::new(false, Some("app.js".to_string()));
        let err = handler.throw_error(site(), ErrorKind::Grammar, messages::unexpected_token(")"));
        assert_eq!(err.source_name.as_deref(), Some("app.js"));
        assert_eq!(err.message, "Unexpected token )");
        assert_eq!(err.column, 5);
    }

    #[test]
    fn test_tolerate_in_strict_handler_returns_error() {
        let mut handler = ErrorHandler::new(false, None);
        let err = handler.create_error(site(), ErrorKind::Grammar, messages::ILLEGAL_RETURN);
        assert!(handler.tolerate(err).is_err());
        assert!(handler.errors().is_empty());
    }

    #[test]
    fn test_tolerate_in_tolerant_handler_records() {
        let mut handler = ErrorHandler::new(true, None);
        let err = handler.create_error(site(), ErrorKind::Grammar, messages::LET_IN_LEXICAL_BINDING);
        assert!(handler.tolerate(err).is_ok());
        assert_eq!(handler.into_errors().len(), 1);
    }

    #[test]
    fn test_label_keeps_existing_source() {
        let handler = ErrorHandler::new(false, Some("b.js".to_string()));
        let err = JsError::new(ErrorKind::Scanner, "x", 0, 1, 1).with_source(Some("a.js".to_string()));
        assert_eq!(handler.label(err).source_name.as_deref(), Some("a.js"));
    }
}
