//! Binding patterns, and reinterpretation of expressions as patterns.

use super::{Context, Marker, Parser};
use crate::ast::*;
use crate::character::{is_restricted_word, is_strict_mode_reserved_word};
use crate::error::{messages, ErrorSite};
use crate::token::{Token, TokenKind};
use core_types::{ErrorKind, JsResult};

/// Target grammar a parsed expression is being reinterpreted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternMode {
    /// Declarations and parameters: identifiers only at the leaves
    Binding,
    /// Left side of `=`: member accesses allowed at the leaves
    Assignment,
}

impl<'a> Parser<'a> {
    // ==================== Reinterpretation ====================

    /// Left side of `=`: array and object literals become patterns, anything
    /// else must be a simple target.
    pub(crate) fn reinterpret_as_assignment_target(&mut self, expr: Expression, start: &Token<'a>) -> JsResult<Pattern> {
        match expr {
            Expression::Array(_) | Expression::Object(_) => {
                self.reinterpret_expression_as_pattern(expr, PatternMode::Assignment, Self::token_site(start))
            }
            other => self.simple_assignment_target(other, start, messages::INVALID_LHS_IN_ASSIGNMENT),
        }
    }

    /// Identifier or member access used as a target. Anything else is a
    /// recoverable error and is kept as an expression target.
    pub(crate) fn simple_assignment_target(&mut self, expr: Expression, start: &Token<'a>, message: &str) -> JsResult<Pattern> {
        if !Self::is_simple_target(&expr) {
            self.tolerate_at(start, message)?;
            return Ok(Pattern::Expression(Box::new(expr)));
        }
        match expr {
            Expression::Identifier(id) => {
                if self.context.strict && is_restricted_word(id.name()) {
                    self.tolerate_at(start, messages::STRICT_LHS_ASSIGNMENT)?;
                }
                Ok(Pattern::Identifier(id))
            }
            other => Ok(Pattern::Expression(Box::new(other))),
        }
    }

    /// Rewrites an expression parsed under the cover grammar into the
    /// equivalent pattern, keeping every piece of trivia in place.
    pub(crate) fn reinterpret_expression_as_pattern(
        &mut self,
        expr: Expression,
        mode: PatternMode,
        site: ErrorSite,
    ) -> JsResult<Pattern> {
        let invalid = match mode {
            PatternMode::Binding => messages::INVALID_DESTRUCTURING_TARGET,
            PatternMode::Assignment => messages::INVALID_LHS_IN_ASSIGNMENT,
        };
        match expr {
            Expression::Identifier(id) => {
                self.check_target_name(&id, mode, site)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(_) | Expression::Parenthesized { .. }
                if mode == PatternMode::Assignment && Self::is_simple_target(&expr) =>
            {
                Ok(Pattern::Expression(Box::new(expr)))
            }
            Expression::Array(array) => {
                let count = array.elements.len();
                let trailing = array.separators.len() >= count;
                let mut elements = Vec::with_capacity(count);
                for (i, element) in array.elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(Expression::Spread(spread)) => {
                            if i + 1 != count || trailing {
                                return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_REST_POSITION));
                            }
                            Some(Pattern::Rest(self.reinterpret_rest(spread, mode, site)?))
                        }
                        Some(other) => Some(self.reinterpret_expression_as_pattern(other, mode, site)?),
                    };
                    elements.push(pattern);
                }
                Ok(Pattern::Array(ArrayPattern {
                    ws_before: array.ws_before,
                    elements,
                    separators: array.separators,
                    ws_close: array.ws_close,
                    span: array.span,
                }))
            }
            Expression::Object(object) => {
                let count = object.properties.len();
                let trailing = object.separators.len() >= count && count > 0;
                let mut properties = Vec::with_capacity(count);
                for (i, member) in object.properties.into_iter().enumerate() {
                    let member = match member {
                        ObjectMember::Spread(spread) => {
                            if i + 1 != count || trailing {
                                return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_REST_POSITION));
                            }
                            let rest = self.reinterpret_rest(spread, mode, site)?;
                            if !matches!(*rest.argument, Pattern::Identifier(_) | Pattern::Expression(_)) {
                                return Err(self.error_at_site(site, ErrorKind::Grammar, invalid));
                            }
                            ObjectPatternMember::Rest(rest)
                        }
                        ObjectMember::Property(prop) => {
                            if prop.method || prop.kind != PropertyKind::Init {
                                return Err(self.error_at_site(site, ErrorKind::Grammar, invalid));
                            }
                            let value = self.reinterpret_expression_as_pattern(prop.value, mode, site)?;
                            ObjectPatternMember::Property(PatternProperty {
                                key: prop.key,
                                value,
                                shorthand: prop.shorthand,
                                ws_colon: prop.ws_colon,
                                span: prop.span,
                            })
                        }
                    };
                    properties.push(member);
                }
                Ok(Pattern::Object(ObjectPattern {
                    ws_before: object.ws_before,
                    properties,
                    separators: object.separators,
                    ws_close: object.ws_close,
                    span: object.span,
                }))
            }
            Expression::Assignment {
                left,
                ws_operator,
                operator: AssignmentOperator::Assign,
                right,
                span,
            } => {
                if mode == PatternMode::Binding && !Self::is_binding_pattern(&left) {
                    return Err(self.error_at_site(site, ErrorKind::Grammar, invalid));
                }
                if let Pattern::Identifier(id) = left.as_ref() {
                    self.check_target_name(id, mode, site)?;
                }
                Ok(Pattern::Assignment(AssignmentPattern {
                    left,
                    ws_eq: ws_operator,
                    right,
                    span,
                }))
            }
            other if mode == PatternMode::Assignment => {
                self.tolerate_site(site, invalid)?;
                Ok(Pattern::Expression(Box::new(other)))
            }
            _ => Err(self.error_at_site(site, ErrorKind::Grammar, invalid)),
        }
    }

    fn reinterpret_rest(&mut self, spread: SpreadElement, mode: PatternMode, site: ErrorSite) -> JsResult<RestElement> {
        let argument = self.reinterpret_expression_as_pattern(*spread.argument, mode, site)?;
        if matches!(argument, Pattern::Assignment(_)) {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::DEFAULT_REST_PARAMETER));
        }
        Ok(RestElement {
            ws_before: spread.ws_before,
            argument: Box::new(argument),
            span: spread.span,
        })
    }

    fn check_target_name(&mut self, id: &Identifier, mode: PatternMode, site: ErrorSite) -> JsResult<()> {
        if self.context.strict && is_restricted_word(id.name()) {
            let message = match mode {
                PatternMode::Binding => messages::STRICT_PARAM_NAME,
                PatternMode::Assignment => messages::STRICT_LHS_ASSIGNMENT,
            };
            self.tolerate_site(site, message)?;
        }
        Ok(())
    }

    /// No member-access leaves anywhere in the pattern.
    pub(crate) fn is_binding_pattern(pattern: &Pattern) -> bool {
        match pattern {
            Pattern::Identifier(_) => true,
            Pattern::Expression(_) => false,
            Pattern::Array(array) => array.elements.iter().flatten().all(Self::is_binding_pattern),
            Pattern::Object(object) => object.properties.iter().all(|member| match member {
                ObjectPatternMember::Property(prop) => Self::is_binding_pattern(&prop.value),
                ObjectPatternMember::Rest(rest) => Self::is_binding_pattern(&rest.argument),
            }),
            Pattern::Assignment(assign) => Self::is_binding_pattern(&assign.left),
            Pattern::Rest(rest) => Self::is_binding_pattern(&rest.argument),
        }
    }

    // ==================== Arrows ====================

    /// `( ... ) =>` or `async( ... ) =>` once the arrow has been seen.
    pub(crate) fn parse_arrow_from_cover(&mut self, marker: Marker, cover: CoverParameters) -> JsResult<Expression> {
        log::debug!("cover grammar at {} resolved as arrow parameters", marker.index);
        let site = marker.site();
        let count = cover.items.len();
        let trailing = count > 0 && cover.separators.len() >= count;
        let mut items = Vec::with_capacity(count);
        for (i, item) in cover.items.into_iter().enumerate() {
            let pattern = match item {
                Expression::Spread(spread) => {
                    if i + 1 != count || trailing {
                        return Err(self.error_at_site(site, ErrorKind::Grammar, messages::PARAMETER_AFTER_REST));
                    }
                    Pattern::Rest(self.reinterpret_rest(spread, PatternMode::Binding, site)?)
                }
                Expression::Yield { .. } => {
                    return Err(self.error_at_site(site, ErrorKind::Grammar, messages::YIELD_IN_PARAMETER));
                }
                Expression::Await { .. } => {
                    return Err(self.error_at_site(site, ErrorKind::Grammar, messages::AWAIT_IN_PARAMETER));
                }
                other => self
                    .reinterpret_expression_as_pattern(other, PatternMode::Binding, site)
                    .map_err(|_| self.error_at_site(site, ErrorKind::CoverGrammar, messages::ARROW_PARAMETERS_EXPECTED))?,
            };
            items.push(pattern);
        }
        let is_async = cover.ws_async.is_some();
        if is_async && items.iter().flat_map(Pattern::bound_names).any(|id| id.name() == "await") {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::unexpected_token("await")));
        }
        let params = FormalParameters {
            ws_open: cover.ws_open,
            items,
            separators: cover.separators,
            ws_close: cover.ws_close,
        };
        self.finish_arrow(
            marker,
            cover.ws_async,
            ArrowParameters::Parenthesized(params),
            site,
        )
    }

    /// `x =>` or `async x =>`.
    pub(crate) fn parse_bare_arrow(
        &mut self,
        marker: Marker,
        ws_async: Option<String>,
        id: Identifier,
        start: &Token<'a>,
    ) -> JsResult<Expression> {
        if ws_async.is_some() && id.name() == "await" {
            return Err(self.unexpected(start));
        }
        if self.context.strict && is_restricted_word(id.name()) {
            self.tolerate_at(start, messages::STRICT_PARAM_NAME)?;
        }
        self.finish_arrow(marker, ws_async, ArrowParameters::Bare(id), Self::token_site(start))
    }

    fn finish_arrow(
        &mut self,
        marker: Marker,
        ws_async: Option<String>,
        params: ArrowParameters,
        site: ErrorSite,
    ) -> JsResult<Expression> {
        let ws_arrow = self.expect("=>")?;
        let is_async = ws_async.is_some();
        let context = Context {
            allow_yield: false,
            is_async,
            in_function_body: true,
            in_iteration: false,
            in_switch: false,
            in_parameters: false,
            labels: Vec::new(),
            cover_initialized_name: None,
            ..self.context.clone()
        };
        let (body, has_use_strict, strict) = self.with_context(context, |p| {
            if p.matches("{") {
                let (body, has_use_strict) = p.parse_function_source_elements()?;
                Ok((ArrowBody::Block(body), has_use_strict, p.context.strict))
            } else {
                let expression = p.parse_assignment_expression()?;
                Ok((ArrowBody::Expression(Box::new(expression)), false, p.context.strict))
            }
        })?;

        let patterns: Vec<Pattern> = match &params {
            ArrowParameters::Bare(id) => vec![Pattern::Identifier(id.clone())],
            ArrowParameters::Parenthesized(formal) => formal.items.clone(),
        };
        let simple = patterns.iter().all(|p| matches!(p, Pattern::Identifier(_)));
        if has_use_strict && !simple {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::ILLEGAL_USE_STRICT));
        }
        self.validate_parameter_names(&patterns, strict, true, site)?;

        let span = self.finalize(marker, NodeKind::ArrowFunctionExpression);
        Ok(Expression::Arrow(Box::new(ArrowFunction {
            is_async,
            ws_async: ws_async.unwrap_or_default(),
            params,
            ws_arrow,
            body,
            span,
        })))
    }

    /// Duplicate and strict-mode checks over parameter names.
    pub(crate) fn validate_parameter_names(
        &mut self,
        params: &[Pattern],
        strict: bool,
        unique: bool,
        site: ErrorSite,
    ) -> JsResult<()> {
        let mut seen: Vec<&str> = Vec::new();
        for id in params.iter().flat_map(Pattern::bound_names) {
            let name = id.name();
            if strict && is_restricted_word(name) {
                self.tolerate_site(site, messages::STRICT_PARAM_NAME)?;
            }
            if strict && is_strict_mode_reserved_word(name) {
                self.tolerate_site(site, messages::STRICT_RESERVED_WORD)?;
            }
            if seen.contains(&name) {
                if strict {
                    self.tolerate_site(site, messages::STRICT_PARAM_DUPE)?;
                } else if unique {
                    self.tolerate_site(site, messages::DUPLICATE_PARAMETER)?;
                }
            }
            seen.push(name);
        }
        Ok(())
    }

    // ==================== Binding patterns ====================

    /// Identifier in a declaration, parameter or catch clause.
    pub(crate) fn parse_binding_identifier(&mut self, restricted_message: &str) -> JsResult<Identifier> {
        let marker = self.start_node();
        if self.lookahead.kind != TokenKind::Identifier {
            return Err(self.unexpected(&self.lookahead));
        }
        let token = self.next_token()?;
        let name = token.text();
        if name == "yield" && self.context.allow_yield {
            return Err(self.unexpected(&token));
        }
        if name == "await" && (self.context.is_async || self.context.is_module) {
            return Err(self.unexpected(&token));
        }
        if self.context.strict {
            if is_strict_mode_reserved_word(name) {
                self.tolerate_at(&token, messages::STRICT_RESERVED_WORD)?;
            } else if is_restricted_word(name) {
                self.tolerate_at(&token, restricted_message)?;
            }
        }
        Ok(self.finish_identifier(marker, &token))
    }

    /// Identifier, array pattern or object pattern.
    pub(crate) fn parse_binding_target(&mut self, restricted_message: &str) -> JsResult<Pattern> {
        if self.matches("[") {
            self.parse_array_binding_pattern(restricted_message)
        } else if self.matches("{") {
            self.parse_object_binding_pattern(restricted_message)
        } else {
            Ok(Pattern::Identifier(self.parse_binding_identifier(restricted_message)?))
        }
    }

    /// Binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self, restricted_message: &str) -> JsResult<Pattern> {
        let marker = self.start_node();
        let target = self.parse_binding_target(restricted_message)?;
        if !self.matches("=") {
            return Ok(target);
        }
        let ws_eq = self.next_token()?.ws_before.to_string();
        let right = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
        let span = self.finalize(marker, NodeKind::AssignmentPattern);
        Ok(Pattern::Assignment(AssignmentPattern {
            left: Box::new(target),
            ws_eq,
            right: Box::new(right),
            span,
        }))
    }

    /// `...target`, which must close its list.
    pub(crate) fn parse_binding_rest(
        &mut self,
        restricted_message: &str,
        close: &str,
        misplaced_message: &str,
    ) -> JsResult<RestElement> {
        let marker = self.start_node();
        let ws_before = self.expect("...")?;
        let argument = self.parse_binding_target(restricted_message)?;
        if self.matches("=") {
            return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::DEFAULT_REST_PARAMETER));
        }
        if !self.matches(close) {
            return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, misplaced_message));
        }
        let span = self.finalize(marker, NodeKind::RestElement);
        Ok(RestElement {
            ws_before,
            argument: Box::new(argument),
            span,
        })
    }

    fn parse_array_binding_pattern(&mut self, restricted_message: &str) -> JsResult<Pattern> {
        let marker = self.start_node();
        let ws_before = self.expect("[")?;
        let mut elements = Vec::new();
        let mut separators = Vec::new();
        while !self.matches("]") {
            if self.matches(",") {
                separators.push(self.expect_separator()?);
                elements.push(None);
                continue;
            }
            if self.matches("...") {
                let rest = self.parse_binding_rest(restricted_message, "]", messages::INVALID_REST_POSITION)?;
                elements.push(Some(Pattern::Rest(rest)));
                break;
            }
            elements.push(Some(self.parse_binding_element(restricted_message)?));
            if !self.matches("]") {
                separators.push(self.expect_separator()?);
            }
        }
        let ws_close = self.expect("]")?;
        let span = self.finalize(marker, NodeKind::ArrayPattern);
        Ok(Pattern::Array(ArrayPattern {
            ws_before,
            elements,
            separators,
            ws_close,
            span,
        }))
    }

    fn parse_object_binding_pattern(&mut self, restricted_message: &str) -> JsResult<Pattern> {
        let marker = self.start_node();
        let ws_before = self.expect("{")?;
        let mut properties = Vec::new();
        let mut separators = Vec::new();
        while !self.matches("}") {
            if self.matches("...") {
                let rest_marker = self.start_node();
                let ws_rest = self.expect("...")?;
                let id = self.parse_binding_identifier(restricted_message)?;
                if !self.matches("}") {
                    return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::INVALID_REST_POSITION));
                }
                let span = self.finalize(rest_marker, NodeKind::RestElement);
                properties.push(ObjectPatternMember::Rest(RestElement {
                    ws_before: ws_rest,
                    argument: Box::new(Pattern::Identifier(id)),
                    span,
                }));
                break;
            }
            properties.push(ObjectPatternMember::Property(self.parse_binding_property(restricted_message)?));
            if !self.matches("}") {
                separators.push(self.expect_separator()?);
            }
        }
        let ws_close = self.expect("}")?;
        let span = self.finalize(marker, NodeKind::ObjectPattern);
        Ok(Pattern::Object(ObjectPattern {
            ws_before,
            properties,
            separators,
            ws_close,
            span,
        }))
    }

    fn parse_binding_property(&mut self, restricted_message: &str) -> JsResult<PatternProperty> {
        let marker = self.start_node();
        if self.lookahead.kind == TokenKind::Identifier {
            let next = self.peek_token()?;
            if !next.is_punctuator(":") {
                // Shorthand `{ a }` or `{ a = 1 }`
                let id = self.parse_binding_identifier(restricted_message)?;
                let key = PropertyKey::Identifier(id.bare());
                let mut value = Pattern::Identifier(id);
                if self.matches("=") {
                    let ws_eq = self.next_token()?.ws_before.to_string();
                    let right = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
                    let span = self.finalize(marker, NodeKind::AssignmentPattern);
                    value = Pattern::Assignment(AssignmentPattern {
                        left: Box::new(value),
                        ws_eq,
                        right: Box::new(right),
                        span,
                    });
                }
                let span = self.finalize(marker, NodeKind::Property);
                return Ok(PatternProperty {
                    key,
                    value,
                    shorthand: true,
                    ws_colon: String::new(),
                    span,
                });
            }
        }
        let key = self.parse_property_key(false)?;
        let ws_colon = self.expect(":")?;
        let value = self.parse_binding_element(restricted_message)?;
        let span = self.finalize(marker, NodeKind::Property);
        Ok(PatternProperty {
            key,
            value,
            shorthand: false,
            ws_colon,
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::messages;
    use crate::options::ParseOptions;
    use crate::parser::parse_script;
    use crate::unparse::Unparse;

    fn parse_ok(source: &str) -> Program {
        parse_script(source, &ParseOptions::default()).unwrap().program
    }

    fn error(source: &str) -> String {
        parse_script(source, &ParseOptions::default()).unwrap_err().message
    }

    #[test]
    fn test_object_literal_becomes_assignment_pattern() {
        let program = parse_ok("({ a, b: [c, d = 1], ...e } = obj);");
        let Statement::Expression(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::Parenthesized { expression, .. } = &stmt.expression else {
            panic!("expected parenthesized");
        };
        let Expression::Assignment { left, .. } = expression.as_ref() else {
            panic!("expected assignment");
        };
        let names: Vec<&str> = left.bound_names().iter().map(|id| id.name()).collect();
        assert_eq!(names, vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn test_member_targets_only_in_assignment() {
        assert!(parse_script("[a.b, c[0]] = x;", &ParseOptions::default()).is_ok());
        assert_eq!(error("let [a.b] = x;"), messages::unexpected_token("."));
        assert_eq!(error("([a.b]) => 1"), messages::ARROW_PARAMETERS_EXPECTED);
    }

    #[test]
    fn test_rest_must_be_last() {
        assert_eq!(error("[...a, b] = c;"), messages::INVALID_REST_POSITION);
        assert_eq!(error("(...a, b) => 1"), messages::PARAMETER_AFTER_REST);
        assert_eq!(error("let [...a, b] = c;"), messages::INVALID_REST_POSITION);
    }

    #[test]
    fn test_arrow_parameters_keep_trivia() {
        let source = "const f = ( a /* x */, { b = 2 }, ...rest ) =>  a + b;";
        assert_eq!(parse_ok(source).unparse(), source);
    }

    #[test]
    fn test_duplicate_arrow_parameters() {
        assert_eq!(error("(a, a) => 1"), messages::DUPLICATE_PARAMETER);
        assert!(parse_script("function f(a, a) {}", &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_use_strict_with_non_simple_parameters() {
        assert_eq!(error("(a = 1) => { 'use strict'; }"), messages::ILLEGAL_USE_STRICT);
    }

    #[test]
    fn test_strict_assignment_to_eval() {
        let options = ParseOptions::default().with_tolerant(true);
        let output = parse_script("'use strict'; eval = 1;", &options).unwrap();
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].message, messages::STRICT_LHS_ASSIGNMENT);
    }

    #[test]
    fn test_binding_pattern_round_trip() {
        let source = "let { a, b: { c } = {}, ...d } = obj, [ , e, ...f] = arr;";
        assert_eq!(parse_ok(source).unparse(), source);
    }
}
