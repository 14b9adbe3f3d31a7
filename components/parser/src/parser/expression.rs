//! Expression grammar: precedence climbing from assignment down to primary.

use super::{Marker, Parser};
use crate::ast::*;
use crate::character::{is_restricted_word, is_strict_mode_reserved_word};
use crate::error::{messages, ErrorSite};
use crate::token::{Token, TokenKind, TokenValue};
use core_types::{ErrorKind, JsResult};
use num_bigint::BigInt;

/// Elements of `( ... )` or `async( ... )` parsed before `=>` is seen.
pub(crate) struct CoverItems {
    pub items: Vec<Expression>,
    pub separators: Vec<String>,
    /// Position of the first `...` element
    pub rest_site: Option<ErrorSite>,
    /// Start of the first element and end of the last
    pub bounds: Option<(Marker, Marker)>,
}

impl<'a> Parser<'a> {
    /// Expression, comma sequences included.
    pub fn parse_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let first = self.parse_assignment_expression()?;
        if !self.matches(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        let mut separators = Vec::new();
        while self.matches(",") {
            separators.push(self.expect_separator()?);
            expressions.push(self.parse_assignment_expression()?);
        }
        let span = self.finalize(marker, NodeKind::SequenceExpression);
        Ok(Expression::Sequence {
            expressions,
            separators,
            span,
        })
    }

    /// Assignment expression that must not leave a `{ a = 1 }` shorthand
    /// unresolved.
    pub(crate) fn parse_assignment_expression(&mut self) -> JsResult<Expression> {
        let previous = self.context.cover_initialized_name.take();
        let expr = self.parse_assignment_cover()?;
        if let Some(site) = self.context.cover_initialized_name.take() {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_COVER_INITIALIZED_NAME));
        }
        self.context.cover_initialized_name = previous;
        Ok(expr)
    }

    /// Assignment expression that may hand an unresolved shorthand
    /// initializer up to an enclosing array or object literal.
    pub(crate) fn parse_assignment_cover(&mut self) -> JsResult<Expression> {
        if self.context.allow_yield && self.lookahead.is_contextual("yield") {
            return self.parse_yield_expression();
        }
        if self.matches_contextual("async") {
            if let Some(arrow) = self.parse_async_bare_arrow()? {
                return Ok(arrow);
            }
        }
        let marker = self.start_node();
        let start_token = self.lookahead.clone();
        let previous = self.context.cover_initialized_name.take();
        let expr = self.parse_conditional_expression()?;

        if self.matches("=>")
            && matches!(expr, Expression::CoverParameters(_) | Expression::Identifier(_))
        {
            if self.lookahead.newline_before {
                return Err(self.unexpected(&self.lookahead));
            }
            self.context.cover_initialized_name = previous;
            return match expr {
                Expression::CoverParameters(cover) => self.parse_arrow_from_cover(marker, cover),
                Expression::Identifier(id) => self.parse_bare_arrow(marker, None, id, &start_token),
                _ => Err(self.unexpected(&self.lookahead)),
            };
        }

        if let Some(operator) = self.assignment_operator() {
            let left = if operator == AssignmentOperator::Assign {
                self.reinterpret_as_assignment_target(expr, &start_token)?
            } else {
                self.simple_assignment_target(expr, &start_token, messages::INVALID_LHS_IN_ASSIGNMENT)?
            };
            self.context.cover_initialized_name = previous;
            let operator_token = self.next_token()?;
            let right = self.parse_assignment_expression()?;
            let span = self.finalize(marker, NodeKind::AssignmentExpression);
            return Ok(Expression::Assignment {
                left: Box::new(left),
                ws_operator: operator_token.ws_before.to_string(),
                operator,
                right: Box::new(right),
                span,
            });
        }

        if let Some(site) = self.context.cover_initialized_name {
            if !matches!(expr, Expression::Object(_) | Expression::Array(_)) {
                return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_COVER_INITIALIZED_NAME));
            }
        }
        self.context.cover_initialized_name = previous.or(self.context.cover_initialized_name);
        Ok(expr)
    }

    fn assignment_operator(&self) -> Option<AssignmentOperator> {
        if self.lookahead.kind != TokenKind::Punctuator {
            return None;
        }
        AssignmentOperator::from_token(self.lookahead.raw)
    }

    /// `async x => ...`; `None` when `async` is not followed by a bare parameter.
    fn parse_async_bare_arrow(&mut self) -> JsResult<Option<Expression>> {
        let next = self.peek_token()?;
        if next.kind != TokenKind::Identifier || next.newline_before {
            return Ok(None);
        }
        let marker = self.start_node();
        let async_token = self.next_token()?;
        let param_token = self.lookahead.clone();
        let param_marker = self.start_node();
        let token = self.next_token()?;
        let id = self.finish_identifier(param_marker, &token);
        if !self.matches("=>") || self.lookahead.newline_before {
            return Err(self.unexpected(&self.lookahead));
        }
        let ws_async = async_token.ws_before.to_string();
        self.parse_bare_arrow(marker, Some(ws_async), id, &param_token).map(Some)
    }

    fn parse_yield_expression(&mut self) -> JsResult<Expression> {
        if self.context.in_parameters {
            return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::YIELD_IN_PARAMETER));
        }
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let mut delegate = None;
        let mut argument = None;
        if !self.lookahead.newline_before {
            if self.matches("*") {
                delegate = Some(self.next_token()?.ws_before.to_string());
                argument = Some(Box::new(self.parse_assignment_expression()?));
            } else if self.starts_operand() {
                argument = Some(Box::new(self.parse_assignment_expression()?));
            }
        }
        let span = self.finalize(marker, NodeKind::YieldExpression);
        Ok(Expression::Yield {
            ws_before,
            delegate,
            argument,
            span,
        })
    }

    /// Whether the lookahead can begin an operand of `yield`.
    fn starts_operand(&self) -> bool {
        if self.lookahead.is_eof() || self.lookahead.kind == TokenKind::Template && !self.is_template_head() {
            return false;
        }
        !(self.lookahead.kind == TokenKind::Punctuator
            && matches!(self.lookahead.raw, ")" | "]" | "}" | "," | ";" | ":" | "?" | "=>"))
            && !self.matches_keyword("in")
            && !self.matches_contextual("of")
    }

    fn is_template_head(&self) -> bool {
        matches!(self.lookahead.value, TokenValue::Template { head: true, .. })
    }

    fn parse_conditional_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let test = self.parse_binary_expression(0)?;
        if !self.matches("?") {
            return Ok(test);
        }
        self.reject_cover(&test)?;
        let ws_question = self.next_token()?.ws_before.to_string();
        let consequent = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
        let ws_colon = self.expect(":")?;
        let alternate = self.parse_assignment_expression()?;
        let span = self.finalize(marker, NodeKind::ConditionalExpression);
        Ok(Expression::Conditional {
            test: Box::new(test),
            ws_question,
            consequent: Box::new(consequent),
            ws_colon,
            alternate: Box::new(alternate),
            span,
        })
    }

    fn binary_operator(&self) -> Option<BinaryOperator> {
        let token = &self.lookahead;
        let operator = match token.kind {
            TokenKind::Punctuator => BinaryOperator::from_token(token.raw)?,
            TokenKind::Keyword if token.raw == "in" && self.context.allow_in => BinaryOperator::In,
            TokenKind::Keyword if token.raw == "instanceof" => BinaryOperator::Instanceof,
            _ => return None,
        };
        if operator == BinaryOperator::Exponent {
            return None;
        }
        Some(operator)
    }

    /// Precedence climbing over the binary and logical operators.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> JsResult<Expression> {
        let marker = self.start_node();
        let mut left = self.parse_exponentiation_expression()?;
        while let Some(operator) = self.binary_operator() {
            let precedence = operator.precedence();
            if precedence < min_precedence {
                break;
            }
            self.reject_cover(&left)?;
            let operator_token = self.next_token()?;
            let right = self.parse_binary_expression(precedence + 1)?;
            self.reject_cover(&right)?;
            self.check_nullish_mixing(operator, &left, &right, &operator_token)?;
            let kind = if operator.is_logical() {
                NodeKind::LogicalExpression
            } else {
                NodeKind::BinaryExpression
            };
            let span = self.finalize(marker, kind);
            left = Expression::Binary {
                left: Box::new(left),
                ws_operator: operator_token.ws_before.to_string(),
                operator,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn check_nullish_mixing(
        &self,
        operator: BinaryOperator,
        left: &Expression,
        right: &Expression,
        operator_token: &Token<'_>,
    ) -> JsResult<()> {
        let operand_is = |expr: &Expression, wanted: &dyn Fn(BinaryOperator) -> bool| {
            matches!(expr, Expression::Binary { operator, .. } if wanted(*operator))
        };
        let mixes = match operator {
            BinaryOperator::NullishCoalescing => {
                let and_or = |op: BinaryOperator| matches!(op, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr);
                operand_is(left, &and_or) || operand_is(right, &and_or)
            }
            BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr => {
                let nullish = |op: BinaryOperator| op == BinaryOperator::NullishCoalescing;
                operand_is(left, &nullish) || operand_is(right, &nullish)
            }
            _ => false,
        };
        if mixes {
            return Err(self.error_at(operator_token, ErrorKind::Grammar, messages::NULLISH_MIXED_WITH_LOGICAL));
        }
        Ok(())
    }

    fn starts_unary(&self) -> bool {
        let token = &self.lookahead;
        match token.kind {
            TokenKind::Punctuator => matches!(token.raw, "+" | "-" | "!" | "~"),
            TokenKind::Keyword => matches!(token.raw, "delete" | "void" | "typeof"),
            TokenKind::Identifier => self.context.is_async && token.is_contextual("await"),
            _ => false,
        }
    }

    fn parse_exponentiation_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let unary = self.starts_unary();
        let base = self.parse_unary_expression()?;
        if !self.matches("**") {
            return Ok(base);
        }
        if unary {
            return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::UNARY_BEFORE_EXPONENT));
        }
        self.reject_cover(&base)?;
        let operator_token = self.next_token()?;
        let exponent = self.parse_exponentiation_expression()?;
        self.reject_cover(&exponent)?;
        let span = self.finalize(marker, NodeKind::BinaryExpression);
        Ok(Expression::Binary {
            left: Box::new(base),
            ws_operator: operator_token.ws_before.to_string(),
            operator: BinaryOperator::Exponent,
            right: Box::new(exponent),
            span,
        })
    }

    fn parse_unary_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let operator = match self.lookahead.kind {
            TokenKind::Punctuator | TokenKind::Keyword => UnaryOperator::from_token(self.lookahead.raw),
            _ => None,
        };
        if let Some(operator) = operator {
            let token = self.next_token()?;
            let argument = self.parse_unary_expression()?;
            self.reject_cover(&argument)?;
            if operator == UnaryOperator::Delete
                && self.context.strict
                && matches!(argument, Expression::Identifier(_))
            {
                self.tolerate_at(&token, messages::STRICT_DELETE)?;
            }
            let span = self.finalize(marker, NodeKind::UnaryExpression);
            return Ok(Expression::Unary {
                ws_before: token.ws_before.to_string(),
                operator,
                argument: Box::new(argument),
                span,
            });
        }
        if self.context.is_async && self.matches_contextual("await") {
            if self.context.in_parameters {
                return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::AWAIT_IN_PARAMETER));
            }
            let token = self.next_token()?;
            let argument = self.parse_unary_expression()?;
            self.reject_cover(&argument)?;
            let span = self.finalize(marker, NodeKind::AwaitExpression);
            return Ok(Expression::Await {
                ws_before: token.ws_before.to_string(),
                argument: Box::new(argument),
                span,
            });
        }
        self.parse_update_expression()
    }

    fn parse_update_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        if self.matches("++") || self.matches("--") {
            let token = self.next_token()?;
            let operator = if token.raw == "++" {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            };
            let argument_token = self.lookahead.clone();
            let argument = self.parse_unary_expression()?;
            self.check_update_target(&argument, &argument_token, messages::STRICT_LHS_PREFIX)?;
            let span = self.finalize(marker, NodeKind::UpdateExpression);
            return Ok(Expression::Update {
                operator,
                prefix: true,
                ws_operator: token.ws_before.to_string(),
                argument: Box::new(argument),
                span,
            });
        }
        let start_token = self.lookahead.clone();
        let expr = self.parse_left_hand_side_expression_allow_call()?;
        if (self.matches("++") || self.matches("--")) && !self.lookahead.newline_before {
            self.check_update_target(&expr, &start_token, messages::STRICT_LHS_POSTFIX)?;
            let token = self.next_token()?;
            let operator = if token.raw == "++" {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            };
            let span = self.finalize(marker, NodeKind::UpdateExpression);
            return Ok(Expression::Update {
                operator,
                prefix: false,
                ws_operator: token.ws_before.to_string(),
                argument: Box::new(expr),
                span,
            });
        }
        Ok(expr)
    }

    fn check_update_target(&mut self, target: &Expression, start: &Token<'a>, strict_message: &str) -> JsResult<()> {
        if !Self::is_simple_target(target) {
            return self.tolerate_at(start, messages::INVALID_LHS_IN_ASSIGNMENT);
        }
        if let Expression::Identifier(id) = target {
            if self.context.strict && is_restricted_word(id.name()) {
                self.tolerate_at(start, strict_message)?;
            }
        }
        Ok(())
    }

    /// Identifier or non-optional member access, possibly parenthesized.
    pub(crate) fn is_simple_target(expr: &Expression) -> bool {
        match expr {
            Expression::Identifier(_) => true,
            Expression::Member(member) => !member.optional && !Self::is_optional_chain(&member.object),
            Expression::Parenthesized { expression, .. } => Self::is_simple_target(expression),
            _ => false,
        }
    }

    fn is_optional_chain(expr: &Expression) -> bool {
        match expr {
            Expression::Member(member) => member.optional || Self::is_optional_chain(&member.object),
            Expression::Call(call) => call.optional || Self::is_optional_chain(&call.callee),
            _ => false,
        }
    }

    /// A parenthesized group that turned out not to be followed by `=>`
    /// cannot be an operand.
    pub(crate) fn reject_cover(&self, expr: &Expression) -> JsResult<()> {
        if matches!(expr, Expression::CoverParameters(_)) {
            return Err(self.unexpected(&self.lookahead));
        }
        Ok(())
    }

    // ==================== Left-hand side ====================

    pub(crate) fn parse_left_hand_side_expression_allow_call(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let start_token = self.lookahead.clone();
        let mut expr = if self.matches_keyword("super") {
            self.parse_super()?
        } else if self.matches_keyword("new") {
            self.parse_new_expression()?
        } else if self.matches_keyword("import") {
            self.parse_import_expression()?
        } else {
            self.parse_primary_expression()?
        };
        let mut in_chain = false;
        loop {
            if self.matches(".") {
                let ws_dot = self.next_token()?.ws_before.to_string();
                let property = self.parse_member_property_name()?;
                let span = self.finalize(marker, NodeKind::MemberExpression);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    optional: false,
                    ws_dot,
                    property,
                    span,
                });
            } else if self.matches("?.") {
                in_chain = true;
                let ws_dot = self.next_token()?.ws_before.to_string();
                if self.matches("(") {
                    let arguments = self.parse_arguments()?;
                    let span = self.finalize(marker, NodeKind::CallExpression);
                    expr = Expression::Call(CallExpression {
                        callee: Box::new(expr),
                        optional: true,
                        ws_optional: ws_dot,
                        arguments,
                        span,
                    });
                } else if self.matches("[") {
                    let property = self.parse_computed_member()?;
                    let span = self.finalize(marker, NodeKind::MemberExpression);
                    expr = Expression::Member(MemberExpression {
                        object: Box::new(expr),
                        optional: true,
                        ws_dot,
                        property,
                        span,
                    });
                } else if self.lookahead.kind == TokenKind::Template {
                    return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::INVALID_OPTIONAL_CHAIN_TEMPLATE));
                } else {
                    let property = self.parse_member_property_name()?;
                    let span = self.finalize(marker, NodeKind::MemberExpression);
                    expr = Expression::Member(MemberExpression {
                        object: Box::new(expr),
                        optional: true,
                        ws_dot,
                        property,
                        span,
                    });
                }
            } else if self.matches("(") {
                let async_call = matches!(&expr, Expression::Identifier(id) if id.raw() == "async")
                    && start_token.is_contextual("async")
                    && !self.lookahead.newline_before;
                if async_call {
                    return self.parse_async_call_or_cover(marker, expr);
                }
                let arguments = self.parse_arguments()?;
                let span = self.finalize(marker, NodeKind::CallExpression);
                expr = Expression::Call(CallExpression {
                    callee: Box::new(expr),
                    optional: false,
                    ws_optional: String::new(),
                    arguments,
                    span,
                });
            } else if self.matches("[") {
                let property = self.parse_computed_member()?;
                let span = self.finalize(marker, NodeKind::MemberExpression);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    optional: false,
                    ws_dot: String::new(),
                    property,
                    span,
                });
            } else if self.lookahead.kind == TokenKind::Template && self.is_template_head() {
                if in_chain {
                    return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::INVALID_OPTIONAL_CHAIN_TEMPLATE));
                }
                let quasi = self.parse_template_literal(true)?;
                let span = self.finalize(marker, NodeKind::TaggedTemplateExpression);
                expr = Expression::TaggedTemplate {
                    tag: Box::new(expr),
                    quasi,
                    span,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// `async( ... )`: a call, or the parameters of an async arrow.
    fn parse_async_call_or_cover(&mut self, marker: Marker, callee: Expression) -> JsResult<Expression> {
        let ws_async = match &callee {
            Expression::Identifier(id) => id.ws_before.clone(),
            _ => String::new(),
        };
        let previous = self.context.cover_initialized_name.take();
        let ws_open = self.expect("(")?;
        let cover = self.with_allow_in(true, |p| p.parse_cover_items(")"))?;
        let ws_close = self.expect(")")?;
        if self.matches("=>") && !self.lookahead.newline_before {
            self.context.cover_initialized_name = previous;
            let span = self.span_between(marker, self.last_end);
            return Ok(Expression::CoverParameters(CoverParameters {
                ws_async: Some(ws_async),
                ws_open,
                items: cover.items,
                separators: cover.separators,
                ws_close,
                span,
            }));
        }
        if let Some(site) = self.context.cover_initialized_name.take() {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_COVER_INITIALIZED_NAME));
        }
        self.context.cover_initialized_name = previous;
        let span = self.finalize(marker, NodeKind::CallExpression);
        let mut expr = Expression::Call(CallExpression {
            callee: Box::new(callee),
            optional: false,
            ws_optional: String::new(),
            arguments: Arguments {
                ws_open,
                items: cover.items,
                separators: cover.separators,
                ws_close,
            },
            span,
        });
        // `async(x).then(...)`: keep parsing the member/call chain.
        while self.matches(".") || self.matches("[") || self.matches("(") {
            if self.matches(".") {
                let ws_dot = self.next_token()?.ws_before.to_string();
                let property = self.parse_member_property_name()?;
                let span = self.finalize(marker, NodeKind::MemberExpression);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    optional: false,
                    ws_dot,
                    property,
                    span,
                });
            } else if self.matches("[") {
                let property = self.parse_computed_member()?;
                let span = self.finalize(marker, NodeKind::MemberExpression);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    optional: false,
                    ws_dot: String::new(),
                    property,
                    span,
                });
            } else {
                let arguments = self.parse_arguments()?;
                let span = self.finalize(marker, NodeKind::CallExpression);
                expr = Expression::Call(CallExpression {
                    callee: Box::new(expr),
                    optional: false,
                    ws_optional: String::new(),
                    arguments,
                    span,
                });
            }
        }
        Ok(expr)
    }

    /// Member and `new` chain without call arguments, for `new` callees.
    fn parse_left_hand_side_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let mut expr = if self.matches_keyword("new") {
            self.parse_new_expression()?
        } else if self.matches_keyword("super") {
            self.parse_super()?
        } else {
            self.parse_primary_expression()?
        };
        loop {
            if self.matches(".") {
                let ws_dot = self.next_token()?.ws_before.to_string();
                let property = self.parse_member_property_name()?;
                let span = self.finalize(marker, NodeKind::MemberExpression);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    optional: false,
                    ws_dot,
                    property,
                    span,
                });
            } else if self.matches("[") {
                let property = self.parse_computed_member()?;
                let span = self.finalize(marker, NodeKind::MemberExpression);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    optional: false,
                    ws_dot: String::new(),
                    property,
                    span,
                });
            } else if self.lookahead.kind == TokenKind::Template && self.is_template_head() {
                let quasi = self.parse_template_literal(true)?;
                let span = self.finalize(marker, NodeKind::TaggedTemplateExpression);
                expr = Expression::TaggedTemplate {
                    tag: Box::new(expr),
                    quasi,
                    span,
                };
            } else if self.matches("?.") {
                return Err(self.unexpected(&self.lookahead));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_super(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let token = self.next_token()?;
        if !(self.matches("(") || self.matches(".") || self.matches("[")) {
            return Err(self.unexpected(&token));
        }
        let span = self.finalize(marker, NodeKind::Super);
        Ok(Expression::Super {
            ws_before: token.ws_before.to_string(),
            span,
        })
    }

    fn parse_new_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let new_token = self.next_token()?;
        if self.matches(".") {
            let meta_span = self.finalize(marker, NodeKind::Identifier);
            let meta = Identifier::from_parts(new_token.ws_before, "new", "new", meta_span);
            let ws_dot = self.next_token()?.ws_before.to_string();
            if !self.matches_contextual("target") {
                return Err(self.unexpected(&self.lookahead));
            }
            let property_marker = self.start_node();
            let token = self.next_token()?;
            let property = self.finish_identifier(property_marker, &token);
            if !self.context.in_function_body {
                self.tolerate_site(marker.site(), messages::NEW_TARGET_OUTSIDE_FUNCTION)?;
            }
            let span = self.finalize(marker, NodeKind::MetaProperty);
            return Ok(Expression::MetaProperty {
                meta,
                ws_dot,
                property,
                span,
            });
        }
        if self.matches_keyword("import") {
            return Err(self.unexpected(&self.lookahead));
        }
        let callee = self.parse_left_hand_side_expression()?;
        self.reject_cover(&callee)?;
        let arguments = if self.matches("(") {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let span = self.finalize(marker, NodeKind::NewExpression);
        Ok(Expression::New {
            ws_before: new_token.ws_before.to_string(),
            callee: Box::new(callee),
            arguments,
            span,
        })
    }

    /// `import(source)` or `import.meta`.
    pub(crate) fn parse_import_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let import_token = self.next_token()?;
        if self.matches(".") {
            let meta_span = self.finalize(marker, NodeKind::Identifier);
            let meta = Identifier::from_parts(import_token.ws_before, "import", "import", meta_span);
            let ws_dot = self.next_token()?.ws_before.to_string();
            if !self.matches_contextual("meta") {
                return Err(self.unexpected(&self.lookahead));
            }
            let property_marker = self.start_node();
            let token = self.next_token()?;
            let property = self.finish_identifier(property_marker, &token);
            if !self.context.is_module {
                return Err(self.error_at(&import_token, ErrorKind::Grammar, messages::IMPORT_META_OUTSIDE_MODULE));
            }
            let span = self.finalize(marker, NodeKind::MetaProperty);
            return Ok(Expression::MetaProperty {
                meta,
                ws_dot,
                property,
                span,
            });
        }
        let ws_open = self.expect("(")?;
        let source = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
        let ws_close = self.expect(")")?;
        let span = self.finalize(marker, NodeKind::ImportExpression);
        Ok(Expression::Import {
            ws_before: import_token.ws_before.to_string(),
            ws_open,
            source: Box::new(source),
            ws_close,
            span,
        })
    }

    fn parse_member_property_name(&mut self) -> JsResult<MemberProperty> {
        let marker = self.start_node();
        match self.lookahead.kind {
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::BooleanLiteral | TokenKind::NullLiteral => {
                let token = self.next_token()?;
                Ok(MemberProperty::Static(self.finish_identifier(marker, &token)))
            }
            TokenKind::PrivateIdentifier => {
                let token = self.next_token()?;
                let span = self.finalize(marker, NodeKind::PrivateIdentifier);
                Ok(MemberProperty::Private(PrivateIdentifier {
                    ws_before: token.ws_before.to_string(),
                    name: token.text().to_string(),
                    span,
                }))
            }
            _ => Err(self.unexpected(&self.lookahead)),
        }
    }

    fn parse_computed_member(&mut self) -> JsResult<MemberProperty> {
        let ws_open = self.expect("[")?;
        let expression = self.with_allow_in(true, |p| p.parse_expression())?;
        let ws_close = self.expect("]")?;
        Ok(MemberProperty::Computed {
            ws_open,
            expression: Box::new(expression),
            ws_close,
        })
    }

    /// `( args )` of a call or `new`.
    pub(crate) fn parse_arguments(&mut self) -> JsResult<Arguments> {
        let ws_open = self.expect("(")?;
        let mut items = Vec::new();
        let mut separators = Vec::new();
        self.with_allow_in(true, |p| {
            while !p.matches(")") {
                let item = if p.matches("...") {
                    let marker = p.start_node();
                    let ws_before = p.next_token()?.ws_before.to_string();
                    let argument = p.parse_assignment_expression()?;
                    let span = p.finalize(marker, NodeKind::SpreadElement);
                    Expression::Spread(SpreadElement {
                        ws_before,
                        argument: Box::new(argument),
                        span,
                    })
                } else {
                    p.parse_assignment_expression()?
                };
                items.push(item);
                if !p.matches(")") {
                    separators.push(p.expect_separator()?);
                }
            }
            Ok(())
        })?;
        let ws_close = self.expect(")")?;
        Ok(Arguments {
            ws_open,
            items,
            separators,
            ws_close,
        })
    }

    // ==================== Primary ====================

    fn parse_primary_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        match self.lookahead.kind {
            TokenKind::Identifier => {
                if self.matches_contextual("async") {
                    let next = self.peek_token()?;
                    if next.is_keyword("function") && !next.newline_before {
                        return self.parse_function_expression();
                    }
                }
                let token = self.next_token()?;
                self.validate_identifier_reference(&token)?;
                Ok(Expression::Identifier(self.finish_identifier(marker, &token)))
            }
            TokenKind::NumericLiteral
            | TokenKind::BigIntLiteral
            | TokenKind::StringLiteral
            | TokenKind::BooleanLiteral
            | TokenKind::NullLiteral => Ok(Expression::Literal(self.parse_literal()?)),
            TokenKind::Template if self.is_template_head() => {
                Ok(Expression::Template(self.parse_template_literal(false)?))
            }
            TokenKind::Punctuator => match self.lookahead.raw {
                "(" => self.parse_group_expression(),
                "[" => Ok(Expression::Array(self.parse_array_initializer()?)),
                "{" => Ok(Expression::Object(self.parse_object_initializer()?)),
                "/" | "/=" => {
                    self.relex_regex()?;
                    Ok(Expression::Literal(self.parse_literal()?))
                }
                "<" if self.options.jsx => self.parse_jsx_root(),
                "<" => Err(self.error_at(&self.lookahead, ErrorKind::Jsx, messages::JSX_DISABLED)),
                _ => Err(self.unexpected(&self.lookahead)),
            },
            TokenKind::Keyword => match self.lookahead.raw {
                "this" => {
                    let token = self.next_token()?;
                    let span = self.finalize(marker, NodeKind::ThisExpression);
                    Ok(Expression::This {
                        ws_before: token.ws_before.to_string(),
                        span,
                    })
                }
                "function" => self.parse_function_expression(),
                "class" => Ok(Expression::Class(Box::new(self.parse_class(false)?))),
                _ => Err(self.unexpected(&self.lookahead)),
            },
            _ => Err(self.unexpected(&self.lookahead)),
        }
    }

    /// Builds an identifier from a consumed token.
    pub(crate) fn finish_identifier(&mut self, marker: Marker, token: &Token<'a>) -> Identifier {
        let span = self.finalize(marker, NodeKind::Identifier);
        Identifier::from_parts(token.ws_before, token.text(), token.raw, span)
    }

    /// Checks an identifier used as a reference.
    pub(crate) fn validate_identifier_reference(&mut self, token: &Token<'a>) -> JsResult<()> {
        let name = token.text();
        if name == "yield" && self.context.allow_yield {
            return Err(self.unexpected(token));
        }
        if name == "await" && (self.context.is_async || self.context.is_module) {
            return Err(self.unexpected(token));
        }
        if self.context.strict && is_strict_mode_reserved_word(name) {
            self.tolerate_at(token, messages::STRICT_RESERVED_WORD)?;
        }
        Ok(())
    }

    /// Literal token to node; legacy octal forms are strict-mode errors.
    pub(crate) fn parse_literal(&mut self) -> JsResult<Literal> {
        let marker = self.start_node();
        let token = self.next_token()?;
        if token.octal && self.context.strict {
            let message = if token.kind == TokenKind::NumericLiteral && token.raw.contains(['8', '9']) {
                messages::STRICT_LEADING_ZERO
            } else {
                messages::STRICT_OCTAL_LITERAL
            };
            self.tolerate_at(&token, message)?;
        }
        let value = match (&token.kind, &token.value) {
            (TokenKind::NumericLiteral, TokenValue::Number(n)) => LiteralValue::Number(*n),
            (TokenKind::BigIntLiteral, TokenValue::Text(text)) => match parse_bigint(text) {
                Some(value) => LiteralValue::BigInt(value),
                None => return Err(self.error_at(&token, ErrorKind::Scanner, messages::UNEXPECTED_TOKEN_ILLEGAL)),
            },
            (TokenKind::StringLiteral, _) => LiteralValue::String(token.text().to_string()),
            (TokenKind::BooleanLiteral, _) => LiteralValue::Boolean(token.raw == "true"),
            (TokenKind::NullLiteral, _) => LiteralValue::Null,
            (TokenKind::RegularExpression, TokenValue::RegExp { pattern, flags }) => LiteralValue::RegExp {
                pattern: pattern.clone(),
                flags: flags.clone(),
            },
            _ => return Err(self.unexpected(&token)),
        };
        let span = self.finalize(marker, NodeKind::Literal);
        Ok(Literal::from_parts(token.ws_before, value, token.raw, span))
    }

    /// Template literal; untagged templates reject invalid escapes.
    pub(crate) fn parse_template_literal(&mut self, tagged: bool) -> JsResult<TemplateLiteral> {
        let marker = self.start_node();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let element_marker = self.start_node();
            if self.lookahead.kind != TokenKind::Template {
                return Err(self.unexpected(&self.lookahead));
            }
            let token = self.next_token()?;
            let (cooked, tail) = match &token.value {
                TokenValue::Template { cooked, tail, .. } => (cooked.clone(), *tail),
                _ => return Err(self.unexpected(&token)),
            };
            if cooked.is_none() && !tagged {
                let message = if token.octal {
                    messages::TEMPLATE_OCTAL_LITERAL
                } else {
                    messages::INVALID_ESCAPE
                };
                return Err(self.error_at(&token, ErrorKind::Scanner, message));
            }
            let close_len = if tail { 1 } else { 2 };
            let raw = token.raw.get(1..token.raw.len() - close_len).unwrap_or_default();
            let span = self.finalize(element_marker, NodeKind::TemplateElement);
            quasis.push(TemplateElement {
                ws_before: token.ws_before.to_string(),
                raw: raw.to_string(),
                cooked,
                tail,
                span,
            });
            if tail {
                break;
            }
            expressions.push(self.with_allow_in(true, |p| p.parse_expression())?);
        }
        let span = self.finalize(marker, NodeKind::TemplateLiteral);
        Ok(TemplateLiteral {
            quasis,
            expressions,
            span,
        })
    }

    // ==================== Groups and literals ====================

    /// Elements of a parenthesized group, parsed permissively.
    pub(crate) fn parse_cover_items(&mut self, close: &str) -> JsResult<CoverItems> {
        let mut cover = CoverItems {
            items: Vec::new(),
            separators: Vec::new(),
            rest_site: None,
            bounds: None,
        };
        let mut first = None;
        while !self.matches(close) {
            let marker = self.start_node();
            first.get_or_insert(marker);
            let item = if self.matches("...") {
                cover.rest_site.get_or_insert(marker.site());
                let ws_before = self.next_token()?.ws_before.to_string();
                let argument = self.parse_assignment_cover()?;
                let span = self.finalize(marker, NodeKind::SpreadElement);
                Expression::Spread(SpreadElement {
                    ws_before,
                    argument: Box::new(argument),
                    span,
                })
            } else {
                self.parse_assignment_cover()?
            };
            cover.items.push(item);
            let end = self.last_end;
            if let Some(start) = first {
                cover.bounds = Some((start, end));
            }
            if !self.matches(close) {
                cover.separators.push(self.expect_separator()?);
            }
        }
        Ok(cover)
    }

    /// `( ... )`: kept as arrow parameters when `=>` follows, otherwise
    /// resolved to a parenthesized expression.
    fn parse_group_expression(&mut self) -> JsResult<Expression> {
        let marker = self.start_node();
        let ws_open = self.expect("(")?;
        let cover = self.with_allow_in(true, |p| p.parse_cover_items(")"))?;
        let ws_close = self.expect(")")?;
        if self.matches("=>") {
            let span = self.span_between(marker, self.last_end);
            return Ok(Expression::CoverParameters(CoverParameters {
                ws_async: None,
                ws_open,
                items: cover.items,
                separators: cover.separators,
                ws_close,
                span,
            }));
        }
        self.resolve_parenthesized(marker, ws_open, cover, ws_close)
    }

    fn resolve_parenthesized(
        &mut self,
        marker: Marker,
        ws_open: String,
        cover: CoverItems,
        ws_close: String,
    ) -> JsResult<Expression> {
        log::debug!("cover grammar at {} resolved as parenthesized expression", marker.index);
        if cover.items.is_empty() || cover.separators.len() >= cover.items.len() {
            return Err(self.unexpected(&self.lookahead));
        }
        if let Some(site) = cover.rest_site {
            return Err(self.error_at_site(site, ErrorKind::CoverGrammar, messages::REST_IN_PARENTHESIZED));
        }
        if let Some(site) = self.context.cover_initialized_name.take() {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_COVER_INITIALIZED_NAME));
        }
        let mut items = cover.items;
        let expression = if items.len() == 1 {
            items.remove(0)
        } else {
            let (start, end) = cover.bounds.unwrap_or((marker, self.last_end));
            let span = self.finalize_at(start, end, NodeKind::SequenceExpression);
            Expression::Sequence {
                expressions: items,
                separators: cover.separators,
                span,
            }
        };
        let span = self.finalize(marker, NodeKind::ParenthesizedExpression);
        Ok(Expression::Parenthesized {
            ws_before: ws_open,
            expression: Box::new(expression),
            ws_close,
            span,
        })
    }

    /// `[ a, , ...b ]`
    pub(crate) fn parse_array_initializer(&mut self) -> JsResult<ArrayExpression> {
        let marker = self.start_node();
        let ws_before = self.expect("[")?;
        let mut elements = Vec::new();
        let mut separators = Vec::new();
        self.with_allow_in(true, |p| {
            while !p.matches("]") {
                if p.matches(",") {
                    separators.push(p.expect_separator()?);
                    elements.push(None);
                    continue;
                }
                let element = if p.matches("...") {
                    let spread_marker = p.start_node();
                    let ws_before = p.next_token()?.ws_before.to_string();
                    let argument = p.parse_assignment_cover()?;
                    let span = p.finalize(spread_marker, NodeKind::SpreadElement);
                    Expression::Spread(SpreadElement {
                        ws_before,
                        argument: Box::new(argument),
                        span,
                    })
                } else {
                    p.parse_assignment_cover()?
                };
                elements.push(Some(element));
                if !p.matches("]") {
                    separators.push(p.expect_separator()?);
                }
            }
            Ok(())
        })?;
        let ws_close = self.expect("]")?;
        let span = self.finalize(marker, NodeKind::ArrayExpression);
        Ok(ArrayExpression {
            ws_before,
            elements,
            separators,
            ws_close,
            span,
        })
    }

    /// `{ a, b: 1, c() {}, get d() {}, ...e }`
    pub(crate) fn parse_object_initializer(&mut self) -> JsResult<ObjectExpression> {
        let marker = self.start_node();
        let ws_before = self.expect("{")?;
        let mut properties = Vec::new();
        let mut separators = Vec::new();
        self.with_allow_in(true, |p| {
            while !p.matches("}") {
                properties.push(p.parse_object_member()?);
                if !p.matches("}") {
                    separators.push(p.expect_separator()?);
                }
            }
            Ok(())
        })?;
        let ws_close = self.expect("}")?;
        let span = self.finalize(marker, NodeKind::ObjectExpression);
        Ok(ObjectExpression {
            ws_before,
            properties,
            separators,
            ws_close,
            span,
        })
    }

    /// Whether a `get`/`set`/`async`/`static` lookahead is a modifier rather
    /// than a key of its own.
    pub(crate) fn is_modifier(&mut self, forbid_newline: bool) -> JsResult<bool> {
        let next = self.peek_token()?;
        if next.is_eof() || (forbid_newline && next.newline_before) {
            return Ok(false);
        }
        let ends_key = next.kind == TokenKind::Punctuator
            && matches!(next.raw, "," | ":" | "(" | ")" | "}" | "=" | ";");
        Ok(!ends_key)
    }

    fn parse_object_member(&mut self) -> JsResult<ObjectMember> {
        let marker = self.start_node();
        if self.matches("...") {
            let ws_before = self.next_token()?.ws_before.to_string();
            let argument = self.parse_assignment_cover()?;
            let span = self.finalize(marker, NodeKind::SpreadElement);
            return Ok(ObjectMember::Spread(SpreadElement {
                ws_before,
                argument: Box::new(argument),
                span,
            }));
        }

        let mut prefix = MethodPrefix::default();
        let mut kind = PropertyKind::Init;
        if self.matches_contextual("async") && self.is_modifier(true)? {
            prefix.ws_async = Some(self.next_token()?.ws_before.to_string());
        } else if (self.matches_contextual("get") || self.matches_contextual("set")) && self.is_modifier(false)? {
            let token = self.next_token()?;
            kind = if token.raw == "get" {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            prefix.ws_accessor = Some(token.ws_before.to_string());
        }
        if self.matches("*") {
            prefix.ws_star = Some(self.next_token()?.ws_before.to_string());
        }

        let key_token = self.lookahead.clone();
        let key = self.parse_property_key(false)?;
        let has_prefix = prefix.ws_async.is_some() || prefix.ws_accessor.is_some() || prefix.ws_star.is_some();

        if has_prefix || self.matches("(") {
            let function = self.parse_method_function(
                prefix.ws_async.is_some(),
                prefix.ws_star.is_some(),
                kind,
            )?;
            let span = self.finalize(marker, NodeKind::Property);
            return Ok(ObjectMember::Property(Property {
                prefix,
                key,
                value: Expression::Function(Box::new(function)),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                ws_colon: String::new(),
                span,
            }));
        }

        if self.matches(":") {
            let ws_colon = self.next_token()?.ws_before.to_string();
            let value = self.parse_assignment_cover()?;
            let span = self.finalize(marker, NodeKind::Property);
            return Ok(ObjectMember::Property(Property {
                prefix,
                key,
                value,
                kind,
                method: false,
                shorthand: false,
                ws_colon,
                span,
            }));
        }

        let id = match (&key, key_token.kind) {
            (PropertyKey::Identifier(id), TokenKind::Identifier) => id.clone(),
            _ => return Err(self.unexpected(&self.lookahead)),
        };
        self.validate_identifier_reference(&key_token)?;
        let value = if self.matches("=") {
            let eq_token = self.next_token()?;
            self.context
                .cover_initialized_name
                .get_or_insert(Self::token_site(&eq_token));
            let default = self.parse_assignment_expression()?;
            let span = self.finalize(marker, NodeKind::AssignmentExpression);
            Expression::Assignment {
                left: Box::new(Pattern::Identifier(id)),
                ws_operator: eq_token.ws_before.to_string(),
                operator: AssignmentOperator::Assign,
                right: Box::new(default),
                span,
            }
        } else {
            Expression::Identifier(id)
        };
        let span = self.finalize(marker, NodeKind::Property);
        Ok(ObjectMember::Property(Property {
            prefix,
            key,
            value,
            kind,
            method: false,
            shorthand: true,
            ws_colon: String::new(),
            span,
        }))
    }

    /// Property or class member key.
    pub(crate) fn parse_property_key(&mut self, allow_private: bool) -> JsResult<PropertyKey> {
        let marker = self.start_node();
        match self.lookahead.kind {
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::BooleanLiteral | TokenKind::NullLiteral => {
                let token = self.next_token()?;
                Ok(PropertyKey::Identifier(self.finish_identifier(marker, &token)))
            }
            TokenKind::StringLiteral | TokenKind::NumericLiteral | TokenKind::BigIntLiteral => {
                Ok(PropertyKey::Literal(self.parse_literal()?))
            }
            TokenKind::PrivateIdentifier if allow_private => {
                let token = self.next_token()?;
                let span = self.finalize(marker, NodeKind::PrivateIdentifier);
                Ok(PropertyKey::Private(PrivateIdentifier {
                    ws_before: token.ws_before.to_string(),
                    name: token.text().to_string(),
                    span,
                }))
            }
            TokenKind::Punctuator if self.matches("[") => {
                let ws_open = self.next_token()?.ws_before.to_string();
                let expression = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
                let ws_close = self.expect("]")?;
                Ok(PropertyKey::Computed {
                    ws_open,
                    expression: Box::new(expression),
                    ws_close,
                })
            }
            _ => Err(self.unexpected(&self.lookahead)),
        }
    }
}

/// Value of a BigInt literal spelled with an optional radix prefix.
fn parse_bigint(text: &str) -> Option<BigInt> {
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0o" | "0O") => (&text[2..], 8),
        Some("0b" | "0B") => (&text[2..], 2),
        _ => (text, 10),
    };
    BigInt::parse_bytes(digits.as_bytes(), radix)
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::options::ParseOptions;
    use crate::parser::parse_script;
    use crate::unparse::Unparse;

    fn expression(source: &str) -> Expression {
        let program = parse_script(source, &ParseOptions::default()).unwrap().program;
        match program.body.into_iter().next() {
            Some(Statement::Expression(stmt)) => stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn error(source: &str) -> String {
        parse_script(source, &ParseOptions::default()).unwrap_err().message
    }

    #[test]
    fn test_precedence_climbing() {
        match expression("a + b * c") {
            Expression::Binary { operator, right, .. } => {
                assert_eq!(operator, BinaryOperator::Add);
                assert!(matches!(*right, Expression::Binary { operator: BinaryOperator::Multiply, .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_exponent_is_right_associative() {
        match expression("2 ** 3 ** 2") {
            Expression::Binary { left, right, .. } => {
                assert!(matches!(*left, Expression::Literal(_)));
                assert!(matches!(*right, Expression::Binary { operator: BinaryOperator::Exponent, .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unary_before_exponent_is_error() {
        assert_eq!(error("-a ** 2"), crate::error::messages::UNARY_BEFORE_EXPONENT);
    }

    #[test]
    fn test_nullish_mixing_is_error() {
        assert_eq!(error("a ?? b || c"), crate::error::messages::NULLISH_MIXED_WITH_LOGICAL);
        assert_eq!(error("a && b ?? c"), crate::error::messages::NULLISH_MIXED_WITH_LOGICAL);
        assert!(matches!(expression("(a && b) ?? c"), Expression::Binary { .. }));
    }

    #[test]
    fn test_regex_versus_division() {
        match expression("a / b / c") {
            Expression::Binary { operator, .. } => assert_eq!(operator, BinaryOperator::Divide),
            other => panic!("unexpected {:?}", other),
        }
        match expression("x = /b/g") {
            Expression::Assignment { right, .. } => match *right {
                Expression::Literal(lit) => assert_eq!(
                    lit.value(),
                    &LiteralValue::RegExp {
                        pattern: "b".into(),
                        flags: "g".into()
                    }
                ),
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_optional_chain() {
        match expression("a?.b?.[c]?.(d)") {
            Expression::Call(call) => {
                assert!(call.optional);
                assert!(matches!(*call.callee, Expression::Member(MemberExpression { optional: true, .. })));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            error("a?.b`c`"),
            crate::error::messages::INVALID_OPTIONAL_CHAIN_TEMPLATE
        );
    }

    #[test]
    fn test_conditional_allows_in_inside_for_head() {
        let source = "for (var i = a ? b in c : d; i; ) ;";
        let program = parse_script(source, &ParseOptions::default()).unwrap().program;
        assert_eq!(program.unparse(), source);
    }

    #[test]
    fn test_shorthand_initializer_outside_pattern_is_error() {
        assert_eq!(error("({ a = 1 });"), crate::error::messages::INVALID_COVER_INITIALIZED_NAME);
        assert_eq!(error("x = { a = 1 };"), crate::error::messages::INVALID_COVER_INITIALIZED_NAME);
        assert!(parse_script("({ a = 1 } = x);", &ParseOptions::default()).is_ok());
        assert!(parse_script("[{ a = 1 }] = x;", &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_bigint_literal_value() {
        match expression("0x1Fn") {
            Expression::Literal(lit) => assert_eq!(lit.value(), &LiteralValue::BigInt(31.into())),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_async_call_is_not_arrow() {
        assert!(matches!(expression("async(a, b)"), Expression::Call(_)));
        assert!(matches!(expression("async(a) => a"), Expression::Arrow(_)));
        assert!(matches!(expression("async x => x"), Expression::Arrow(_)));
    }

    #[test]
    fn test_new_target_requires_function() {
        let output = parse_script("function f() { return new.target; }", &ParseOptions::default());
        assert!(output.is_ok());
        assert_eq!(error("new.target"), crate::error::messages::NEW_TARGET_OUTSIDE_FUNCTION);
    }

    #[test]
    fn test_template_substitutions() {
        match expression("`a${b}c${d}`") {
            Expression::Template(template) => {
                assert_eq!(template.quasis.len(), 3);
                assert_eq!(template.expressions.len(), 2);
                assert_eq!(template.quasis[1].raw, "c");
                assert!(template.quasis[2].tail);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
