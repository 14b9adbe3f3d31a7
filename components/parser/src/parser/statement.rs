//! Statements and declarations.

use super::{Marker, Parser};
use crate::ast::*;
use crate::error::messages;
use crate::token::{Token, TokenKind};
use core_types::{ErrorKind, JsResult};

impl<'a> Parser<'a> {
    /// Leading string-literal statements. `"use strict"` switches the
    /// enclosing code to strict mode, which also condemns any legacy octal
    /// string seen earlier in the prologue.
    pub(crate) fn parse_directive_prologue(&mut self) -> JsResult<Vec<Statement>> {
        let mut body = Vec::new();
        let mut first_octal: Option<Token<'a>> = None;
        while self.lookahead.kind == TokenKind::StringLiteral {
            let marker = self.start_node();
            let token = self.lookahead.clone();
            let expression = self.parse_expression()?;
            let is_directive = matches!(&expression, Expression::Literal(lit) if lit.raw() == token.raw);
            let semicolon = self.consume_semicolon()?;
            if !is_directive {
                let span = self.finalize(marker, NodeKind::ExpressionStatement);
                body.push(Statement::Expression(ExpressionStatement {
                    expression,
                    directive: None,
                    semicolon,
                    span,
                }));
                break;
            }
            let directive = token.raw[1..token.raw.len() - 1].to_string();
            if directive == "use strict" {
                self.context.strict = true;
                if let Some(octal) = first_octal.take() {
                    self.tolerate_at(&octal, messages::STRICT_OCTAL_LITERAL)?;
                }
            } else if token.octal && first_octal.is_none() {
                first_octal = Some(token);
            }
            let span = self.finalize(marker, NodeKind::Directive);
            body.push(Statement::Expression(ExpressionStatement {
                expression,
                directive: Some(directive),
                semicolon,
                span,
            }));
        }
        Ok(body)
    }

    /// Statement or declaration inside a block, function body or script.
    pub(crate) fn parse_statement_list_item(&mut self) -> JsResult<Statement> {
        let kind = self.lookahead.kind;
        match kind {
            TokenKind::Keyword => match self.lookahead.raw {
                "function" => Ok(Statement::Function(Box::new(self.parse_function_declaration(false)?))),
                "class" => Ok(Statement::Class(Box::new(self.parse_class(true)?))),
                "const" => self.parse_variable_statement(),
                "import" => {
                    let next = self.peek_token()?;
                    if next.is_punctuator("(") || next.is_punctuator(".") {
                        self.parse_statement()
                    } else {
                        Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::ILLEGAL_IMPORT_DECLARATION))
                    }
                }
                "export" => Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::ILLEGAL_EXPORT_DECLARATION)),
                _ => self.parse_statement(),
            },
            TokenKind::Identifier if self.matches_contextual("let") && self.is_lexical_declaration()? => {
                self.parse_variable_statement()
            }
            TokenKind::Identifier if self.matches_contextual("async") && self.is_async_function()? => {
                Ok(Statement::Function(Box::new(self.parse_function_declaration(false)?)))
            }
            _ => self.parse_statement(),
        }
    }

    /// `let` starts a declaration when a binding follows it.
    fn is_lexical_declaration(&mut self) -> JsResult<bool> {
        let next = self.peek_token()?;
        Ok(next.kind == TokenKind::Identifier || next.is_punctuator("[") || next.is_punctuator("{"))
    }

    pub(crate) fn is_async_function(&mut self) -> JsResult<bool> {
        let next = self.peek_token()?;
        Ok(next.is_keyword("function") && !next.newline_before)
    }

    pub(crate) fn parse_statement(&mut self) -> JsResult<Statement> {
        match self.lookahead.kind {
            TokenKind::Punctuator => match self.lookahead.raw {
                "{" => Ok(Statement::Block(self.parse_block()?)),
                ";" => {
                    let marker = self.start_node();
                    let ws_before = self.next_token()?.ws_before.to_string();
                    let span = self.finalize(marker, NodeKind::EmptyStatement);
                    Ok(Statement::Empty { ws_before, span })
                }
                _ => self.parse_labelled_or_expression_statement(),
            },
            TokenKind::Keyword => match self.lookahead.raw {
                "break" => self.parse_break_statement(),
                "continue" => self.parse_continue_statement(),
                "debugger" => self.parse_debugger_statement(),
                "do" => self.parse_do_while_statement(),
                "for" => self.parse_for_statement(),
                "function" => self.parse_function_statement(),
                "if" => self.parse_if_statement(),
                "return" => self.parse_return_statement(),
                "switch" => self.parse_switch_statement(),
                "throw" => self.parse_throw_statement(),
                "try" => self.parse_try_statement(),
                "var" => self.parse_variable_statement(),
                "while" => self.parse_while_statement(),
                "with" => self.parse_with_statement(),
                _ => self.parse_labelled_or_expression_statement(),
            },
            _ => self.parse_labelled_or_expression_statement(),
        }
    }

    /// A function declaration where only a statement is allowed, which is
    /// legacy sloppy-mode syntax.
    fn parse_function_statement(&mut self) -> JsResult<Statement> {
        if self.context.strict {
            self.tolerate_at(&self.lookahead.clone(), messages::STRICT_FUNCTION)?;
        }
        Ok(Statement::Function(Box::new(self.parse_function_declaration(false)?)))
    }

    pub(crate) fn parse_block(&mut self) -> JsResult<BlockStatement> {
        let marker = self.start_node();
        let ws_before = self.expect("{")?;
        let mut body = Vec::new();
        while !self.matches("}") && !self.lookahead.is_eof() {
            body.push(self.parse_statement_list_item()?);
        }
        let ws_close = self.expect("}")?;
        let span = self.finalize(marker, NodeKind::BlockStatement);
        Ok(BlockStatement {
            ws_before,
            body,
            ws_close,
            span,
        })
    }

    fn parse_labelled_or_expression_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let start = self.lookahead.clone();
        let expression = self.parse_expression()?;
        if start.kind == TokenKind::Identifier && self.matches(":") {
            if let Expression::Identifier(label) = expression {
                return self.parse_labelled_body(marker, label);
            }
        }
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::ExpressionStatement);
        Ok(Statement::Expression(ExpressionStatement {
            expression,
            directive: None,
            semicolon,
            span,
        }))
    }

    fn parse_labelled_body(&mut self, marker: Marker, label: Identifier) -> JsResult<Statement> {
        let name = label.name().to_string();
        if self.context.labels.contains(&name) {
            return Err(self.error_at_site(marker.site(), ErrorKind::Grammar, messages::label_redeclaration(&name)));
        }
        let ws_colon = self.next_token()?.ws_before.to_string();
        self.context.labels.push(name);
        let body = if self.matches_keyword("function") {
            self.parse_function_statement()
        } else {
            self.parse_statement()
        };
        self.context.labels.pop();
        let body = body?;
        let span = self.finalize(marker, NodeKind::LabeledStatement);
        Ok(Statement::Labeled {
            label,
            ws_colon,
            body: Box::new(body),
            span,
        })
    }

    /// Label after `break`/`continue`, which must be in scope.
    fn parse_jump_label(&mut self) -> JsResult<Option<Identifier>> {
        if self.lookahead.kind != TokenKind::Identifier || self.lookahead.newline_before {
            return Ok(None);
        }
        let marker = self.start_node();
        let token = self.next_token()?;
        let label = self.finish_identifier(marker, &token);
        if !self.context.labels.iter().any(|l| l == label.name()) {
            return Err(self.error_at(&token, ErrorKind::Grammar, messages::unknown_label(label.name())));
        }
        Ok(Some(label))
    }

    fn parse_break_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let keyword = self.next_token()?;
        let label = self.parse_jump_label()?;
        if label.is_none() && !self.context.in_iteration && !self.context.in_switch {
            return Err(self.error_at(&keyword, ErrorKind::Grammar, messages::ILLEGAL_BREAK));
        }
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::BreakStatement);
        Ok(Statement::Break {
            ws_before: keyword.ws_before.to_string(),
            label,
            semicolon,
            span,
        })
    }

    fn parse_continue_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let keyword = self.next_token()?;
        if !self.context.in_iteration {
            return Err(self.error_at(&keyword, ErrorKind::Grammar, messages::ILLEGAL_CONTINUE));
        }
        let label = self.parse_jump_label()?;
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::ContinueStatement);
        Ok(Statement::Continue {
            ws_before: keyword.ws_before.to_string(),
            label,
            semicolon,
            span,
        })
    }

    fn parse_debugger_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::DebuggerStatement);
        Ok(Statement::Debugger {
            ws_before,
            semicolon,
            span,
        })
    }

    fn parse_return_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let keyword = self.next_token()?;
        if !self.context.in_function_body {
            self.tolerate_at(&keyword, messages::ILLEGAL_RETURN)?;
        }
        let has_argument = !self.lookahead.newline_before
            && !self.matches(";")
            && !self.matches("}")
            && !self.lookahead.is_eof();
        let argument = if has_argument {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::ReturnStatement);
        Ok(Statement::Return {
            ws_before: keyword.ws_before.to_string(),
            argument,
            semicolon,
            span,
        })
    }

    fn parse_throw_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        if self.lookahead.newline_before {
            return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::NEWLINE_AFTER_THROW));
        }
        let argument = self.parse_expression()?;
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::ThrowStatement);
        Ok(Statement::Throw {
            ws_before,
            argument,
            semicolon,
            span,
        })
    }

    /// Body of an `if` branch; sloppy code may put a function declaration there.
    fn parse_if_clause(&mut self) -> JsResult<Statement> {
        if self.matches_keyword("function") {
            return self.parse_function_statement();
        }
        self.parse_statement()
    }

    fn parse_if_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let ws_open = self.expect("(")?;
        let test = self.with_allow_in(true, |p| p.parse_expression())?;
        let ws_close = self.expect(")")?;
        let consequent = self.parse_if_clause()?;
        let alternate = if self.matches_keyword("else") {
            let ws_else = self.next_token()?.ws_before.to_string();
            Some(ElseClause {
                ws_else,
                body: Box::new(self.parse_if_clause()?),
            })
        } else {
            None
        };
        let span = self.finalize(marker, NodeKind::IfStatement);
        Ok(Statement::If {
            ws_before,
            ws_open,
            test,
            ws_close,
            consequent: Box::new(consequent),
            alternate,
            span,
        })
    }

    /// Loop body, parsed with `continue` allowed.
    fn parse_iteration_body(&mut self) -> JsResult<Statement> {
        let saved = self.context.in_iteration;
        self.context.in_iteration = true;
        let body = self.parse_statement();
        self.context.in_iteration = saved;
        body
    }

    fn parse_while_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let ws_open = self.expect("(")?;
        let test = self.with_allow_in(true, |p| p.parse_expression())?;
        let ws_close = self.expect(")")?;
        let body = self.parse_iteration_body()?;
        let span = self.finalize(marker, NodeKind::WhileStatement);
        Ok(Statement::While {
            ws_before,
            ws_open,
            test,
            ws_close,
            body: Box::new(body),
            span,
        })
    }

    fn parse_do_while_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let body = self.parse_iteration_body()?;
        let ws_while = self.expect_keyword("while")?;
        let ws_open = self.expect("(")?;
        let test = self.with_allow_in(true, |p| p.parse_expression())?;
        let ws_close = self.expect(")")?;
        // The `;` after `do ... while (...)` is optional even on the same line.
        let semicolon = if self.matches(";") {
            self.consume_semicolon()?
        } else {
            Semicolon::inserted()
        };
        let span = self.finalize(marker, NodeKind::DoWhileStatement);
        Ok(Statement::DoWhile {
            ws_before,
            body: Box::new(body),
            ws_while,
            ws_open,
            test,
            ws_close,
            semicolon,
            span,
        })
    }

    fn parse_with_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let keyword = self.next_token()?;
        if self.context.strict {
            self.tolerate_at(&keyword, messages::STRICT_MODE_WITH)?;
        }
        let ws_open = self.expect("(")?;
        let object = self.with_allow_in(true, |p| p.parse_expression())?;
        let ws_close = self.expect(")")?;
        let body = self.parse_statement()?;
        let span = self.finalize(marker, NodeKind::WithStatement);
        Ok(Statement::With {
            ws_before: keyword.ws_before.to_string(),
            ws_open,
            object,
            ws_close,
            body: Box::new(body),
            span,
        })
    }

    fn parse_switch_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let ws_open = self.expect("(")?;
        let discriminant = self.with_allow_in(true, |p| p.parse_expression())?;
        let ws_close = self.expect(")")?;
        let ws_lbrace = self.expect("{")?;
        let saved = self.context.in_switch;
        self.context.in_switch = true;
        let cases = self.parse_switch_cases();
        self.context.in_switch = saved;
        let cases = cases?;
        let ws_rbrace = self.expect("}")?;
        let span = self.finalize(marker, NodeKind::SwitchStatement);
        Ok(Statement::Switch(SwitchStatement {
            ws_before,
            ws_open,
            discriminant,
            ws_close,
            ws_lbrace,
            cases,
            ws_rbrace,
            span,
        }))
    }

    fn parse_switch_cases(&mut self) -> JsResult<Vec<SwitchCase>> {
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.matches("}") {
            let marker = self.start_node();
            let (ws_before, test) = if self.matches_keyword("case") {
                let ws_before = self.next_token()?.ws_before.to_string();
                let test = self.with_allow_in(true, |p| p.parse_expression())?;
                (ws_before, Some(test))
            } else {
                if seen_default {
                    return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::MULTIPLE_DEFAULTS_IN_SWITCH));
                }
                seen_default = true;
                (self.expect_keyword("default")?, None)
            };
            let ws_colon = self.expect(":")?;
            let mut consequent = Vec::new();
            while !(self.matches("}")
                || self.matches_keyword("case")
                || self.matches_keyword("default")
                || self.lookahead.is_eof())
            {
                consequent.push(self.parse_statement_list_item()?);
            }
            let span = self.finalize(marker, NodeKind::SwitchCase);
            cases.push(SwitchCase {
                ws_before,
                test,
                ws_colon,
                consequent,
                span,
            });
        }
        Ok(cases)
    }

    fn parse_try_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let keyword = self.next_token()?;
        let block = self.parse_block()?;
        let handler = if self.matches_keyword("catch") {
            let catch_marker = self.start_node();
            let ws_before = self.next_token()?.ws_before.to_string();
            let param = if self.matches("(") {
                let ws_open = self.next_token()?.ws_before.to_string();
                let param_site = Self::token_site(&self.lookahead);
                let pattern = self.parse_binding_target(messages::STRICT_CATCH_VARIABLE)?;
                let names = pattern.bound_names();
                let duplicated = names
                    .iter()
                    .enumerate()
                    .any(|(i, id)| names[..i].iter().any(|prev| prev.name() == id.name()));
                if duplicated {
                    return Err(self.error_at_site(param_site, ErrorKind::Grammar, messages::DUPLICATE_PARAMETER));
                }
                let ws_close = self.expect(")")?;
                Some(CatchParameter {
                    ws_open,
                    pattern,
                    ws_close,
                })
            } else {
                None
            };
            let body = self.parse_block()?;
            let span = self.finalize(catch_marker, NodeKind::CatchClause);
            Some(CatchClause {
                ws_before,
                param,
                body,
                span,
            })
        } else {
            None
        };
        let finalizer = if self.matches_keyword("finally") {
            let ws_finally = self.next_token()?.ws_before.to_string();
            Some(FinallyClause {
                ws_finally,
                body: self.parse_block()?,
            })
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at(&keyword, ErrorKind::Grammar, messages::NO_CATCH_OR_FINALLY));
        }
        let span = self.finalize(marker, NodeKind::TryStatement);
        Ok(Statement::Try(TryStatement {
            ws_before: keyword.ws_before.to_string(),
            block,
            handler,
            finalizer,
            span,
        }))
    }

    // ==================== Declarations ====================

    fn parse_variable_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let mut declaration = self.parse_variable_declaration_list(false)?;
        declaration.semicolon = Some(self.consume_semicolon()?);
        declaration.span = self.finalize(marker, NodeKind::VariableDeclaration);
        Ok(Statement::Variable(declaration))
    }

    /// `var`/`let`/`const` and its declarators; the caller closes the span.
    /// Inside a `for` head the initializer checks are left to the loop.
    pub(crate) fn parse_variable_declaration_list(&mut self, in_for: bool) -> JsResult<VariableDeclaration> {
        let keyword = self.next_token()?;
        let kind = match keyword.raw {
            "var" => VariableKind::Var,
            "let" => VariableKind::Let,
            _ => VariableKind::Const,
        };
        let mut declarations = Vec::new();
        let mut separators = Vec::new();
        loop {
            let marker = self.start_node();
            let id_site = Self::token_site(&self.lookahead);
            let id = self.parse_binding_target(messages::STRICT_VAR_NAME)?;
            if kind != VariableKind::Var && id.bound_names().iter().any(|name| name.name() == "let") {
                self.tolerate_site(id_site, messages::LET_IN_LEXICAL_BINDING)?;
            }
            let init = if self.matches("=") {
                let ws_eq = self.next_token()?.ws_before.to_string();
                let value = self.parse_assignment_expression()?;
                Some(Initializer { ws_eq, value })
            } else {
                if !in_for {
                    if kind == VariableKind::Const {
                        return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::DECLARATION_MISSING_INITIALIZER));
                    }
                    if !matches!(id, Pattern::Identifier(_)) {
                        return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::DESTRUCTURING_MISSING_INITIALIZER));
                    }
                }
                None
            };
            let span = self.finalize(marker, NodeKind::VariableDeclarator);
            declarations.push(VariableDeclarator { id, init, span });
            if !self.matches(",") {
                break;
            }
            separators.push(self.expect_separator()?);
        }
        Ok(VariableDeclaration {
            ws_before: keyword.ws_before.to_string(),
            kind,
            declarations,
            separators,
            semicolon: None,
            span: Span::default(),
        })
    }

    // ==================== for ====================

    fn parse_for_statement(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let ws_await = if self.matches_contextual("await") {
            if !self.context.is_async {
                return Err(self.unexpected(&self.lookahead));
            }
            Some(self.next_token()?.ws_before.to_string())
        } else {
            None
        };
        let ws_open = self.expect("(")?;

        if self.matches(";") {
            return self.finish_for_statement(marker, ws_before, ws_await, ws_open, None);
        }

        let declaration_start = self.matches_keyword("var")
            || self.matches_keyword("const")
            || (self.matches_contextual("let") && self.is_lexical_declaration()?);
        if declaration_start {
            let init_marker = self.start_node();
            let mut declaration = self.with_allow_in(false, |p| p.parse_variable_declaration_list(true))?;
            declaration.span = self.finalize(init_marker, NodeKind::VariableDeclaration);
            let iterates = self.matches_keyword("in") || self.matches_contextual("of");
            if iterates && declaration.declarations.len() == 1 {
                let declarator = &declaration.declarations[0];
                if declarator.init.is_some() {
                    // Annex B keeps `for (var x = 1 in o)` in sloppy scripts.
                    let legacy = self.matches_keyword("in")
                        && declaration.kind == VariableKind::Var
                        && !self.context.strict
                        && matches!(declarator.id, Pattern::Identifier(_));
                    if !legacy {
                        return Err(self.error_at_site(init_marker.site(), ErrorKind::Grammar, messages::FOR_IN_OF_LOOP_INITIALIZER));
                    }
                }
                return self.finish_for_in_of(marker, ws_before, ws_await, ws_open, ForTarget::Variable(declaration));
            }
            for declarator in &declaration.declarations {
                if declarator.init.is_none() {
                    if declaration.kind == VariableKind::Const {
                        return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::DECLARATION_MISSING_INITIALIZER));
                    }
                    if !matches!(declarator.id, Pattern::Identifier(_)) {
                        return Err(self.error_at(&self.lookahead, ErrorKind::Grammar, messages::DESTRUCTURING_MISSING_INITIALIZER));
                    }
                }
            }
            return self.finish_for_statement(marker, ws_before, ws_await, ws_open, Some(ForInit::Variable(declaration)));
        }

        let init_marker = self.start_node();
        let start = self.lookahead.clone();
        let previous = self.context.cover_initialized_name.take();
        let init = self.with_allow_in(false, |p| p.parse_assignment_cover())?;
        let iterates = self.matches_keyword("in") || (self.matches_contextual("of") && !start.is_contextual("async"));
        if iterates {
            let message = if self.matches_keyword("in") {
                messages::INVALID_LHS_IN_FOR_IN
            } else {
                messages::INVALID_LHS_IN_FOR_LOOP
            };
            let target = match init {
                Expression::Array(_) | Expression::Object(_) => self.reinterpret_expression_as_pattern(
                    init,
                    super::pattern::PatternMode::Assignment,
                    Self::token_site(&start),
                )?,
                other => self.simple_assignment_target(other, &start, message)?,
            };
            self.context.cover_initialized_name = previous;
            return self.finish_for_in_of(marker, ws_before, ws_await, ws_open, ForTarget::Pattern(target));
        }
        if let Some(site) = self.context.cover_initialized_name.take() {
            return Err(self.error_at_site(site, ErrorKind::Grammar, messages::INVALID_COVER_INITIALIZED_NAME));
        }
        self.context.cover_initialized_name = previous;
        let init = if self.matches(",") {
            let mut expressions = vec![init];
            let mut separators = Vec::new();
            while self.matches(",") {
                separators.push(self.expect_separator()?);
                expressions.push(self.with_allow_in(false, |p| p.parse_assignment_expression())?);
            }
            let span = self.finalize(init_marker, NodeKind::SequenceExpression);
            Expression::Sequence {
                expressions,
                separators,
                span,
            }
        } else {
            init
        };
        self.finish_for_statement(marker, ws_before, ws_await, ws_open, Some(ForInit::Expression(init)))
    }

    /// `; test ; update ) body` of a classic `for`.
    fn finish_for_statement(
        &mut self,
        marker: Marker,
        ws_before: String,
        ws_await: Option<String>,
        ws_open: String,
        init: Option<ForInit>,
    ) -> JsResult<Statement> {
        if ws_await.is_some() {
            return Err(self.unexpected(&self.lookahead));
        }
        let ws_first_semi = self.expect(";")?;
        let test = if self.matches(";") {
            None
        } else {
            Some(self.with_allow_in(true, |p| p.parse_expression())?)
        };
        let ws_second_semi = self.expect(";")?;
        let update = if self.matches(")") {
            None
        } else {
            Some(self.with_allow_in(true, |p| p.parse_expression())?)
        };
        let ws_close = self.expect(")")?;
        let body = self.parse_iteration_body()?;
        let span = self.finalize(marker, NodeKind::ForStatement);
        Ok(Statement::For(ForStatement {
            ws_before,
            ws_open,
            init,
            ws_first_semi,
            test,
            ws_second_semi,
            update,
            ws_close,
            body: Box::new(body),
            span,
        }))
    }

    /// `in right ) body` or `of right ) body`.
    fn finish_for_in_of(
        &mut self,
        marker: Marker,
        ws_before: String,
        ws_await: Option<String>,
        ws_open: String,
        left: ForTarget,
    ) -> JsResult<Statement> {
        if self.matches_keyword("in") {
            if ws_await.is_some() {
                return Err(self.unexpected(&self.lookahead));
            }
            let ws_in = self.next_token()?.ws_before.to_string();
            let right = self.with_allow_in(true, |p| p.parse_expression())?;
            let ws_close = self.expect(")")?;
            let body = self.parse_iteration_body()?;
            let span = self.finalize(marker, NodeKind::ForInStatement);
            return Ok(Statement::ForIn(ForInStatement {
                ws_before,
                ws_open,
                left,
                ws_in,
                right,
                ws_close,
                body: Box::new(body),
                span,
            }));
        }
        let ws_of = self.expect_contextual("of")?;
        let right = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
        let ws_close = self.expect(")")?;
        let body = self.parse_iteration_body()?;
        let span = self.finalize(marker, NodeKind::ForOfStatement);
        Ok(Statement::ForOf(ForOfStatement {
            ws_before,
            ws_await,
            ws_open,
            left,
            ws_of,
            right,
            ws_close,
            body: Box::new(body),
            span,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::messages;
    use crate::options::ParseOptions;
    use crate::parser::{parse_module, parse_script};
    use crate::unparse::Unparse;
    use pretty_assertions::assert_eq;

    fn script(source: &str) -> Program {
        parse_script(source, &ParseOptions::default()).unwrap().program
    }

    fn error(source: &str) -> String {
        parse_script(source, &ParseOptions::default()).unwrap_err().message
    }

    #[test]
    fn test_asi_records_inserted_semicolons() {
        let program = script("a = 1\nb = 2;");
        let semis: Vec<bool> = program
            .body
            .iter()
            .map(|s| match s {
                Statement::Expression(stmt) => stmt.semicolon.is_explicit(),
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(semis, vec![false, true]);
    }

    #[test]
    fn test_restricted_productions() {
        let program = script("function f() { return\n1 }");
        let Statement::Function(function) = &program.body[0] else {
            panic!("expected function");
        };
        assert!(matches!(function.body.body[0], Statement::Return { argument: None, .. }));
        assert_eq!(error("throw\nerr;"), messages::NEWLINE_AFTER_THROW);
    }

    #[test]
    fn test_directive_prologue() {
        let program = script("'use strict'; \"other\"; x;");
        let directives: Vec<Option<&str>> = program
            .body
            .iter()
            .map(|s| match s {
                Statement::Expression(stmt) => stmt.directive.as_deref(),
                _ => None,
            })
            .collect();
        assert_eq!(directives, vec![Some("use strict"), Some("other"), None]);
    }

    #[test]
    fn test_octal_before_use_strict() {
        assert_eq!(error("'\\07'; 'use strict';"), messages::STRICT_OCTAL_LITERAL);
    }

    #[test]
    fn test_for_variants_round_trip() {
        let source = "for (let i = 0, n = a.length; i < n; i++) {}\nfor (const k in obj) ;\nfor ([a, b] of pairs) continue;\nfor (;;) break;";
        assert_eq!(script(source).unparse(), source);
    }

    #[test]
    fn test_for_await_requires_async() {
        assert!(parse_module("for await (const x of xs) {}", &ParseOptions::default()).is_ok());
        assert!(parse_script("async function f() { for await (x of xs); }", &ParseOptions::default()).is_ok());
        assert_eq!(error("for await (x of xs);"), messages::UNEXPECTED_IDENTIFIER);
    }

    #[test]
    fn test_for_of_initializer_is_error() {
        assert_eq!(error("for (let x = 1 of xs);"), messages::FOR_IN_OF_LOOP_INITIALIZER);
        assert!(parse_script("for (var x = 1 in o);", &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_labels_and_jumps() {
        assert!(parse_script("outer: for (;;) { inner: while (1) { continue outer; } }", &ParseOptions::default()).is_ok());
        assert_eq!(error("break;"), messages::ILLEGAL_BREAK);
        assert_eq!(error("while (1) { continue missing; }"), messages::unknown_label("missing"));
        assert_eq!(error("a: a: ;"), messages::label_redeclaration("a"));
    }

    #[test]
    fn test_switch_and_try() {
        let source = "switch (x) { case 1: a(); break; default: b() }\ntry { f() } catch ({ message }) {} finally {}";
        assert_eq!(script(source).unparse(), source);
        assert_eq!(error("switch (x) { default: default: }"), messages::MULTIPLE_DEFAULTS_IN_SWITCH);
        assert_eq!(error("try {}"), messages::NO_CATCH_OR_FINALLY);
    }

    #[test]
    fn test_declaration_initializers() {
        assert_eq!(error("const a;"), messages::DECLARATION_MISSING_INITIALIZER);
        assert_eq!(error("let [a];"), messages::DESTRUCTURING_MISSING_INITIALIZER);
        assert!(matches!(script("let\nx = 1").body[0], Statement::Variable(_)));
    }

    #[test]
    fn test_tolerant_collects_strict_errors() {
        let options = ParseOptions::default().with_tolerant(true);
        let output = parse_script("'use strict'; with (a) {} delete b;", &options).unwrap();
        let messages: Vec<&str> = output.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec![messages::STRICT_MODE_WITH, messages::STRICT_DELETE]);
    }
}
