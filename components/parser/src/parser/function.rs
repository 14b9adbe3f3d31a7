//! Functions, methods and classes.

use super::{Context, Parser};
use crate::ast::*;
use crate::character::{is_restricted_word, is_strict_mode_reserved_word};
use crate::error::{messages, ErrorSite};
use crate::token::TokenKind;
use core_types::{ErrorKind, JsResult};

fn is_use_strict(statement: &Statement) -> bool {
    matches!(
        statement,
        Statement::Expression(ExpressionStatement { directive: Some(directive), .. }) if directive == "use strict"
    )
}

impl<'a> Parser<'a> {
    /// `function` or `async function` statement. The name may be omitted
    /// only under `export default`.
    pub(crate) fn parse_function_declaration(&mut self, id_optional: bool) -> JsResult<Function> {
        self.parse_function(true, id_optional)
    }

    pub(crate) fn parse_function_expression(&mut self) -> JsResult<Expression> {
        let function = self.parse_function(false, true)?;
        Ok(Expression::Function(Box::new(function)))
    }

    fn parse_function(&mut self, declaration: bool, id_optional: bool) -> JsResult<Function> {
        let marker = self.start_node();
        let (is_async, ws_async) = if self.matches_contextual("async") {
            (true, self.next_token()?.ws_before.to_string())
        } else {
            (false, String::new())
        };
        let ws_keyword = self.expect_keyword("function")?;
        let (generator, ws_star) = if self.matches("*") {
            (true, self.next_token()?.ws_before.to_string())
        } else {
            (false, String::new())
        };

        let id_site = Self::token_site(&self.lookahead);
        let id = if self.lookahead.kind == TokenKind::Identifier {
            if declaration {
                Some(self.parse_binding_identifier(messages::STRICT_FUNCTION_NAME)?)
            } else {
                // An expression's own name follows the rules of its body.
                let saved = (self.context.allow_yield, self.context.is_async);
                self.context.allow_yield = generator;
                self.context.is_async = is_async;
                let id = self.parse_binding_identifier(messages::STRICT_FUNCTION_NAME);
                (self.context.allow_yield, self.context.is_async) = saved;
                Some(id?)
            }
        } else if declaration && !id_optional {
            return Err(self.unexpected(&self.lookahead));
        } else {
            None
        };

        let (params, body) = self.parse_function_params_and_body(is_async, generator, id.as_ref(), id_site, false)?;
        let kind = if declaration {
            NodeKind::FunctionDeclaration
        } else {
            NodeKind::FunctionExpression
        };
        let span = self.finalize(marker, kind);
        Ok(Function {
            is_async,
            ws_async,
            ws_keyword,
            generator,
            ws_star,
            id,
            params,
            body,
            span,
        })
    }

    /// Parameters and body under a fresh function context. A `"use strict"`
    /// directive in the body re-validates the name and parameters.
    fn parse_function_params_and_body(
        &mut self,
        is_async: bool,
        generator: bool,
        id: Option<&Identifier>,
        site: ErrorSite,
        unique_params: bool,
    ) -> JsResult<(FormalParameters, FunctionBody)> {
        let context = Context {
            allow_in: true,
            allow_yield: generator,
            is_async,
            in_function_body: true,
            in_iteration: false,
            in_switch: false,
            in_parameters: false,
            labels: Vec::new(),
            cover_initialized_name: None,
            ..self.context.clone()
        };
        self.with_context(context, |p| {
            let was_strict = p.context.strict;
            p.context.in_parameters = true;
            let params = p.parse_formal_parameters()?;
            p.context.in_parameters = false;
            let (body, has_use_strict) = p.parse_function_source_elements()?;
            let strict = p.context.strict;

            if has_use_strict && !params.is_simple() {
                return Err(p.error_at_site(site, ErrorKind::Grammar, messages::ILLEGAL_USE_STRICT));
            }
            if strict && !was_strict {
                if let Some(id) = id {
                    if is_restricted_word(id.name()) {
                        p.tolerate_site(site, messages::STRICT_FUNCTION_NAME)?;
                    } else if is_strict_mode_reserved_word(id.name()) {
                        p.tolerate_site(site, messages::STRICT_RESERVED_WORD)?;
                    }
                }
            }
            let unique = unique_params || !params.is_simple();
            p.validate_parameter_names(&params.items, strict, unique, site)?;
            Ok((params, body))
        })
    }

    /// `( a, b = 1, ...rest )`
    pub(crate) fn parse_formal_parameters(&mut self) -> JsResult<FormalParameters> {
        let ws_open = self.expect("(")?;
        let mut items = Vec::new();
        let mut separators = Vec::new();
        while !self.matches(")") {
            if self.matches("...") {
                let rest = self.parse_binding_rest(messages::STRICT_PARAM_NAME, ")", messages::PARAMETER_AFTER_REST)?;
                items.push(Pattern::Rest(rest));
                break;
            }
            items.push(self.parse_binding_element(messages::STRICT_PARAM_NAME)?);
            if !self.matches(")") {
                separators.push(self.expect_separator()?);
            }
        }
        let ws_close = self.expect(")")?;
        Ok(FormalParameters {
            ws_open,
            items,
            separators,
            ws_close,
        })
    }

    /// `{ directives statements }`; also reports whether the body opts into
    /// strict mode.
    pub(crate) fn parse_function_source_elements(&mut self) -> JsResult<(FunctionBody, bool)> {
        let marker = self.start_node();
        let ws_open = self.expect("{")?;
        let mut body = self.parse_directive_prologue()?;
        let has_use_strict = body.iter().any(is_use_strict);
        while !self.matches("}") && !self.lookahead.is_eof() {
            body.push(self.parse_statement_list_item()?);
        }
        let ws_close = self.expect("}")?;
        let span = self.finalize(marker, NodeKind::BlockStatement);
        Ok((
            FunctionBody {
                ws_open,
                body,
                ws_close,
                span,
            },
            has_use_strict,
        ))
    }

    /// Parameters and body of an object or class method; the caller owns
    /// the key and any prefix.
    pub(crate) fn parse_method_function(
        &mut self,
        is_async: bool,
        generator: bool,
        kind: PropertyKind,
    ) -> JsResult<Function> {
        let marker = self.start_node();
        let site = marker.site();
        let (params, body) = self.parse_function_params_and_body(is_async, generator, None, site, true)?;
        match kind {
            PropertyKind::Get if !params.items.is_empty() => {
                self.tolerate_site(site, messages::BAD_GETTER_ARITY)?;
            }
            PropertyKind::Set if params.items.len() != 1 => {
                self.tolerate_site(site, messages::BAD_SETTER_ARITY)?;
            }
            PropertyKind::Set if matches!(params.items[0], Pattern::Rest(_)) => {
                self.tolerate_site(site, messages::BAD_SETTER_REST_PARAMETER)?;
            }
            _ => {}
        }
        let span = self.finalize(marker, NodeKind::FunctionExpression);
        Ok(Function {
            is_async,
            ws_async: String::new(),
            ws_keyword: String::new(),
            generator,
            ws_star: String::new(),
            id: None,
            params,
            body,
            span,
        })
    }

    // ==================== Classes ====================

    /// Class declaration (named) or expression.
    pub(crate) fn parse_class(&mut self, declaration: bool) -> JsResult<Class> {
        self.parse_class_with(declaration, declaration)
    }

    /// Class whose name is required only when `id_required` holds, as in
    /// `export default class {}`.
    pub(crate) fn parse_class_with(&mut self, declaration: bool, id_required: bool) -> JsResult<Class> {
        let marker = self.start_node();
        let ws_before = self.expect_keyword("class")?;
        let saved_strict = self.context.strict;
        self.context.strict = true;
        let result = self.parse_class_tail(id_required);
        self.context.strict = saved_strict;
        let (id, super_class, ws_open, body, ws_close) = result?;
        let kind = if declaration {
            NodeKind::ClassDeclaration
        } else {
            NodeKind::ClassExpression
        };
        let span = self.finalize(marker, kind);
        Ok(Class {
            ws_before,
            id,
            super_class,
            ws_open,
            body,
            ws_close,
            span,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_class_tail(
        &mut self,
        id_required: bool,
    ) -> JsResult<(Option<Identifier>, Option<Heritage>, String, Vec<ClassElement>, String)> {
        let id = if self.lookahead.kind == TokenKind::Identifier {
            Some(self.parse_binding_identifier(messages::STRICT_VAR_NAME)?)
        } else if id_required {
            return Err(self.unexpected(&self.lookahead));
        } else {
            None
        };
        let super_class = if self.matches_keyword("extends") {
            let ws_extends = self.next_token()?.ws_before.to_string();
            let expression = self.parse_left_hand_side_expression_allow_call()?;
            self.reject_cover(&expression)?;
            Some(Heritage {
                ws_extends,
                expression: Box::new(expression),
            })
        } else {
            None
        };
        let ws_open = self.expect("{")?;
        let mut body = Vec::new();
        let mut has_constructor = false;
        while !self.matches("}") {
            if self.lookahead.is_eof() {
                return Err(self.unexpected(&self.lookahead));
            }
            body.push(self.parse_class_element(&mut has_constructor)?);
        }
        let ws_close = self.expect("}")?;
        Ok((id, super_class, ws_open, body, ws_close))
    }

    fn parse_class_element(&mut self, has_constructor: &mut bool) -> JsResult<ClassElement> {
        let marker = self.start_node();
        if self.matches(";") {
            let ws_before = self.next_token()?.ws_before.to_string();
            let span = self.span_between(marker, self.last_end);
            return Ok(ClassElement::Empty { ws_before, span });
        }

        let mut prefix = MethodPrefix::default();
        if self.matches_contextual("static") && self.is_modifier(false)? {
            let token = self.next_token()?;
            if self.matches("{") {
                return self.parse_static_block(marker, token.ws_before.to_string());
            }
            prefix.ws_static = Some(token.ws_before.to_string());
        }
        let mut kind = MethodKind::Method;
        if self.matches_contextual("async") && self.is_modifier(true)? {
            prefix.ws_async = Some(self.next_token()?.ws_before.to_string());
        } else if (self.matches_contextual("get") || self.matches_contextual("set")) && self.is_modifier(false)? {
            let token = self.next_token()?;
            kind = if token.raw == "get" {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            prefix.ws_accessor = Some(token.ws_before.to_string());
        }
        if self.matches("*") {
            prefix.ws_star = Some(self.next_token()?.ws_before.to_string());
        }

        let key_site = Self::token_site(&self.lookahead);
        let key = self.parse_property_key(true)?;
        let is_static = prefix.ws_static.is_some();
        let is_async = prefix.ws_async.is_some();
        let generator = prefix.ws_star.is_some();
        let key_name = match &key {
            PropertyKey::Computed { .. } | PropertyKey::Private(_) => None,
            other => other.static_name(),
        };
        if is_static && key_name.as_deref() == Some("prototype") {
            return Err(self.error_at_site(key_site, ErrorKind::Grammar, messages::STATIC_PROTOTYPE));
        }

        if !self.matches("(") && !is_async && !generator && kind == MethodKind::Method {
            if key_name.as_deref() == Some("constructor") {
                return Err(self.error_at_site(key_site, ErrorKind::Grammar, messages::CONSTRUCTOR_FIELD));
            }
            return self.parse_field_definition(marker, prefix, key);
        }

        if !is_static && key_name.as_deref() == Some("constructor") {
            if kind != MethodKind::Method || is_async || generator {
                return Err(self.error_at_site(key_site, ErrorKind::Grammar, messages::CONSTRUCTOR_SPECIAL_METHOD));
            }
            if *has_constructor {
                return Err(self.error_at_site(key_site, ErrorKind::Grammar, messages::DUPLICATE_CONSTRUCTOR));
            }
            *has_constructor = true;
            kind = MethodKind::Constructor;
        }
        let accessor = match kind {
            MethodKind::Get => PropertyKind::Get,
            MethodKind::Set => PropertyKind::Set,
            _ => PropertyKind::Init,
        };
        let value = self.parse_method_function(is_async, generator, accessor)?;
        let span = self.finalize(marker, NodeKind::MethodDefinition);
        Ok(ClassElement::Method(MethodDefinition {
            prefix,
            kind,
            key,
            value,
            span,
        }))
    }

    fn parse_field_definition(
        &mut self,
        marker: super::Marker,
        prefix: MethodPrefix,
        key: PropertyKey,
    ) -> JsResult<ClassElement> {
        let value = if self.matches("=") {
            let ws_eq = self.next_token()?.ws_before.to_string();
            let context = Context {
                allow_in: true,
                allow_yield: false,
                is_async: false,
                in_parameters: false,
                cover_initialized_name: None,
                ..self.context.clone()
            };
            let value = self.with_context(context, |p| p.parse_assignment_expression())?;
            Some(Initializer { ws_eq, value })
        } else {
            None
        };
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::PropertyDefinition);
        Ok(ClassElement::Property(PropertyDefinition {
            prefix,
            key,
            value,
            semicolon,
            span,
        }))
    }

    fn parse_static_block(&mut self, marker: super::Marker, ws_before: String) -> JsResult<ClassElement> {
        let ws_open = self.expect("{")?;
        let context = Context {
            allow_in: true,
            allow_yield: false,
            is_async: false,
            in_function_body: false,
            in_iteration: false,
            in_switch: false,
            in_parameters: false,
            labels: Vec::new(),
            cover_initialized_name: None,
            ..self.context.clone()
        };
        let body = self.with_context(context, |p| {
            let mut body = Vec::new();
            while !p.matches("}") && !p.lookahead.is_eof() {
                body.push(p.parse_statement_list_item()?);
            }
            Ok(body)
        })?;
        let ws_close = self.expect("}")?;
        let span = self.finalize(marker, NodeKind::StaticBlock);
        Ok(ClassElement::StaticBlock(StaticBlock {
            ws_before,
            ws_open,
            body,
            ws_close,
            span,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::messages;
    use crate::options::ParseOptions;
    use crate::parser::parse_script;
    use crate::unparse::Unparse;

    fn error(source: &str) -> String {
        parse_script(source, &ParseOptions::default()).unwrap_err().message
    }

    #[test]
    fn test_function_round_trip() {
        let source = "async  function * gen ( a , b = 1 , ...c ) { yield a ; }";
        let output = parse_script(source, &ParseOptions::default()).unwrap();
        assert_eq!(output.program.unparse(), source);
    }

    #[test]
    fn test_yield_is_identifier_outside_generators() {
        assert!(parse_script("function f() { var yield = 1; }", &ParseOptions::default()).is_ok());
        assert_eq!(error("function* f() { var yield = 1; }"), messages::UNEXPECTED_IDENTIFIER);
    }

    #[test]
    fn test_use_strict_revalidates_function_name() {
        assert_eq!(error("function eval() { 'use strict'; }"), messages::STRICT_FUNCTION_NAME);
        assert_eq!(error("function f(a, a) { 'use strict'; }"), messages::STRICT_PARAM_DUPE);
        assert_eq!(error("function f(a = 1) { 'use strict'; }"), messages::ILLEGAL_USE_STRICT);
    }

    #[test]
    fn test_class_members() {
        let source = "class A extends B {\n  static #count = 0;\n  get x() { return 1 }\n  set x(v) {}\n  static { A.ready = true; }\n  async *items() {}\n  field\n  constructor() { super(); }\n}";
        let output = parse_script(source, &ParseOptions::default()).unwrap();
        assert_eq!(output.program.unparse(), source);
        let Statement::Class(class) = &output.program.body[0] else {
            panic!("expected class");
        };
        assert_eq!(class.body.len(), 7);
        assert!(matches!(class.body[3], ClassElement::StaticBlock(_)));
        assert!(matches!(
            class.body[6],
            ClassElement::Method(MethodDefinition {
                kind: MethodKind::Constructor,
                ..
            })
        ));
    }

    #[test]
    fn test_class_constructor_rules() {
        assert_eq!(error("class A { constructor() {} constructor() {} }"), messages::DUPLICATE_CONSTRUCTOR);
        assert_eq!(error("class A { get constructor() {} }"), messages::CONSTRUCTOR_SPECIAL_METHOD);
        assert_eq!(error("class A { static prototype() {} }"), messages::STATIC_PROTOTYPE);
    }

    #[test]
    fn test_accessor_arity() {
        assert_eq!(error("({ get a(x) {} })"), messages::BAD_GETTER_ARITY);
        assert_eq!(error("({ set a() {} })"), messages::BAD_SETTER_ARITY);
    }

    #[test]
    fn test_class_body_is_strict() {
        assert_eq!(error("class A { m() { with (a) {} } }"), messages::STRICT_MODE_WITH);
    }
}
