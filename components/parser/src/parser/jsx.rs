//! JSX elements, fragments and their children.
//!
//! The scanner keeps one token of lookahead, so every lexer mode switch
//! happens just before consuming the token that precedes the new region:
//! `>` of an opening tag switches to text, `{` switches to ordinary
//! tokens and the matching `}` switches back.

use super::{Marker, Parser};
use crate::ast::*;
use crate::error::messages;
use crate::scanner::LexMode;
use crate::token::TokenKind;
use core_types::{ErrorKind, JsResult};

enum JsxNode {
    Element(JsxElement),
    Fragment(JsxFragment),
}

impl<'a> Parser<'a> {
    /// Element or fragment in expression position; the lookahead is `<`.
    pub(crate) fn parse_jsx_root(&mut self) -> JsResult<Expression> {
        self.scanner.set_mode(LexMode::JsxTag);
        self.relex_lookahead()?;
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        Ok(match self.parse_jsx_after_open(marker, ws_before, LexMode::Normal)? {
            JsxNode::Element(element) => Expression::JsxElement(Box::new(element)),
            JsxNode::Fragment(fragment) => Expression::JsxFragment(Box::new(fragment)),
        })
    }

    /// Everything after an opening `<`. `after` is the lexer mode for the
    /// token that follows the final `>`.
    fn parse_jsx_after_open(&mut self, marker: Marker, ws_before: String, after: LexMode) -> JsResult<JsxNode> {
        self.jsx_depth += 1;
        log::trace!("jsx depth {}", self.jsx_depth);
        let result = if self.matches(">") {
            self.parse_jsx_fragment(marker, ws_before, after).map(JsxNode::Fragment)
        } else {
            self.parse_jsx_element(marker, ws_before, after).map(JsxNode::Element)
        };
        self.jsx_depth -= 1;
        result
    }

    fn parse_jsx_fragment(&mut self, marker: Marker, ws_before: String, after: LexMode) -> JsResult<JsxFragment> {
        self.scanner.set_mode(LexMode::JsxText);
        let ws_open_close = self.expect(">")?;
        let (children, _, ws_closing) = self.parse_jsx_children("")?;
        let ws_closing_slash = self.expect("/")?;
        if !self.matches(">") {
            return Err(self.error_at(&self.lookahead, ErrorKind::Jsx, messages::mismatched_closing_tag("<>")));
        }
        self.scanner.set_mode(after);
        let ws_closing_close = self.expect(">")?;
        let span = self.finalize(marker, NodeKind::JsxFragment);
        Ok(JsxFragment {
            ws_before,
            ws_open_close,
            children,
            ws_closing,
            ws_closing_slash,
            ws_closing_close,
            span,
        })
    }

    fn parse_jsx_element(&mut self, marker: Marker, ws_before: String, after: LexMode) -> JsResult<JsxElement> {
        let name = self.parse_jsx_element_name()?;
        let mut attributes = Vec::new();
        while !self.matches(">") && !self.matches("/") {
            attributes.push(self.parse_jsx_attribute()?);
        }

        if self.matches("/") {
            let self_closing = Some(self.next_token()?.ws_before.to_string());
            if !self.matches(">") {
                return Err(self.unexpected(&self.lookahead));
            }
            self.scanner.set_mode(after);
            let ws_close = self.expect(">")?;
            let span = self.finalize(marker, NodeKind::JsxOpeningElement);
            let opening = JsxOpeningElement {
                ws_before,
                name,
                attributes,
                self_closing,
                ws_close,
                span,
            };
            let span = self.finalize(marker, NodeKind::JsxElement);
            return Ok(JsxElement {
                opening,
                children: Vec::new(),
                closing: None,
                span,
            });
        }

        self.scanner.set_mode(LexMode::JsxText);
        let ws_close = self.expect(">")?;
        let span = self.finalize(marker, NodeKind::JsxOpeningElement);
        let opening = JsxOpeningElement {
            ws_before,
            name,
            attributes,
            self_closing: None,
            ws_close,
            span,
        };

        let open_name = opening.name.qualified_name();
        let (children, closing_marker, ws_closing) = self.parse_jsx_children(&open_name)?;
        let ws_slash = self.expect("/")?;
        let closing_token = self.lookahead.clone();
        let closing_name = self.parse_jsx_element_name()?;
        if closing_name.qualified_name() != open_name {
            return Err(self.error_at(&closing_token, ErrorKind::Jsx, messages::mismatched_closing_tag(&open_name)));
        }
        self.scanner.set_mode(after);
        let ws_close = self.expect(">")?;
        let span = self.finalize(closing_marker, NodeKind::JsxClosingElement);
        let closing = JsxClosingElement {
            ws_before: ws_closing,
            ws_slash,
            name: closing_name,
            ws_close,
            span,
        };
        let span = self.finalize(marker, NodeKind::JsxElement);
        Ok(JsxElement {
            opening,
            children,
            closing: Some(closing),
            span,
        })
    }

    /// Children up to and including the `<` of the closing tag, whose
    /// marker and leading trivia are returned alongside.
    fn parse_jsx_children(&mut self, open_name: &str) -> JsResult<(Vec<JsxChild>, Marker, String)> {
        let mut children = Vec::new();
        loop {
            let kind = self.lookahead.kind;
            match kind {
                TokenKind::Eof => {
                    return Err(self.error_at(&self.lookahead, ErrorKind::Jsx, messages::unterminated_jsx(open_name)));
                }
                TokenKind::JsxText => {
                    let marker = self.start_node();
                    let token = self.next_token()?;
                    let span = self.finalize(marker, NodeKind::JsxText);
                    children.push(JsxChild::Text(JsxText::from_parts(token.text(), token.raw, span)));
                }
                _ if self.matches("{") => children.push(self.parse_jsx_child_container()?),
                _ if self.matches("<") => {
                    self.scanner.set_mode(LexMode::JsxTag);
                    let marker = self.start_node();
                    let ws_before = self.next_token()?.ws_before.to_string();
                    if self.matches("/") {
                        return Ok((children, marker, ws_before));
                    }
                    children.push(match self.parse_jsx_after_open(marker, ws_before, LexMode::JsxText)? {
                        JsxNode::Element(element) => JsxChild::Element(Box::new(element)),
                        JsxNode::Fragment(fragment) => JsxChild::Fragment(Box::new(fragment)),
                    });
                }
                _ => return Err(self.unexpected(&self.lookahead)),
            }
        }
    }

    /// `{expression}`, `{...spread}` or `{}` between tags.
    fn parse_jsx_child_container(&mut self) -> JsResult<JsxChild> {
        self.scanner.set_mode(LexMode::Normal);
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        if self.matches("...") {
            let ws_dots = self.next_token()?.ws_before.to_string();
            let expression = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
            self.scanner.set_mode(LexMode::JsxText);
            let ws_close = self.expect("}")?;
            let span = self.finalize(marker, NodeKind::JsxSpreadChild);
            return Ok(JsxChild::Spread(JsxSpreadChild {
                ws_before,
                ws_dots,
                expression,
                ws_close,
                span,
            }));
        }
        let container = self.finish_jsx_container(marker, ws_before, LexMode::JsxText, true)?;
        Ok(JsxChild::Expression(container))
    }

    /// Rest of `{ ... }` once `{` is consumed; `}` is scanned before the
    /// switch to `after`.
    fn finish_jsx_container(
        &mut self,
        marker: Marker,
        ws_before: String,
        after: LexMode,
        allow_empty: bool,
    ) -> JsResult<JsxExpressionContainer> {
        let (expression, ws_close) = if self.matches("}") {
            if !allow_empty {
                return Err(self.unexpected(&self.lookahead));
            }
            let ws = self.lookahead.ws_before.to_string();
            let (start, end) = (self.last_end, self.start_node());
            let span = self.finalize_at(start, end, NodeKind::JsxEmptyExpression);
            self.scanner.set_mode(after);
            self.expect("}")?;
            (JsxExpression::Empty(JsxEmptyExpression { ws, span }), String::new())
        } else {
            let expression = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
            self.scanner.set_mode(after);
            let ws_close = self.expect("}")?;
            (JsxExpression::Expression(Box::new(expression)), ws_close)
        };
        let span = self.finalize(marker, NodeKind::JsxExpressionContainer);
        Ok(JsxExpressionContainer {
            ws_before,
            expression,
            ws_close,
            span,
        })
    }

    fn parse_jsx_identifier(&mut self) -> JsResult<JsxIdentifier> {
        if self.lookahead.kind != TokenKind::JsxIdentifier {
            return Err(self.unexpected(&self.lookahead));
        }
        let marker = self.start_node();
        let token = self.next_token()?;
        let span = self.finalize(marker, NodeKind::JsxIdentifier);
        Ok(JsxIdentifier {
            ws_before: token.ws_before.to_string(),
            name: token.raw.to_string(),
            span,
        })
    }

    /// `name`, `ns:name` or `a.b.c`.
    fn parse_jsx_element_name(&mut self) -> JsResult<JsxElementName> {
        let marker = self.start_node();
        let first = self.parse_jsx_identifier()?;
        if self.matches(":") {
            return Ok(JsxElementName::Namespaced(self.finish_jsx_namespaced_name(marker, first)?));
        }
        let mut name = JsxElementName::Identifier(first);
        while self.matches(".") {
            let ws_dot = self.next_token()?.ws_before.to_string();
            let property = self.parse_jsx_identifier()?;
            let span = self.finalize(marker, NodeKind::JsxMemberExpression);
            name = JsxElementName::Member(JsxMemberExpression {
                object: Box::new(name),
                ws_dot,
                property,
                span,
            });
        }
        Ok(name)
    }

    fn finish_jsx_namespaced_name(&mut self, marker: Marker, namespace: JsxIdentifier) -> JsResult<JsxNamespacedName> {
        let ws_colon = self.expect(":")?;
        let name = self.parse_jsx_identifier()?;
        let span = self.finalize(marker, NodeKind::JsxNamespacedName);
        Ok(JsxNamespacedName {
            namespace,
            ws_colon,
            name,
            span,
        })
    }

    fn parse_jsx_attribute(&mut self) -> JsResult<JsxAttributeItem> {
        let marker = self.start_node();
        if self.matches("{") {
            self.scanner.set_mode(LexMode::Normal);
            let ws_before = self.next_token()?.ws_before.to_string();
            let ws_dots = self.expect("...")?;
            let argument = self.with_allow_in(true, |p| p.parse_assignment_expression())?;
            self.scanner.set_mode(LexMode::JsxTag);
            let ws_close = self.expect("}")?;
            let span = self.finalize(marker, NodeKind::JsxSpreadAttribute);
            return Ok(JsxAttributeItem::Spread(JsxSpreadAttribute {
                ws_before,
                ws_dots,
                argument,
                ws_close,
                span,
            }));
        }

        let first = self.parse_jsx_identifier()?;
        let name = if self.matches(":") {
            JsxAttributeName::Namespaced(self.finish_jsx_namespaced_name(marker, first)?)
        } else {
            JsxAttributeName::Identifier(first)
        };
        let (ws_eq, value) = if self.matches("=") {
            let ws_eq = self.next_token()?.ws_before.to_string();
            (ws_eq, Some(self.parse_jsx_attribute_value()?))
        } else {
            (String::new(), None)
        };
        let span = self.finalize(marker, NodeKind::JsxAttribute);
        Ok(JsxAttributeItem::Attribute(JsxAttribute {
            name,
            ws_eq,
            value,
            span,
        }))
    }

    fn parse_jsx_attribute_value(&mut self) -> JsResult<JsxAttributeValue> {
        if self.lookahead.kind == TokenKind::StringLiteral {
            return Ok(JsxAttributeValue::String(self.parse_literal()?));
        }
        let marker = self.start_node();
        if self.matches("{") {
            self.scanner.set_mode(LexMode::Normal);
            let ws_before = self.next_token()?.ws_before.to_string();
            let container = self.finish_jsx_container(marker, ws_before, LexMode::JsxTag, false)?;
            return Ok(JsxAttributeValue::Expression(container));
        }
        if self.matches("<") {
            let ws_before = self.next_token()?.ws_before.to_string();
            return Ok(match self.parse_jsx_after_open(marker, ws_before, LexMode::JsxTag)? {
                JsxNode::Element(element) => JsxAttributeValue::Element(Box::new(element)),
                JsxNode::Fragment(fragment) => JsxAttributeValue::Fragment(Box::new(fragment)),
            });
        }
        Err(self.unexpected(&self.lookahead))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::messages;
    use crate::options::ParseOptions;
    use crate::parser::parse_script;
    use crate::unparse::Unparse;

    fn jsx(source: &str) -> Program {
        parse_script(source, &ParseOptions::default()).unwrap().program
    }

    fn root(program: &Program) -> &Expression {
        match &program.body[0] {
            Statement::Expression(stmt) => &stmt.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_element_round_trip() {
        let source = "x = <div  className=\"a\" {...rest} data-id={ id }>\n  Hello, {name}! &amp; bye\n  <br />\n</div>;";
        assert_eq!(jsx(source).unparse(), source);
    }

    #[test]
    fn test_fragment_and_member_names() {
        let source = "<><Foo.Bar.Baz /><svg:rect xlink:href='#a'/></>";
        let program = jsx(source);
        assert!(matches!(root(&program), Expression::JsxFragment(_)));
        assert_eq!(program.unparse(), source);
    }

    #[test]
    fn test_text_entities_decoded() {
        let program = jsx("<p>a &lt; b &#x41;</p>");
        let Expression::JsxElement(element) = root(&program) else {
            panic!("expected element");
        };
        let JsxChild::Text(text) = &element.children[0] else {
            panic!("expected text");
        };
        assert_eq!(text.value(), "a < b A");
        assert_eq!(text.raw(), "a &lt; b &#x41;");
    }

    #[test]
    fn test_empty_expression_keeps_comment() {
        let source = "<a>{/* note */}</a>";
        let program = jsx(source);
        let Expression::JsxElement(element) = root(&program) else {
            panic!("expected element");
        };
        let JsxChild::Expression(container) = &element.children[0] else {
            panic!("expected container");
        };
        let JsxExpression::Empty(empty) = &container.expression else {
            panic!("expected empty expression");
        };
        assert_eq!(empty.ws, "/* note */");
        assert_eq!(program.unparse(), source);
    }

    #[test]
    fn test_nested_element_in_attribute_and_spread_child() {
        let source = "<A render=<B /> >{...items}</A>";
        assert_eq!(jsx(source).unparse(), source);
    }

    #[test]
    fn test_code_after_element_is_ordinary() {
        let program = jsx("const el = <i>x</i>, n = 1 / 2;");
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let error = parse_script("<a></b>", &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, messages::mismatched_closing_tag("a"));
    }

    #[test]
    fn test_unterminated_element() {
        let error = parse_script("<a>text", &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, messages::unterminated_jsx("a"));
    }

    #[test]
    fn test_jsx_disabled() {
        let options = ParseOptions::default().with_jsx(false);
        let error = parse_script("<a/>", &options).unwrap_err();
        assert_eq!(error.message, messages::JSX_DISABLED);
    }
}
