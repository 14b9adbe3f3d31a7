//! `import` and `export` declarations.

use super::Parser;
use crate::ast::*;
use crate::error::messages;
use crate::token::TokenKind;
use core_types::JsResult;

impl<'a> Parser<'a> {
    /// Top-level item of a module.
    pub(crate) fn parse_module_item(&mut self) -> JsResult<Statement> {
        if self.matches_keyword("import") {
            let next = self.peek_token()?;
            if !(next.is_punctuator("(") || next.is_punctuator(".")) {
                return Ok(Statement::Import(self.parse_import_declaration()?));
            }
        } else if self.matches_keyword("export") {
            return self.parse_export_declaration();
        }
        self.parse_statement_list_item()
    }

    /// Quoted module specifier.
    fn parse_module_specifier(&mut self) -> JsResult<Literal> {
        if self.lookahead.kind != TokenKind::StringLiteral {
            return Err(self.unexpected(&self.lookahead));
        }
        self.parse_literal()
    }

    /// `name` or `"string name"` on either side of `as`.
    fn parse_module_export_name(&mut self) -> JsResult<ModuleExportName> {
        if self.lookahead.kind == TokenKind::StringLiteral {
            return Ok(ModuleExportName::String(self.parse_literal()?));
        }
        let marker = self.start_node();
        match self.lookahead.kind {
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::BooleanLiteral | TokenKind::NullLiteral => {
                let token = self.next_token()?;
                Ok(ModuleExportName::Identifier(self.finish_identifier(marker, &token)))
            }
            _ => Err(self.unexpected(&self.lookahead)),
        }
    }

    // ==================== import ====================

    fn parse_import_declaration(&mut self) -> JsResult<ImportDeclaration> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();
        let (clause, ws_from) = if self.lookahead.kind == TokenKind::StringLiteral {
            (None, String::new())
        } else {
            let clause = self.parse_import_clause()?;
            if !self.matches_contextual("from") {
                return Err(self.error_at(&self.lookahead, core_types::ErrorKind::Grammar, messages::MISSING_FROM_CLAUSE));
            }
            (Some(clause), self.next_token()?.ws_before.to_string())
        };
        let source = self.parse_module_specifier()?;
        let semicolon = self.consume_semicolon()?;
        let span = self.finalize(marker, NodeKind::ImportDeclaration);
        Ok(ImportDeclaration {
            ws_before,
            clause,
            ws_from,
            source,
            semicolon,
            span,
        })
    }

    fn parse_import_clause(&mut self) -> JsResult<ImportClause> {
        let mut clause = ImportClause {
            default: None,
            ws_comma: String::new(),
            namespace: None,
            named: None,
        };
        if self.lookahead.kind == TokenKind::Identifier {
            clause.default = Some(self.parse_binding_identifier(messages::STRICT_VAR_NAME)?);
            if !self.matches(",") {
                return Ok(clause);
            }
            clause.ws_comma = self.next_token()?.ws_before.to_string();
        }
        if self.matches("*") {
            let marker = self.start_node();
            let ws_star = self.next_token()?.ws_before.to_string();
            let ws_as = self.expect_contextual("as")?;
            let local = self.parse_binding_identifier(messages::STRICT_VAR_NAME)?;
            let span = self.finalize(marker, NodeKind::ImportNamespaceSpecifier);
            clause.namespace = Some(NamespaceImport {
                ws_star,
                ws_as,
                local,
                span,
            });
        } else if self.matches("{") {
            clause.named = Some(self.parse_named_imports()?);
        } else {
            return Err(self.unexpected(&self.lookahead));
        }
        Ok(clause)
    }

    fn parse_named_imports(&mut self) -> JsResult<NamedImports> {
        let ws_open = self.expect("{")?;
        let mut specifiers = Vec::new();
        let mut separators = Vec::new();
        while !self.matches("}") {
            specifiers.push(self.parse_import_specifier()?);
            if !self.matches("}") {
                separators.push(self.expect_separator()?);
            }
        }
        let ws_close = self.expect("}")?;
        Ok(NamedImports {
            ws_open,
            specifiers,
            separators,
            ws_close,
        })
    }

    /// `name`, `name as local` or `"string" as local`.
    fn parse_import_specifier(&mut self) -> JsResult<ImportSpecifier> {
        let marker = self.start_node();
        let start = self.lookahead.clone();
        let imported = self.parse_module_export_name()?;
        let alias = if self.matches_contextual("as") {
            let ws_as = self.next_token()?.ws_before.to_string();
            let local = self.parse_binding_identifier(messages::STRICT_VAR_NAME)?;
            Some(ImportAlias { ws_as, local })
        } else {
            // Without `as` the imported name is also the local binding.
            if start.kind != TokenKind::Identifier {
                return Err(self.unexpected(&start));
            }
            self.validate_identifier_reference(&start)?;
            None
        };
        let span = self.finalize(marker, NodeKind::ImportSpecifier);
        Ok(ImportSpecifier {
            imported,
            alias,
            span,
        })
    }

    // ==================== export ====================

    fn parse_export_declaration(&mut self) -> JsResult<Statement> {
        let marker = self.start_node();
        let ws_before = self.next_token()?.ws_before.to_string();

        if self.matches_keyword("default") {
            let ws_default = self.next_token()?.ws_before.to_string();
            let declaration = if self.matches_keyword("function")
                || (self.matches_contextual("async") && self.is_async_function()?)
            {
                ExportDefaultKind::Function(Box::new(self.parse_function_declaration(true)?))
            } else if self.matches_keyword("class") {
                ExportDefaultKind::Class(Box::new(self.parse_class_with(true, false)?))
            } else {
                let expression = self.parse_assignment_expression()?;
                let semicolon = self.consume_semicolon()?;
                ExportDefaultKind::Expression {
                    expression,
                    semicolon,
                }
            };
            let span = self.finalize(marker, NodeKind::ExportDefaultDeclaration);
            return Ok(Statement::ExportDefault(ExportDefaultDeclaration {
                ws_before,
                ws_default,
                declaration,
                span,
            }));
        }

        if self.matches("*") {
            let ws_star = self.next_token()?.ws_before.to_string();
            let exported = if self.matches_contextual("as") {
                let ws_as = self.next_token()?.ws_before.to_string();
                let exported = self.parse_module_export_name()?;
                Some(ExportAlias { ws_as, exported })
            } else {
                None
            };
            if !self.matches_contextual("from") {
                return Err(self.error_at(&self.lookahead, core_types::ErrorKind::Grammar, messages::MISSING_FROM_CLAUSE));
            }
            let ws_from = self.next_token()?.ws_before.to_string();
            let source = self.parse_module_specifier()?;
            let semicolon = self.consume_semicolon()?;
            let span = self.finalize(marker, NodeKind::ExportAllDeclaration);
            return Ok(Statement::ExportAll(ExportAllDeclaration {
                ws_before,
                ws_star,
                exported,
                ws_from,
                source,
                semicolon,
                span,
            }));
        }

        if self.matches("{") {
            let (specifiers, local_tokens) = self.parse_named_exports()?;
            let source = if self.matches_contextual("from") {
                let ws_from = self.next_token()?.ws_before.to_string();
                Some(FromClause {
                    ws_from,
                    source: self.parse_module_specifier()?,
                })
            } else {
                // Local exports must name bindings of this module.
                for token in &local_tokens {
                    if token.kind != TokenKind::Identifier {
                        return Err(self.unexpected(token));
                    }
                }
                None
            };
            let semicolon = self.consume_semicolon()?;
            let span = self.finalize(marker, NodeKind::ExportNamedDeclaration);
            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                ws_before,
                declaration: None,
                specifiers: Some(specifiers),
                source,
                semicolon: Some(semicolon),
                span,
            }));
        }

        let kind = self.lookahead.kind;
        let declaration = match kind {
            TokenKind::Keyword if matches!(self.lookahead.raw, "var" | "const" | "function" | "class") => {
                self.parse_statement_list_item()?
            }
            TokenKind::Identifier if self.matches_contextual("let") => self.parse_statement_list_item()?,
            TokenKind::Identifier if self.matches_contextual("async") && self.is_async_function()? => {
                self.parse_statement_list_item()?
            }
            _ => return Err(self.unexpected(&self.lookahead)),
        };
        let span = self.finalize(marker, NodeKind::ExportNamedDeclaration);
        Ok(Statement::ExportNamed(ExportNamedDeclaration {
            ws_before,
            declaration: Some(Box::new(declaration)),
            specifiers: None,
            source: None,
            semicolon: None,
            span,
        }))
    }

    /// `{ a, b as c }`, with the tokens that opened each local name.
    fn parse_named_exports(&mut self) -> JsResult<(NamedExports, Vec<crate::token::Token<'a>>)> {
        let ws_open = self.expect("{")?;
        let mut specifiers = Vec::new();
        let mut separators = Vec::new();
        let mut local_tokens = Vec::new();
        while !self.matches("}") {
            let marker = self.start_node();
            local_tokens.push(self.lookahead.clone());
            let local = self.parse_module_export_name()?;
            let alias = if self.matches_contextual("as") {
                let ws_as = self.next_token()?.ws_before.to_string();
                let exported = self.parse_module_export_name()?;
                Some(ExportAlias { ws_as, exported })
            } else {
                None
            };
            let span = self.finalize(marker, NodeKind::ExportSpecifier);
            specifiers.push(ExportSpecifier { local, alias, span });
            if !self.matches("}") {
                separators.push(self.expect_separator()?);
            }
        }
        let ws_close = self.expect("}")?;
        Ok((
            NamedExports {
                ws_open,
                specifiers,
                separators,
                ws_close,
            },
            local_tokens,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::messages;
    use crate::options::ParseOptions;
    use crate::parser::{parse_module, parse_script};
    use crate::unparse::Unparse;

    fn module(source: &str) -> Program {
        parse_module(source, &ParseOptions::default()).unwrap().program
    }

    #[test]
    fn test_import_forms_round_trip() {
        let source = "import a, { b as c, \"d-e\" as f, } from './x.js';\nimport * as ns from \"y\"\nimport 'side-effect';\nimport g, * as h from 'z';";
        let program = module(source);
        assert_eq!(program.body.len(), 4);
        assert_eq!(program.unparse(), source);
    }

    #[test]
    fn test_export_forms_round_trip() {
        let source = "export const a = 1;\nexport { a as b, c };\nexport * from 'm';\nexport * as ns from 'm';\nexport { x as \"y z\" } from 'n';\nexport default class {}\nexport function f() {}\nexport async function g() {}";
        assert_eq!(module(source).unparse(), source);
    }

    #[test]
    fn test_export_default_expression() {
        let program = module("export default a + b;");
        let Statement::ExportDefault(export) = &program.body[0] else {
            panic!("expected export default");
        };
        assert!(matches!(export.declaration, ExportDefaultKind::Expression { .. }));
    }

    #[test]
    fn test_import_in_script_is_error() {
        let error = parse_script("import a from 'b';", &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, messages::ILLEGAL_IMPORT_DECLARATION);
        let error = parse_script("export const a = 1;", &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, messages::ILLEGAL_EXPORT_DECLARATION);
        assert!(parse_script("import('./lazy.js');", &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_import_meta_needs_module() {
        assert!(parse_module("import.meta.url;", &ParseOptions::default()).is_ok());
        let error = parse_script("import.meta;", &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, messages::IMPORT_META_OUTSIDE_MODULE);
    }

    #[test]
    fn test_local_export_of_string_name_is_error() {
        assert!(parse_module("export { 'a' };", &ParseOptions::default()).is_err());
        assert!(parse_module("export { 'a' } from 'b';", &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_from_clause() {
        let error = parse_module("import { a } 'b';", &ParseOptions::default()).unwrap_err();
        assert_eq!(error.message, messages::MISSING_FROM_CLAUSE);
    }
}
