//! Recursive descent parser for the record-definition language

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::records::FieldType;

/// Recursive descent parser over the token stream
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete record file
    pub fn parse(&mut self) -> CompileResult<Vec<Item>> {
        let mut items = Vec::new();

        while !self.at_end() {
            items.push(self.parse_item()?);
        }

        Ok(items)
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> CompileResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(CompileError::parser(
                format!("expected {}, found {}", kind, self.current.kind),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<(String, Span)> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Identifier(name) => Ok((name, token.span)),
            other => Err(CompileError::parser(
                format!("expected identifier, found {}", other),
                token.span,
            )),
        }
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn parse_item(&mut self) -> CompileResult<Item> {
        match self.current.kind {
            TokenKind::Class => self.parse_class(),
            TokenKind::Def => self.parse_def(),
            _ => Err(CompileError::parser(
                format!("expected 'class' or 'def', found {}", self.current.kind),
                self.current.span,
            )),
        }
    }

    fn parse_class(&mut self) -> CompileResult<Item> {
        let start = self.expect(TokenKind::Class)?.span;
        let (name, _) = self.expect_identifier()?;
        let parents = self.parse_parent_list()?;

        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            fields.push(self.parse_field_decl()?);
        }
        let end = self.expect(TokenKind::RBrace)?.span;

        Ok(Item {
            kind: ItemKind::Class(ClassDecl { name, parents, fields }),
            span: start.merge(end),
        })
    }

    fn parse_def(&mut self) -> CompileResult<Item> {
        let start = self.expect(TokenKind::Def)?.span;
        let (name, _) = self.expect_identifier()?;
        let parents = self.parse_parent_list()?;

        let mut lets = Vec::new();
        let end;
        if self.check(&TokenKind::Semi) {
            // Body-less def: `def Plain : SSH;`
            end = self.advance()?.span;
        } else {
            self.expect(TokenKind::LBrace)?;
            while !self.check(&TokenKind::RBrace) && !self.at_end() {
                lets.push(self.parse_let()?);
            }
            end = self.expect(TokenKind::RBrace)?.span;
        }

        Ok(Item {
            kind: ItemKind::Def(DefDecl { name, parents, lets }),
            span: start.merge(end),
        })
    }

    /// `: Parent, Parent2, ...` or nothing
    fn parse_parent_list(&mut self) -> CompileResult<Vec<ParentRef>> {
        let mut parents = Vec::new();
        if self.match_token(&TokenKind::Colon)? {
            loop {
                let (name, span) = self.expect_identifier()?;
                parents.push(ParentRef { name, span });
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        Ok(parents)
    }

    // =========================================================================
    // Class bodies
    // =========================================================================

    fn parse_field_decl(&mut self) -> CompileResult<FieldDecl> {
        let start = self.current.span;
        let ty = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        let init = if self.match_token(&TokenKind::Eq)? {
            Some(self.parse_value()?)
        } else {
            None
        };

        let end = self.expect(TokenKind::Semi)?.span;
        Ok(FieldDecl {
            ty,
            name,
            init,
            span: start.merge(end),
        })
    }

    fn parse_type(&mut self) -> CompileResult<FieldType> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Int => Ok(FieldType::Int),
            TokenKind::String => Ok(FieldType::Str),
            TokenKind::List => {
                self.expect(TokenKind::Lt)?;
                self.expect(TokenKind::String)?;
                self.expect(TokenKind::Gt)?;
                Ok(FieldType::StrList)
            }
            other => Err(CompileError::parser(
                format!("expected field type, found {}", other),
                token.span,
            )),
        }
    }

    // =========================================================================
    // Def bodies
    // =========================================================================

    fn parse_let(&mut self) -> CompileResult<LetBinding> {
        let start = self.expect(TokenKind::Let)?.span;
        let (field, _) = self.expect_identifier()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_value()?;
        let end = self.expect(TokenKind::Semi)?.span;

        Ok(LetBinding {
            field,
            value,
            span: start.merge(end),
        })
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self) -> CompileResult<ValueExpr> {
        let span = self.current.span;
        match self.current.kind.clone() {
            TokenKind::IntLiteral(v) => {
                self.advance()?;
                Ok(ValueExpr {
                    kind: ValueKind::Int(v),
                    span,
                })
            }
            TokenKind::StringLiteral(s) => {
                self.advance()?;
                Ok(ValueExpr {
                    kind: ValueKind::Str(s),
                    span,
                })
            }
            TokenKind::LBracket => self.parse_list(),
            other => Err(CompileError::parser(
                format!("expected value, found {}", other),
                span,
            )),
        }
    }

    fn parse_list(&mut self) -> CompileResult<ValueExpr> {
        let start = self.expect(TokenKind::LBracket)?.span;
        let mut items = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.parse_value()?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        let end = self.expect(TokenKind::RBracket)?.span;

        Ok(ValueExpr {
            kind: ValueKind::List(items),
            span: start.merge(end),
        })
    }
}
