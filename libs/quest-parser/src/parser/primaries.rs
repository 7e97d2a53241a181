//! # Primary Expression Parsing
//!
//! Parses literals, names, parenthesized expressions, `new` creators and
//! unqualified invocations.
//!
//! ## Grammar
//!
//! ```text
//! primary   = NUMBER | STRING | "true" | "false" | "null"
//!           | IDENT arguments            (function invocation)
//!           | IDENT
//!           | "(" expression ")"
//!           | creator
//! creator   = "new" type (arguments | ("[" expression? "]")+ arrayInit? | arrayInit)
//! arrayInit = "{" (expression ("," expression)*)? "}"
//! arguments = "(" (expression ("," expression)*)? ")"
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a primary expression.
    pub(super) fn parse_primary(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();

        match self.peek_kind() {
            TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null => {
                self.bump(&mut children);
            }
            TokenKind::String => self.expect_string(&mut children)?,
            TokenKind::Identifier => {
                self.bump(&mut children);
                if self.check(TokenKind::LParen) {
                    self.trivia(&mut children);
                    children.push(self.parse_arguments()?);
                    return Ok(self.node(NodeKind::FunctionInvoke, children));
                }
            }
            TokenKind::LParen => {
                self.bump(&mut children);
                self.trivia(&mut children);
                children.push(self.parse_expression()?);
                self.expect(TokenKind::RParen, &mut children)?;
            }
            TokenKind::New => self.parse_creator(&mut children)?,
            _ => return Err(self.unexpected("expression")),
        }

        Ok(self.node(NodeKind::Primary, children))
    }

    /// Parse `(a, b)`.
    pub(super) fn parse_arguments(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::LParen, &mut children)?;
        if !self.check(TokenKind::RParen) {
            self.parse_expression_list(&mut children)?;
        }
        self.expect(TokenKind::RParen, &mut children)?;
        Ok(self.node(NodeKind::Arguments, children))
    }

    /// Parse `new Type(args)`, `new Type[n]` or `new Type[]{...}` into `out`.
    fn parse_creator(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        self.expect(TokenKind::New, out)?;
        self.trivia(out);
        out.push(self.parse_type()?);

        match self.peek_kind() {
            TokenKind::LParen => {
                self.trivia(out);
                out.push(self.parse_arguments()?);
            }
            TokenKind::LBracket => {
                while self.eat(TokenKind::LBracket, out) {
                    if !self.check(TokenKind::RBracket) {
                        self.trivia(out);
                        out.push(self.parse_expression()?);
                    }
                    self.expect(TokenKind::RBracket, out)?;
                }
                if self.check(TokenKind::LBrace) {
                    self.parse_array_initializer(out)?;
                }
            }
            TokenKind::LBrace => self.parse_array_initializer(out)?,
            _ => return Err(self.unexpected("(")),
        }
        Ok(())
    }

    /// Parse `{a, b}` into `out`.
    fn parse_array_initializer(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        self.expect(TokenKind::LBrace, out)?;
        if !self.check(TokenKind::RBrace) {
            self.parse_expression_list(out)?;
        }
        self.expect(TokenKind::RBrace, out)
    }
}

// =============================================================================
// TESTS
// =============================================================================
