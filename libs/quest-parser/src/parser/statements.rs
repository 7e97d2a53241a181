//! # Statement Parsing
//!
//! Parses blocks and the statements that appear inside them.
//!
//! ## Grammar
//!
//! ```text
//! block      = "{" statement* "}"
//! statement  = block | variable | if | for | while | return | expression
//! variable   = type declarator ("," declarator)* ";"
//! declarator = IDENT ("=" expression)?
//! expression = expr ";" | ";"
//! ```

use super::{is_item_start, Parser};
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a `{ ... }` block, recovering from statement errors.
    pub(super) fn parse_block(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::LBrace, &mut children)?;

        loop {
            self.trivia(&mut children);
            match self.peek_kind() {
                TokenKind::RBrace | TokenKind::Eof => break,
                kind if is_item_start(kind) => break,
                _ => {}
            }

            match self.parse_statement() {
                Ok(node) => children.push(node),
                Err(error) => {
                    self.report(error);
                    self.synchronize(&mut children);
                }
            }
        }

        self.expect(TokenKind::RBrace, &mut children)?;
        Ok(self.node(NodeKind::Block, children))
    }

    /// Parse a single statement.
    pub(super) fn parse_statement(&mut self) -> Result<CstNode, ParseError> {
        self.nested(|p| match p.peek_kind() {
            TokenKind::LBrace => p.parse_block(),
            TokenKind::If => p.parse_if(),
            TokenKind::For => p.parse_for(),
            TokenKind::While => p.parse_while(),
            TokenKind::Return => p.parse_return(),
            TokenKind::Identifier if p.at_declaration() => p.parse_variable(),
            _ => p.parse_expression_statement(),
        })
    }

    /// Parse `Type a = 1, b;`.
    fn parse_variable(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.parse_declarators(&mut children)?;
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.node(NodeKind::VariableStatement, children))
    }

    /// Parse `Type declarator ("," declarator)*` into `out`.
    ///
    /// Declarator tokens stay flat in the enclosing rule.
    pub(super) fn parse_declarators(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        out.push(self.parse_type()?);
        loop {
            if !self.check(TokenKind::Identifier) {
                return Err(self.unexpected("variable name"));
            }
            self.bump(out);
            if self.eat(TokenKind::Assign, out) {
                self.trivia(out);
                out.push(self.parse_expression()?);
            }
            if !self.eat(TokenKind::Comma, out) {
                return Ok(());
            }
        }
    }

    /// Parse `expr;` or an empty `;`.
    fn parse_expression_statement(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        if !self.check(TokenKind::Semi) {
            children.push(self.parse_expression()?);
        }
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.node(NodeKind::ExpressionStatement, children))
    }
}

// =============================================================================
// TESTS
// =============================================================================
