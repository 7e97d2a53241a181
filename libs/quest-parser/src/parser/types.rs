//! # Type Parsing
//!
//! Parses type references and the lookahead that separates declarations
//! from expressions.
//!
//! ## Grammar
//!
//! ```text
//! type     = IDENT ("." IDENT)* typeArgs? ("[" "]")*
//! typeArgs = "<" (typeArg ("," typeArg)*)? ">"
//! typeArg  = "?" | type
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a type reference into a single [`NodeKind::Type`] node.
    pub(super) fn parse_type(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.parse_type_into(&mut children)?;
        Ok(self.node(NodeKind::Type, children))
    }

    fn parse_type_into(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.unexpected("type"));
        }
        self.bump(out);

        while self.check(TokenKind::Dot) && self.peek_nth_kind(1) == TokenKind::Identifier {
            self.bump(out); // .
            self.bump(out); // name
        }

        if self.check(TokenKind::Lt) {
            self.nested(|p| p.parse_type_arguments(out))?;
        }

        while self.check(TokenKind::LBracket) && self.peek_nth_kind(1) == TokenKind::RBracket {
            self.bump(out); // [
            self.bump(out); // ]
        }

        Ok(())
    }

    /// Parse `<A, B>`, `<?>` or the diamond `<>`.
    fn parse_type_arguments(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        self.expect(TokenKind::Lt, out)?;
        if self.eat(TokenKind::Gt, out) {
            return Ok(());
        }
        loop {
            if !self.eat(TokenKind::Question, out) {
                self.parse_type_into(out)?;
            }
            if !self.eat(TokenKind::Comma, out) {
                break;
            }
        }
        self.expect(TokenKind::Gt, out)
    }

    /// True when the upcoming tokens read `Type name`.
    pub(super) fn at_declaration(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        let mut scratch = Vec::new();
        let found = self.parse_type_into(&mut scratch).is_ok() && self.check(TokenKind::Identifier);
        self.rewind(checkpoint);
        found
    }

    /// True when the upcoming tokens read `Type name :`.
    pub(super) fn at_for_each(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        let mut scratch = Vec::new();
        let found = self.parse_type_into(&mut scratch).is_ok()
            && self.eat(TokenKind::Identifier, &mut scratch)
            && self.check(TokenKind::Colon);
        self.rewind(checkpoint);
        found
    }

    /// True when the upcoming tokens read `(Type)` followed by an operand.
    pub(super) fn at_cast(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        let mut scratch = Vec::new();
        let found = self.eat(TokenKind::LParen, &mut scratch)
            && self.parse_type_into(&mut scratch).is_ok()
            && self.eat(TokenKind::RParen, &mut scratch)
            && starts_cast_operand(self.peek_kind());
        self.rewind(checkpoint);
        found
    }
}

/// Tokens that can begin the operand of a cast.
///
/// `+` and `-` are excluded so `(a) - b` stays a subtraction.
fn starts_cast_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::New
            | TokenKind::LParen
            | TokenKind::Bang
    )
}

// =============================================================================
// TESTS
// =============================================================================
