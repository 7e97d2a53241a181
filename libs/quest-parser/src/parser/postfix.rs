//! # Postfix Expression Parsing
//!
//! Parses suffixes applied to a primary: method invocation, field access,
//! array access and `++`/`--`.
//!
//! ## Example
//!
//! ```text
//! user.getName()
//! order.items[0]
//! request.header.token
//! counter++
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse postfix expressions.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// postfix = primary ("." IDENT arguments? | "[" expr "]" | "++" | "--")*
    /// ```
    pub(super) fn parse_postfix(&mut self) -> Result<CstNode, ParseError> {
        self.chain(|p| p.parse_postfix_chain())
    }

    fn parse_postfix_chain(&mut self) -> Result<CstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if matches!(
                self.peek_kind(),
                TokenKind::Dot | TokenKind::LBracket | TokenKind::PlusPlus | TokenKind::MinusMinus
            ) {
                self.deepen()?;
            }
            expr = match self.peek_kind() {
                TokenKind::Dot => self.parse_member(expr)?,
                TokenKind::LBracket => self.parse_array_access(expr)?,
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let mut children = vec![expr];
                    self.bump(&mut children);
                    self.node(NodeKind::PostfixExpr, children)
                }
                _ => break,
            };
        }

        Ok(expr)
    }

    /// Parse `.name(args)` (method invocation) or `.name` (field access).
    fn parse_member(&mut self, receiver: CstNode) -> Result<CstNode, ParseError> {
        let mut children = vec![receiver];
        self.expect(TokenKind::Dot, &mut children)?;
        if !self.check(TokenKind::Identifier) {
            return Err(self.unexpected("member name"));
        }
        self.bump(&mut children);

        if self.check(TokenKind::LParen) {
            self.trivia(&mut children);
            children.push(self.parse_arguments()?);
            Ok(self.node(NodeKind::MethodInvoke, children))
        } else {
            Ok(self.node(NodeKind::Primary, children))
        }
    }

    /// Parse `base[index]`.
    fn parse_array_access(&mut self, base: CstNode) -> Result<CstNode, ParseError> {
        let mut children = vec![base];
        self.expect(TokenKind::LBracket, &mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_expression()?);
        self.expect(TokenKind::RBracket, &mut children)?;
        Ok(self.node(NodeKind::ArrayAccessExpr, children))
    }
}

// =============================================================================
// TESTS
// =============================================================================
