//! # Operator Parsing
//!
//! Parses assignment, ternary, binary and prefix operators using precedence
//! climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | = += -= *= /= %= | Right |
//! | 2 | ?: (ternary) | Right |
//! | 3 | \|\| | Left |
//! | 4 | && | Left |
//! | 5 | == != | Left |
//! | 6 | < > <= >= | Left |
//! | 7 | + - | Left |
//! | 8 | * / % | Left |
//! | 9 | ! - + ++ -- (prefix), (Type) cast | Right |
//!
//! Operators are wrapped in a [`NodeKind::BinaryOp`] or
//! [`NodeKind::AssignmentOperator`] node holding the single operator token.
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_binary(Precedence::Or)?;
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Binary operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Logical or: `||`
    Or = 1,
    /// Logical and: `&&`
    And = 2,
    /// Equality: `== !=`
    Equality = 3,
    /// Comparison: `< > <= >=`
    Comparison = 4,
    /// Addition/subtraction: `+ -`
    Term = 5,
    /// Multiplication/division: `* / %`
    Factor = 6,
}

impl Precedence {
    /// Get precedence for binary operator.
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PipePipe => Some(Self::Or),
            TokenKind::AmpAmp => Some(Self::And),
            TokenKind::EqEq | TokenKind::BangEq => Some(Self::Equality),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Some(Self::Comparison),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(Self::Factor),
            _ => None,
        }
    }

    /// Get next higher precedence level.
    ///
    /// Used for left-associative operators.
    pub(super) fn next(&self) -> Option<Self> {
        match self {
            Self::Or => Some(Self::And),
            Self::And => Some(Self::Equality),
            Self::Equality => Some(Self::Comparison),
            Self::Comparison => Some(Self::Term),
            Self::Term => Some(Self::Factor),
            Self::Factor => None,
        }
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl Parser {
    /// Parse `target op value` or fall through to a ternary.
    pub(super) fn parse_assignment(&mut self) -> Result<CstNode, ParseError> {
        let target = self.parse_ternary()?;
        if !self.peek_kind().is_assignment_operator() {
            return Ok(target);
        }

        let mut children = vec![target];
        self.trivia(&mut children);
        let mut op = Vec::new();
        self.bump(&mut op);
        children.push(self.node(NodeKind::AssignmentOperator, op));
        self.trivia(&mut children);
        children.push(self.parse_expression()?);
        Ok(self.node(NodeKind::AssignmentExpr, children))
    }

    /// Parse `cond ? a : b`.
    fn parse_ternary(&mut self) -> Result<CstNode, ParseError> {
        let condition = self.parse_binary(Precedence::Or)?;
        if !self.check(TokenKind::Question) {
            return Ok(condition);
        }

        let mut children = vec![condition];
        self.bump(&mut children); // ?
        self.trivia(&mut children);
        children.push(self.nested(|p| p.parse_ternary())?);
        self.expect(TokenKind::Colon, &mut children)?;
        self.trivia(&mut children);
        children.push(self.nested(|p| p.parse_ternary())?);
        Ok(self.node(NodeKind::TernaryExpr, children))
    }

    /// Parse left-associative binary operators at or above `min_prec`.
    ///
    /// Each operator wraps the tree built so far, so every link of the chain
    /// counts as one nesting level.
    pub(super) fn parse_binary(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        self.chain(|p| p.parse_binary_chain(min_prec))
    }

    fn parse_binary_chain(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        let mut left = self.parse_prefix()?;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }

            self.deepen()?;
            let mut children = vec![left];
            self.trivia(&mut children);
            let mut op = Vec::new();
            self.bump(&mut op);
            children.push(self.node(NodeKind::BinaryOp, op));
            self.trivia(&mut children);
            let right = match prec.next() {
                Some(next) => self.parse_binary(next)?,
                None => self.parse_prefix()?,
            };
            children.push(right);
            left = self.node(NodeKind::BinaryExpr, children);
        }

        Ok(left)
    }

    /// Parse prefix operators and casts.
    fn parse_prefix(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Bang | TokenKind::Minus | TokenKind::Plus | TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.nested(|p| {
                    let mut children = Vec::new();
                    p.bump(&mut children);
                    p.trivia(&mut children);
                    children.push(p.parse_prefix()?);
                    Ok(p.node(NodeKind::PrefixExpr, children))
                })
            }
            TokenKind::LParen if self.at_cast() => self.nested(|p| {
                let mut children = Vec::new();
                p.expect(TokenKind::LParen, &mut children)?;
                p.trivia(&mut children);
                children.push(p.parse_type()?);
                p.expect(TokenKind::RParen, &mut children)?;
                p.trivia(&mut children);
                children.push(p.parse_prefix()?);
                Ok(p.node(NodeKind::CastExpr, children))
            }),
            _ => self.parse_postfix(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
