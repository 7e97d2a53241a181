//! # Expression Parsing
//!
//! Entry points for expressions. The precedence ladder lives in
//! `operators.rs`, member/index/increment suffixes in `postfix.rs` and
//! atoms in `primaries.rs`.
//!
//! ```text
//! expression = assignment
//! assignment = ternary (assignOp expression)?
//! ```

use super::Parser;
use crate::cst::CstNode;
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a full expression, one nesting level deeper.
    pub(super) fn parse_expression(&mut self) -> Result<CstNode, ParseError> {
        self.nested(|p| p.parse_assignment())
    }

    /// Parse `expr ("," expr)*` into `out`.
    pub(super) fn parse_expression_list(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        loop {
            self.trivia(out);
            out.push(self.parse_expression()?);
            if !self.eat(TokenKind::Comma, out) {
                return Ok(());
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use crate::cst::{CstNode, NodeKind};
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    pub(crate) fn expr(source: &str) -> CstNode {
        let mut parser = Parser::new(Lexer::new(source).tokenize());
        let node = parser.parse_expression().expect("expression");
        assert!(parser.is_at_end(), "trailing input in {source:?}");
        node
    }

    #[test]
    fn test_parse_assignment() {
        let node = expr("total = a + b");
        assert_eq!(node.kind, NodeKind::AssignmentExpr);
        let op = node.find_child(NodeKind::AssignmentOperator).expect("operator");
        assert_eq!(op.full_text(), "=");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let node = expr("a = b += c");
        assert_eq!(node.kind, NodeKind::AssignmentExpr);
        assert_eq!(node.children.last().expect("rhs").kind, NodeKind::AssignmentExpr);
    }

    #[test]
    fn test_expression_preserves_text() {
        let source = "user.getOrders().get(i)[0].amount * (rate + 1) > limit ? a : b";
        assert_eq!(expr(source).full_text(), source);
    }
}
