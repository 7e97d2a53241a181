//! # Control Flow Parsing
//!
//! Parses `if`, `for`, `while` and `return` statements.
//!
//! ## Grammar
//!
//! ```text
//! if     = "if" "(" expr ")" statement ("else" statement)?
//! for    = "for" "(" (forInit? ";" forCondition? ";" forUpdate?
//!                    | forEachBinding ":" forIterable) ")" statement
//! while  = "while" "(" expr ")" statement
//! return = "return" expr? ";"
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse `if (cond) stmt else stmt`.
    pub(super) fn parse_if(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::If, &mut children)?;
        self.parse_condition(&mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_statement()?);

        if self.eat(TokenKind::Else, &mut children) {
            self.trivia(&mut children);
            children.push(self.parse_statement()?);
        }

        Ok(self.node(NodeKind::IfStatement, children))
    }

    /// Parse `while (cond) stmt`.
    pub(super) fn parse_while(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::While, &mut children)?;
        self.parse_condition(&mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_statement()?);
        Ok(self.node(NodeKind::WhileStatement, children))
    }

    /// Parse `return expr?;`.
    pub(super) fn parse_return(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::Return, &mut children)?;
        if !self.check(TokenKind::Semi) {
            self.trivia(&mut children);
            children.push(self.parse_expression()?);
        }
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.node(NodeKind::ReturnStatement, children))
    }

    /// Parse classic and enhanced `for` loops.
    pub(super) fn parse_for(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::For, &mut children)?;
        self.expect(TokenKind::LParen, &mut children)?;

        if self.at_for_each() {
            self.trivia(&mut children);
            let mut binding = Vec::new();
            binding.push(self.parse_type()?);
            self.expect(TokenKind::Identifier, &mut binding)?;
            children.push(self.node(NodeKind::ForEachBinding, binding));

            self.expect(TokenKind::Colon, &mut children)?;
            self.trivia(&mut children);
            let iterable = vec![self.parse_expression()?];
            children.push(self.node(NodeKind::ForIterable, iterable));
        } else {
            if !self.check(TokenKind::Semi) {
                self.trivia(&mut children);
                children.push(self.parse_for_init()?);
            }
            self.expect(TokenKind::Semi, &mut children)?;

            if !self.check(TokenKind::Semi) {
                self.trivia(&mut children);
                let condition = vec![self.parse_expression()?];
                children.push(self.node(NodeKind::ForCondition, condition));
            }
            self.expect(TokenKind::Semi, &mut children)?;

            if !self.check(TokenKind::RParen) {
                self.trivia(&mut children);
                let mut update = Vec::new();
                self.parse_expression_list(&mut update)?;
                children.push(self.node(NodeKind::ForUpdate, update));
            }
        }

        self.expect(TokenKind::RParen, &mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_statement()?);
        Ok(self.node(NodeKind::ForStatement, children))
    }

    /// Parse a for initializer: a declaration or an expression list.
    fn parse_for_init(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        if self.check(TokenKind::Identifier) && self.at_declaration() {
            self.parse_declarators(&mut children)?;
        } else {
            self.parse_expression_list(&mut children)?;
        }
        Ok(self.node(NodeKind::ForInit, children))
    }

    /// Parse `( expr )` into `out`.
    fn parse_condition(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        self.expect(TokenKind::LParen, out)?;
        self.trivia(out);
        out.push(self.parse_expression()?);
        self.expect(TokenKind::RParen, out)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn first_statement(source: &str) -> CstNode {
        let cst = parse(&format!("process p {{ {source} }}"));
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        let block = cst.root.children[0].find_child(NodeKind::Block).expect("block").clone();
        let statement = block
            .significant_children()
            .find(|c| !c.is_token())
            .expect("statement")
            .clone();
        statement
    }

    #[test]
    fn test_parse_if_else() {
        let node = first_statement("if (a > 1) { b(); } else if (c) d(); else { }");
        assert_eq!(node.kind, NodeKind::IfStatement);
        let statements: Vec<NodeKind> = node
            .significant_children()
            .filter(|c| c.kind.is_statement())
            .map(|c| c.kind)
            .collect();
        assert_eq!(statements, vec![NodeKind::Block, NodeKind::IfStatement]);
    }

    #[test]
    fn test_parse_classic_for() {
        let node = first_statement("for (int i = 0; i < n; i++) { sum += i; }");
        assert_eq!(node.kind, NodeKind::ForStatement);
        assert_eq!(node.find_child(NodeKind::ForInit).expect("init").full_text(), "int i = 0");
        assert_eq!(node.find_child(NodeKind::ForCondition).expect("cond").full_text(), "i < n");
        assert_eq!(node.find_child(NodeKind::ForUpdate).expect("update").full_text(), "i++");
    }

    #[test]
    fn test_parse_for_without_clauses() {
        let node = first_statement("for (;;) { }");
        assert!(node.find_child(NodeKind::ForInit).is_none());
        assert!(node.find_child(NodeKind::ForCondition).is_none());
        assert!(node.find_child(NodeKind::ForUpdate).is_none());
    }

    #[test]
    fn test_parse_for_each() {
        let node = first_statement("for (Order order : orders) { handle(order); }");
        assert_eq!(node.find_child(NodeKind::ForEachBinding).expect("binding").full_text(), "Order order");
        assert_eq!(node.find_child(NodeKind::ForIterable).expect("iterable").full_text(), "orders");
    }

    #[test]
    fn test_parse_for_expression_init() {
        let node = first_statement("for (i = 0, j = 1; i < j; i++, j--) x();");
        assert_eq!(node.find_child(NodeKind::ForInit).expect("init").full_text(), "i = 0, j = 1");
        assert_eq!(node.find_child(NodeKind::ForUpdate).expect("update").full_text(), "i++, j--");
    }

    #[test]
    fn test_parse_while_and_return() {
        let node = first_statement("while (running) { return; }");
        assert_eq!(node.kind, NodeKind::WhileStatement);
        let node = first_statement("return a + b;");
        assert_eq!(node.kind, NodeKind::ReturnStatement);
    }
}
