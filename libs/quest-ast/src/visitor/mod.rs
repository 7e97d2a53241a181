//! # Visitors
//!
//! [`cst_to_ast`] lowers parse trees. [`Visitor`] walks lowered statement
//! trees; override the hooks you need and keep the default walk.

pub mod cst_to_ast;

use crate::statement::{ForLoop, Invocation, Statement};
use quest_parser::TokenKind;

/// Read-only walk over statement trees.
pub trait Visitor {
    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Invocation(call) => self.visit_invocation(call),
            Statement::Token { token_kind, text } => self.visit_token(*token_kind, text),
            Statement::For(node) => self.visit_for(node),
            Statement::Type { .. } | Statement::Primary { .. } => {}
            Statement::Composite { children, .. } => self.visit_all(children),
            Statement::Process(node) => self.visit_all(&node.children),
            Statement::Function(node) => self.visit_all(&node.children),
        }
    }

    fn visit_all(&mut self, statements: &[Statement]) {
        statements.iter().for_each(|s| self.visit_statement(s))
    }

    fn visit_for(&mut self, node: &ForLoop) {
        self.visit_all(&node.children)
    }

    fn visit_invocation(&mut self, _call: &Invocation) {}

    fn visit_token(&mut self, _kind: TokenKind, _text: &str) {}
}

/// Collects every invocation in source order.
#[derive(Debug, Default)]
pub struct InvocationCollector {
    pub calls: Vec<Invocation>,
}

impl Visitor for InvocationCollector {
    fn visit_invocation(&mut self, call: &Invocation) {
        self.calls.push(call.clone());
    }
}

/// Invocation leaves of `statements`, in source order.
///
/// Calls folded into a [`Statement::Primary`] (`items.get(i).price`, `(foo())`,
/// `new Order(f(x))`) are part of that leaf's text and are not returned.
pub fn collect_invocations(statements: &[Statement]) -> Vec<Invocation> {
    let mut collector = InvocationCollector::default();
    collector.visit_all(statements);
    collector.calls
}
