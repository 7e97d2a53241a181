//! # Statement Lowering
//!
//! Classifies parsed statements into composites. Classification is
//! exhaustive: a rule with no composite kind is an error, never dropped.

use super::expressions::{lower_children, lower_tagged, surface_single};
use crate::error::LowerError;
use crate::statement::{CompositeKind, ForControl, ForLoop, Statement, StatementKind};
use quest_parser::{CstNode, NodeKind};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Lower the statements of a process or function body.
///
/// Only the statements are kept; braces and the trivia between statements
/// are not part of the result.
pub fn lower_block(block: &CstNode) -> Result<Vec<Statement>, LowerError> {
    if block.kind != NodeKind::Block {
        return Err(LowerError::InvalidCst(format!("expected Block, found {}", block.kind.name())));
    }
    lower_statements(block.children.iter().filter(|child| !child.is_token()))
}

/// Lower a sequence of parsed statements, preserving order.
pub fn lower_statements<'a>(nodes: impl IntoIterator<Item = &'a CstNode>) -> Result<Vec<Statement>, LowerError> {
    nodes.into_iter().map(lower_statement).collect()
}

/// Classify and lower one parsed statement.
pub fn lower_statement(node: &CstNode) -> Result<Statement, LowerError> {
    let kind = match node.kind {
        NodeKind::Block => CompositeKind::Block,
        NodeKind::VariableStatement => CompositeKind::Variable,
        NodeKind::IfStatement => CompositeKind::If,
        NodeKind::WhileStatement => CompositeKind::While,
        NodeKind::ExpressionStatement => CompositeKind::Expression,
        NodeKind::ReturnStatement => CompositeKind::Return,
        NodeKind::ForStatement => return lower_for(node),
        NodeKind::Script
        | NodeKind::KindDecl
        | NodeKind::BusinessHeader
        | NodeKind::BusinessName
        | NodeKind::ProcessDecl
        | NodeKind::FunctionDecl
        | NodeKind::Parameters
        | NodeKind::RequirementDecl
        | NodeKind::ForInit
        | NodeKind::ForCondition
        | NodeKind::ForUpdate
        | NodeKind::ForEachBinding
        | NodeKind::ForIterable
        | NodeKind::Type
        | NodeKind::AssignmentExpr
        | NodeKind::AssignmentOperator
        | NodeKind::TernaryExpr
        | NodeKind::BinaryExpr
        | NodeKind::BinaryOp
        | NodeKind::PrefixExpr
        | NodeKind::PostfixExpr
        | NodeKind::CastExpr
        | NodeKind::ArrayAccessExpr
        | NodeKind::FunctionInvoke
        | NodeKind::MethodInvoke
        | NodeKind::Arguments
        | NodeKind::Primary
        | NodeKind::Error
        | NodeKind::Token(_) => {
            return Err(LowerError::UnsupportedStatement { rule: node.kind.name(), span: node.span });
        }
    };
    Ok(Statement::composite(kind, lower_children(&node.children)?))
}

// =============================================================================
// FOR LOOPS
// =============================================================================

/// Lower a `for` statement, recording where its control clause sits.
///
/// ## Example CST
///
/// ```text
/// ForStatement
/// ├── Token(For) "for"
/// ├── Token(LParen) "("
/// ├── ForInit "int i = 0"
/// ├── Token(Semi) ";"
/// ├── ForCondition "i < n"
/// ├── Token(Semi) ";"
/// ├── ForUpdate "i++"
/// ├── Token(RParen) ")"
/// └── Block
/// ```
pub fn lower_for(node: &CstNode) -> Result<Statement, LowerError> {
    let tagged = lower_tagged(&node.children)?;

    let position = |kind: NodeKind| tagged.iter().position(|(source, _)| *source == kind);
    let control = match (position(NodeKind::ForEachBinding), position(NodeKind::ForIterable)) {
        (Some(binding), Some(iterable)) => ForControl::Each { binding, iterable },
        (None, None) => ForControl::Classic {
            init: position(NodeKind::ForInit),
            condition: position(NodeKind::ForCondition),
            update: position(NodeKind::ForUpdate),
        },
        _ => {
            return Err(LowerError::InvalidCst(format!(
                "for-each loop needs both a binding and an iterable: `{}`",
                node.full_text()
            )));
        }
    };

    let children: Vec<Statement> = tagged.into_iter().map(|(_, statement)| statement).collect();
    if children.last().map_or(true, |body| body.kind() == StatementKind::Token) {
        return Err(LowerError::InvalidCst(format!("for loop without body: `{}`", node.full_text())));
    }
    Ok(Statement::For(ForLoop { children, control }))
}

/// Lower one clause of a `for` header.
///
/// - init: Variable when it declares, Expression otherwise
/// - condition, iterable: the expression itself
/// - update: Expression
/// - binding: Variable
pub(super) fn lower_for_clause(node: &CstNode) -> Result<Statement, LowerError> {
    match node.kind {
        NodeKind::ForInit if node.find_child(NodeKind::Type).is_some() => {
            Ok(Statement::composite(CompositeKind::Variable, lower_children(&node.children)?))
        }
        NodeKind::ForInit | NodeKind::ForUpdate => {
            Ok(Statement::composite(CompositeKind::Expression, lower_children(&node.children)?))
        }
        NodeKind::ForEachBinding => Ok(Statement::composite(CompositeKind::Variable, lower_children(&node.children)?)),
        NodeKind::ForCondition | NodeKind::ForIterable => surface_single(node)?
            .ok_or_else(|| LowerError::InvalidCst(format!("empty {}", node.kind.name()))),
        other => Err(LowerError::InvalidCst(format!("{} is not a for clause", other.name()))),
    }
}

// =============================================================================
// TESTS
// =============================================================================
