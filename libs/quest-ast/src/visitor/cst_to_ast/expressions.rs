//! # Node Lowering
//!
//! Turns any single CST node into at most one statement. Expressions become
//! composites of their lowered children; operator wrappers surface their
//! token; invocations keep raw argument text.
//!
//! ## Whitespace
//!
//! Trivia lowers to a single-space token. Trivia directly after a token that
//! already renders a trailing space (`,` `new` `?`) is dropped, so rendered
//! text lowers back to the same tree.

use super::statements;
use crate::error::LowerError;
use crate::spacing::SINGLE_TRAILING_SPACE;
use crate::statement::{CompositeKind, Invocation, Statement};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use quest_parser::{CstNode, NodeKind, TokenKind};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Lower one node.
///
/// ## Returns
///
/// `Ok(None)` for suppressed nodes (the back-quote delimiter).
pub fn lower_node(node: &CstNode) -> Result<Option<Statement>, LowerError> {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || lower_node_inner(node))
}

/// Lower each child in order, dropping suppressed results.
pub fn lower_children(children: &[CstNode]) -> Result<Vec<Statement>, LowerError> {
    Ok(lower_tagged(children)?.into_iter().map(|(_, node)| node).collect())
}

/// Like [`lower_children`], keeping the CST kind each statement came from.
pub(super) fn lower_tagged(children: &[CstNode]) -> Result<Vec<(NodeKind, Statement)>, LowerError> {
    let mut lowered = Vec::with_capacity(children.len());
    let mut previous: Option<TokenKind> = None;

    for child in children {
        let spaced_already = previous.map_or(false, |kind| SINGLE_TRAILING_SPACE.contains(&kind));
        previous = child.token_kind();
        if child.is_trivia() && spaced_already {
            continue;
        }
        if let Some(node) = lower_node(child)? {
            lowered.push((child.kind, node));
        }
    }
    Ok(lowered)
}

// =============================================================================
// DISPATCH
// =============================================================================

fn lower_node_inner(node: &CstNode) -> Result<Option<Statement>, LowerError> {
    let lowered = match node.kind {
        NodeKind::Token(TokenKind::Backquote) => return Ok(None),
        NodeKind::Token(TokenKind::Whitespace) => Statement::token(TokenKind::Whitespace, " "),
        NodeKind::Token(kind) => Statement::token(kind, node.text_or_empty()),

        NodeKind::Type => Statement::type_ref(node.full_text()),
        NodeKind::Primary => Statement::primary(node.full_text()),

        NodeKind::AssignmentExpr => composite(CompositeKind::Assignment, node)?,
        NodeKind::BinaryExpr => composite(CompositeKind::Binary, node)?,
        NodeKind::PrefixExpr => composite(CompositeKind::Prefix, node)?,
        NodeKind::PostfixExpr => composite(CompositeKind::Postfix, node)?,
        NodeKind::TernaryExpr => composite(CompositeKind::Ternary, node)?,
        NodeKind::CastExpr => composite(CompositeKind::Cast, node)?,
        NodeKind::ArrayAccessExpr => composite(CompositeKind::ArrayAccess, node)?,

        NodeKind::BinaryOp | NodeKind::AssignmentOperator => return surface_single(node),

        NodeKind::FunctionInvoke => Statement::Invocation(lower_function_invoke(node)?),
        NodeKind::MethodInvoke => Statement::Invocation(lower_method_invoke(node)?),

        NodeKind::ForInit
        | NodeKind::ForCondition
        | NodeKind::ForUpdate
        | NodeKind::ForEachBinding
        | NodeKind::ForIterable => return statements::lower_for_clause(node).map(Some),

        NodeKind::Block
        | NodeKind::VariableStatement
        | NodeKind::IfStatement
        | NodeKind::ForStatement
        | NodeKind::WhileStatement
        | NodeKind::ReturnStatement
        | NodeKind::ExpressionStatement => statements::lower_statement(node)?,

        NodeKind::Script
        | NodeKind::KindDecl
        | NodeKind::BusinessHeader
        | NodeKind::BusinessName
        | NodeKind::ProcessDecl
        | NodeKind::FunctionDecl
        | NodeKind::Parameters
        | NodeKind::RequirementDecl
        | NodeKind::Arguments
        | NodeKind::Error => {
            return Err(LowerError::UnsupportedNode { rule: node.kind.name(), span: node.span });
        }
    };
    Ok(Some(lowered))
}

fn composite(kind: CompositeKind, node: &CstNode) -> Result<Statement, LowerError> {
    Ok(Statement::composite(kind, lower_children(&node.children)?))
}

/// Lower the only significant child of a wrapper rule.
pub(super) fn surface_single(node: &CstNode) -> Result<Option<Statement>, LowerError> {
    let mut significant = node.significant_children();
    match (significant.next(), significant.next()) {
        (Some(only), None) => lower_node(only),
        _ => Err(LowerError::InvalidCst(format!(
            "{} must wrap exactly one node: `{}`",
            node.kind.name(),
            node.full_text()
        ))),
    }
}

// =============================================================================
// INVOCATIONS
// =============================================================================

/// `name(args)`
fn lower_function_invoke(node: &CstNode) -> Result<Invocation, LowerError> {
    let name = node
        .find_token(TokenKind::Identifier)
        .map(|n| n.text_or_empty().to_string())
        .ok_or_else(|| LowerError::InvalidCst("function invocation missing name".to_string()))?;
    Ok(Invocation::function(name, arguments_text(node)?))
}

/// `receiver.name(args)`
///
/// ## Example CST
///
/// ```text
/// MethodInvoke
/// ├── Primary "user"
/// ├── Token(Dot) "."
/// ├── Token(Identifier) "getName"
/// └── Arguments "()"
/// ```
fn lower_method_invoke(node: &CstNode) -> Result<Invocation, LowerError> {
    let (receiver, rest) = node
        .children
        .split_first()
        .ok_or_else(|| LowerError::InvalidCst("method invocation without receiver".to_string()))?;

    let name = rest
        .iter()
        .find(|c| c.kind == NodeKind::Token(TokenKind::Identifier))
        .map(|n| n.text_or_empty().to_string())
        .ok_or_else(|| LowerError::InvalidCst("method invocation missing name".to_string()))?;

    Ok(Invocation::method(receiver.full_text(), name, arguments_text(node)?))
}

/// Text between the parentheses of the argument list, trimmed.
fn arguments_text(node: &CstNode) -> Result<String, LowerError> {
    let arguments = node
        .find_child(NodeKind::Arguments)
        .ok_or_else(|| LowerError::InvalidCst("invocation missing argument list".to_string()))?
        .full_text();

    let inner = arguments
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(&arguments);
    Ok(inner.trim().to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::StatementKind;
    use quest_parser::parse;

    /// Lower the expression of `process p { <source>; }`.
    fn lower_expr(source: &str) -> Statement {
        let cst = parse(&format!("process p {{ {source}; }}"));
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        let block = cst.root.children[0].find_child(NodeKind::Block).expect("block");
        let statement = block.find_child(NodeKind::ExpressionStatement).expect("statement");
        lower_node(&statement.children[0]).expect("lowered").expect("not suppressed")
    }

    #[test]
    fn test_backquote_is_suppressed() {
        let cst = parse("@business `订单`;");
        let name = cst.root.children[0].find_child(NodeKind::BusinessName).expect("name");
        let quote = name.find_token(TokenKind::Backquote).expect("quote");
        assert_eq!(lower_node(quote), Ok(None));
        assert_eq!(lower_children(&name.children).expect("lowered").len(), 1);
    }

    #[test]
    fn test_primary_keeps_full_text() {
        assert_eq!(lower_expr("order.amount"), Statement::primary("order.amount"));
        assert_eq!(lower_expr("new Order(id,  x)"), Statement::primary("new Order(id,  x)"));
    }

    #[test]
    fn test_function_invoke() {
        let node = lower_expr("foo(a, b)");
        assert_eq!(node, Statement::Invocation(Invocation::function("foo", "a, b")));
        assert_eq!(node.kind(), StatementKind::FunctionInvokeExpr);
    }

    #[test]
    fn test_method_invoke() {
        let node = lower_expr("user.getName()");
        assert_eq!(node, Statement::Invocation(Invocation::method("user", "getName", "")));
    }

    #[test]
    fn test_chained_method_receiver() {
        let node = lower_expr("repo.find(id).save( order )");
        assert_eq!(node, Statement::Invocation(Invocation::method("repo.find(id)", "save", "order")));
    }

    #[test]
    fn test_assignment_surfaces_operator() {
        let node = lower_expr("total += price");
        assert_eq!(node.kind(), StatementKind::AssignmentExpr);
        let kinds: Vec<StatementKind> = node.children().iter().map(Statement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::PrimaryExpr,
                StatementKind::Token,
                StatementKind::Token,
                StatementKind::Token,
                StatementKind::PrimaryExpr
            ]
        );
        assert_eq!(node.children()[2], Statement::token(TokenKind::PlusAssign, "+="));
        assert_eq!(node.render(), "total += price");
    }

    #[test]
    fn test_binary_renders() {
        let node = lower_expr("a  *   b");
        assert_eq!(node.kind(), StatementKind::BinaryExpr);
        assert_eq!(node.render(), "a * b");
    }

    #[test]
    fn test_ternary_question_spacing() {
        let node = lower_expr("ok ? a : b");
        assert_eq!(node.kind(), StatementKind::TernaryExpr);
        assert_eq!(node.render(), "ok ? a : b");
        assert_eq!(lower_expr("ok?a:b").render(), "ok? a:b");
    }

    #[test]
    fn test_prefix_postfix_cast_access() {
        assert_eq!(lower_expr("!done").kind(), StatementKind::PrefixExpr);
        assert_eq!(lower_expr("i++").kind(), StatementKind::PostfixExpr);
        assert_eq!(lower_expr("items[i]").kind(), StatementKind::ArrayAccessExpr);

        let cast = lower_expr("(int) total");
        assert_eq!(cast.kind(), StatementKind::CastExpr);
        assert_eq!(cast.render(), "(int) total");
    }

    #[test]
    fn test_unsupported_node() {
        let cst = parse("@kind service;");
        let result = lower_node(&cst.root.children[0]);
        assert!(matches!(result, Err(LowerError::UnsupportedNode { ref rule, .. }) if rule == "KindDecl"));
    }
}
