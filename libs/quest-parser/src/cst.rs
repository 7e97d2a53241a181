//! # Concrete Syntax Tree (CST)
//!
//! CST types representing parsed Quest source code.
//! The tree is lossless: every token, including whitespace and comments, is a
//! terminal node, so concatenating the terminals of a node yields its exact
//! source text.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::cst::NodeKind;
//!
//! let cst = quest_parser::parse("process biz {}");
//! assert_eq!(cst.root.kind, NodeKind::Script);
//! assert_eq!(cst.root.full_text(), "process biz {}");
//! ```

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// CST
// =============================================================================

/// Concrete Syntax Tree result.
///
/// Contains the root node and any parse errors.
#[derive(Debug, Clone)]
pub struct Cst {
    /// Root node of the syntax tree.
    pub root: CstNode,
    /// Parse errors encountered.
    pub errors: Vec<ParseError>,
}

impl Cst {
    /// Create a new CST.
    pub fn new(root: CstNode, errors: Vec<ParseError>) -> Self {
        Self { root, errors }
    }

    /// Check if parsing was successful (no errors).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// CST NODE
// =============================================================================

/// A node in the Concrete Syntax Tree.
///
/// Terminals have kind [`NodeKind::Token`] and carry their text; rules carry
/// children in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstNode {
    /// Node type.
    pub kind: NodeKind,
    /// Source span.
    pub span: Span,
    /// Child nodes.
    pub children: Vec<CstNode>,
    /// Text content (terminals only).
    pub text: Option<String>,
}

impl CstNode {
    /// Create a new CST node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a terminal node from a lexer token.
    pub fn token(token: &Token) -> Self {
        Self {
            kind: NodeKind::Token(token.kind),
            span: token.span,
            children: Vec::new(),
            text: Some(token.text.clone()),
        }
    }

    /// Create node with children.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Node type
    /// - `span`: Source location
    /// - `children`: Child nodes
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<CstNode>) -> Self {
        Self {
            kind,
            span,
            children,
            text: None,
        }
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: CstNode) {
        self.children.push(child);
    }

    /// Token kind for terminals, `None` for rules.
    pub fn token_kind(&self) -> Option<TokenKind> {
        match self.kind {
            NodeKind::Token(kind) => Some(kind),
            _ => None,
        }
    }

    /// True for terminal nodes.
    pub fn is_token(&self) -> bool {
        self.token_kind().is_some()
    }

    /// True for whitespace/comment terminals.
    pub fn is_trivia(&self) -> bool {
        self.token_kind().map_or(false, |kind| kind.is_trivia())
    }

    /// Get text content, or empty string if none.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Exact source text covered by this node, trivia included.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match &self.text {
            Some(text) => out.push_str(text),
            None => self.children.iter().for_each(|child| child.write_text(out)),
        }
    }

    /// Children that are not trivia.
    pub fn significant_children(&self) -> impl Iterator<Item = &CstNode> {
        self.children.iter().filter(|child| !child.is_trivia())
    }

    /// Find first child with given kind.
    pub fn find_child(&self, kind: NodeKind) -> Option<&CstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Find all children with given kind.
    pub fn find_children(&self, kind: NodeKind) -> Vec<&CstNode> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Find the first terminal child of the given token kind.
    pub fn find_token(&self, kind: TokenKind) -> Option<&CstNode> {
        self.find_child(NodeKind::Token(kind))
    }
}

impl Spanned for CstNode {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// Types of CST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Terminals
    /// Any token, trivia included.
    Token(TokenKind),

    // Top-level
    /// Root node of a script.
    Script,
    /// `@kind service;`
    KindDecl,
    /// `@business `订单业务`;`
    BusinessHeader,
    /// The quoted name inside a business header.
    BusinessName,
    /// `process name { ... }`
    ProcessDecl,
    /// `function name(params) { ... }`
    FunctionDecl,
    /// Parameter list between the parentheses of a function.
    Parameters,
    /// `requirement name { "item"; ... }`
    RequirementDecl,

    // Statements
    /// `{ ... }`
    Block,
    /// `Type name = value, other;`
    VariableStatement,
    /// `if (cond) stmt else stmt`
    IfStatement,
    /// `for (init; cond; update) stmt` or `for (Type x : items) stmt`
    ForStatement,
    /// Initializer of a classic for loop.
    ForInit,
    /// Condition of a classic for loop.
    ForCondition,
    /// Update list of a classic for loop.
    ForUpdate,
    /// `Type name` of an enhanced for loop.
    ForEachBinding,
    /// Iterable expression of an enhanced for loop.
    ForIterable,
    /// `while (cond) stmt`
    WhileStatement,
    /// `return value;`
    ReturnStatement,
    /// `expr;` or a bare `;`
    ExpressionStatement,

    // Types
    /// Type reference like `List<String>` or `int[]`
    Type,

    // Expressions
    /// `target = value`, `target += value`, ...
    AssignmentExpr,
    /// Wrapper around an assignment operator token.
    AssignmentOperator,
    /// `cond ? a : b`
    TernaryExpr,
    /// `a + b`
    BinaryExpr,
    /// Wrapper around a binary operator token.
    BinaryOp,
    /// `!a`, `-a`, `++a`
    PrefixExpr,
    /// `a++`, `a--`
    PostfixExpr,
    /// `(Type) value`
    CastExpr,
    /// `items[i]`
    ArrayAccessExpr,
    /// `name(args)`
    FunctionInvoke,
    /// `receiver.name(args)`
    MethodInvoke,
    /// `(args)` of an invocation or creator
    Arguments,
    /// Literal, name, field access, parenthesized expression or `new` creator.
    Primary,

    // Other
    /// Tokens skipped during error recovery.
    Error,
}

impl NodeKind {
    /// Check if this is an expression node.
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::AssignmentExpr
                | Self::TernaryExpr
                | Self::BinaryExpr
                | Self::PrefixExpr
                | Self::PostfixExpr
                | Self::CastExpr
                | Self::ArrayAccessExpr
                | Self::FunctionInvoke
                | Self::MethodInvoke
                | Self::Primary
        )
    }

    /// Check if this is a statement node.
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::VariableStatement
                | Self::IfStatement
                | Self::ForStatement
                | Self::WhileStatement
                | Self::ReturnStatement
                | Self::ExpressionStatement
        )
    }

    /// Human-readable rule name used in diagnostics.
    pub fn name(&self) -> String {
        match self {
            Self::Token(kind) => kind.symbolic_name().to_string(),
            other => format!("{other:?}"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str) -> CstNode {
        CstNode::token(&Token::new(kind, Span::zero(), text.to_string()))
    }

    #[test]
    fn test_cst_node_new() {
        let node = CstNode::new(NodeKind::Primary, Span::from_bytes(0, 2));
        assert_eq!(node.kind, NodeKind::Primary);
        assert!(node.children.is_empty());
        assert!(node.text.is_none());
    }

    #[test]
    fn test_token_node() {
        let node = tok(TokenKind::Identifier, "user");
        assert_eq!(node.token_kind(), Some(TokenKind::Identifier));
        assert_eq!(node.text_or_empty(), "user");
        assert!(!node.is_trivia());
    }

    #[test]
    fn test_full_text_concatenates_terminals() {
        let mut parent = CstNode::new(NodeKind::BinaryExpr, Span::zero());
        parent.add_child(tok(TokenKind::Identifier, "a"));
        parent.add_child(tok(TokenKind::Whitespace, " "));
        parent.add_child(tok(TokenKind::Plus, "+"));
        parent.add_child(tok(TokenKind::Identifier, "b"));
        assert_eq!(parent.full_text(), "a +b");
        assert_eq!(parent.significant_children().count(), 3);
    }

    #[test]
    fn test_cst_node_find_child() {
        let mut parent = CstNode::new(NodeKind::FunctionInvoke, Span::zero());
        parent.add_child(tok(TokenKind::Identifier, "foo"));
        parent.add_child(CstNode::new(NodeKind::Arguments, Span::zero()));

        assert!(parent.find_child(NodeKind::Arguments).is_some());
        assert!(parent.find_token(TokenKind::Identifier).is_some());
        assert!(parent.find_child(NodeKind::Primary).is_none());
    }

    #[test]
    fn test_node_kind_is_statement() {
        assert!(NodeKind::VariableStatement.is_statement());
        assert!(NodeKind::Block.is_statement());
        assert!(!NodeKind::Primary.is_statement());
        assert!(NodeKind::MethodInvoke.is_expression());
    }

    #[test]
    fn test_node_kind_name() {
        assert_eq!(NodeKind::Token(TokenKind::Comma).name(), "COMMA");
        assert_eq!(NodeKind::ForInit.name(), "ForInit");
    }
}
