//! # Statement Model
//!
//! The closed set of statement nodes produced by lowering. Every node is
//! either a leaf carrying text or a composite carrying children in source
//! order.
//!
//! ## Node Shapes
//!
//! | Shape | Variants | Rendering |
//! |-------|----------|-----------|
//! | leaf | `Type`, `Primary` | stored text |
//! | token leaf | `Token` | text plus spacing policy |
//! | invocation leaf | `Invocation` | `""` (content) or call text (source) |
//! | composite | `Composite`, `For`, `Process`, `Function` | children concatenated |
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::{CompositeKind, Statement, StatementKind};
//! use quest_parser::TokenKind;
//!
//! let node = Statement::composite(
//!     CompositeKind::Expression,
//!     vec![Statement::primary("a"), Statement::token(TokenKind::Semi, ";")],
//! );
//! assert_eq!(node.kind(), StatementKind::Expression);
//! assert_eq!(node.render(), "a;");
//! ```

use crate::printer::Printer;
use quest_parser::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// STATEMENT KIND
// =============================================================================

/// Discriminant of every statement node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    Process,
    Function,
    Variable,
    If,
    For,
    While,
    Expression,
    Token,
    Type,
    Return,
    Block,
    PrimaryExpr,
    AssignmentExpr,
    BinaryExpr,
    PostfixExpr,
    PrefixExpr,
    TernaryExpr,
    CastExpr,
    ArrayAccessExpr,
    /// `receiver.name(args)`
    MethodInvokeExpr,
    /// `name(args)`
    FunctionInvokeExpr,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Kinds carried by [`Statement::Composite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeKind {
    Block,
    Variable,
    If,
    While,
    Expression,
    Return,
    Assignment,
    Binary,
    Postfix,
    Prefix,
    Ternary,
    Cast,
    ArrayAccess,
}

impl CompositeKind {
    /// Statement kind reported by a composite of this kind.
    pub const fn statement_kind(self) -> StatementKind {
        match self {
            Self::Block => StatementKind::Block,
            Self::Variable => StatementKind::Variable,
            Self::If => StatementKind::If,
            Self::While => StatementKind::While,
            Self::Expression => StatementKind::Expression,
            Self::Return => StatementKind::Return,
            Self::Assignment => StatementKind::AssignmentExpr,
            Self::Binary => StatementKind::BinaryExpr,
            Self::Postfix => StatementKind::PostfixExpr,
            Self::Prefix => StatementKind::PrefixExpr,
            Self::Ternary => StatementKind::TernaryExpr,
            Self::Cast => StatementKind::CastExpr,
            Self::ArrayAccess => StatementKind::ArrayAccessExpr,
        }
    }
}

// =============================================================================
// STATEMENT
// =============================================================================

/// One lowered node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Statement {
    /// Type reference such as `List<String>`.
    Type { text: String },
    /// Literal, name, field access, parenthesized expression or creator.
    Primary { text: String },
    /// A single lexical token.
    Token { token_kind: TokenKind, text: String },
    /// Method or function call with raw argument text.
    Invocation(Invocation),
    /// Ordered children of a statement or expression rule.
    Composite { kind: CompositeKind, children: Vec<Statement> },
    /// `for` loop with its control clause.
    For(ForLoop),
    /// Named process body.
    Process(Process),
    /// Named function body.
    Function(Function),
}

impl Statement {
    /// Token leaf.
    pub fn token(token_kind: TokenKind, text: impl Into<String>) -> Self {
        Self::Token { token_kind, text: text.into() }
    }

    /// Type leaf.
    pub fn type_ref(text: impl Into<String>) -> Self {
        Self::Type { text: text.into() }
    }

    /// Primary expression leaf.
    pub fn primary(text: impl Into<String>) -> Self {
        Self::Primary { text: text.into() }
    }

    /// Composite of `kind` over `children`.
    pub fn composite(kind: CompositeKind, children: Vec<Statement>) -> Self {
        Self::Composite { kind, children }
    }

    /// Kind of this node.
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Type { .. } => StatementKind::Type,
            Self::Primary { .. } => StatementKind::PrimaryExpr,
            Self::Token { .. } => StatementKind::Token,
            Self::Invocation(call) => call.kind(),
            Self::Composite { kind, .. } => kind.statement_kind(),
            Self::For(_) => StatementKind::For,
            Self::Process(_) => StatementKind::Process,
            Self::Function(_) => StatementKind::Function,
        }
    }

    /// Children in source order; empty for leaves.
    pub fn children(&self) -> &[Statement] {
        match self {
            Self::Composite { children, .. } => children,
            Self::For(node) => &node.children,
            Self::Process(node) => &node.children,
            Self::Function(node) => &node.children,
            Self::Type { .. } | Self::Primary { .. } | Self::Token { .. } | Self::Invocation(_) => &[],
        }
    }

    /// Check if this node carries children.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite { .. } | Self::For(_) | Self::Process(_) | Self::Function(_))
    }

    /// Content text: invocations contribute nothing.
    pub fn render(&self) -> String {
        Printer::content().print(self)
    }

    /// Source text: invocations are rebuilt from their parts.
    pub fn to_source(&self) -> String {
        Printer::source().print(self)
    }
}

// =============================================================================
// INVOCATION
// =============================================================================

/// A call captured without lowering its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Receiver text for `receiver.name(args)`; absent for `name(args)`.
    pub receiver: Option<String>,
    /// Method or function name.
    pub name: String,
    /// Argument list text without the enclosing parentheses.
    pub arguments: String,
}

impl Invocation {
    /// `receiver.name(arguments)`
    pub fn method(receiver: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self { receiver: Some(receiver.into()), name: name.into(), arguments: arguments.into() }
    }

    /// `name(arguments)`
    pub fn function(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self { receiver: None, name: name.into(), arguments: arguments.into() }
    }

    /// `MethodInvokeExpr` with a receiver, `FunctionInvokeExpr` without.
    pub fn kind(&self) -> StatementKind {
        if self.receiver.is_some() {
            StatementKind::MethodInvokeExpr
        } else {
            StatementKind::FunctionInvokeExpr
        }
    }

    /// Rebuild the call: `receiver.name(args)` or `name(args)`.
    pub fn call_text(&self) -> String {
        let arguments = self.arguments.trim();
        match &self.receiver {
            Some(receiver) => format!("{receiver}.{}({arguments})", self.name),
            None => format!("{}({arguments})", self.name),
        }
    }
}

// =============================================================================
// FOR LOOP
// =============================================================================

/// Which children of a [`ForLoop`] form its control clause.
///
/// Values are indices into [`ForLoop::children`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ForControl {
    /// `for (init; condition; update)`, every slot optional.
    Classic { init: Option<usize>, condition: Option<usize>, update: Option<usize> },
    /// `for (Type name : iterable)`
    Each { binding: usize, iterable: usize },
}

/// A lowered `for` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoop {
    /// All lowered children in declaration order, body last.
    pub children: Vec<Statement>,
    pub control: ForControl,
}

impl ForLoop {
    fn slot(&self, index: Option<usize>) -> Option<&Statement> {
        index.and_then(|i| self.children.get(i))
    }

    /// Initializer of a classic loop.
    pub fn init(&self) -> Option<&Statement> {
        match self.control {
            ForControl::Classic { init, .. } => self.slot(init),
            ForControl::Each { .. } => None,
        }
    }

    /// Condition of a classic loop.
    pub fn condition(&self) -> Option<&Statement> {
        match self.control {
            ForControl::Classic { condition, .. } => self.slot(condition),
            ForControl::Each { .. } => None,
        }
    }

    /// Update list of a classic loop.
    pub fn update(&self) -> Option<&Statement> {
        match self.control {
            ForControl::Classic { update, .. } => self.slot(update),
            ForControl::Each { .. } => None,
        }
    }

    /// `Type name` of a for-each loop.
    pub fn binding(&self) -> Option<&Statement> {
        match self.control {
            ForControl::Each { binding, .. } => self.slot(Some(binding)),
            ForControl::Classic { .. } => None,
        }
    }

    /// Iterable of a for-each loop.
    pub fn iterable(&self) -> Option<&Statement> {
        match self.control {
            ForControl::Each { iterable, .. } => self.slot(Some(iterable)),
            ForControl::Classic { .. } => None,
        }
    }

    /// Loop body.
    pub fn body(&self) -> Option<&Statement> {
        self.children.last()
    }
}

// =============================================================================
// PROCESS / FUNCTION
// =============================================================================

/// `process name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    /// Top-level statements of the body.
    pub children: Vec<Statement>,
}

impl Process {
    pub fn new(name: impl Into<String>, children: Vec<Statement>) -> Self {
        Self { name: name.into(), children }
    }

    /// Reconstructed body text (content mode).
    pub fn render(&self) -> String {
        Printer::content().print_all(&self.children)
    }

    /// Reconstructed body text (source mode).
    pub fn to_source(&self) -> String {
        Printer::source().print_all(&self.children)
    }
}

/// One `Type name` entry of a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
}

/// `function name(params) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Top-level statements of the body.
    pub children: Vec<Statement>,
}

impl Function {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, children: Vec<Statement>) -> Self {
        Self { name: name.into(), parameters, children }
    }

    /// Reconstructed body text (content mode).
    pub fn render(&self) -> String {
        Printer::content().print_all(&self.children)
    }

    /// Reconstructed body text (source mode).
    pub fn to_source(&self) -> String {
        Printer::source().print_all(&self.children)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_kinds() {
        assert_eq!(Statement::type_ref("int").kind(), StatementKind::Type);
        assert_eq!(Statement::primary("1").kind(), StatementKind::PrimaryExpr);
        assert_eq!(Statement::token(TokenKind::Comma, ",").kind(), StatementKind::Token);
        assert!(Statement::primary("1").children().is_empty());
    }

    #[test]
    fn test_invocation_kinds() {
        let method = Statement::Invocation(Invocation::method("user", "getName", ""));
        let function = Statement::Invocation(Invocation::function("foo", "a, b"));
        assert_eq!(method.kind(), StatementKind::MethodInvokeExpr);
        assert_eq!(function.kind(), StatementKind::FunctionInvokeExpr);
    }

    #[test]
    fn test_call_text() {
        assert_eq!(Invocation::method("user", "getName", "").call_text(), "user.getName()");
        assert_eq!(Invocation::function("foo", "a, b").call_text(), "foo(a, b)");
        assert_eq!(Invocation::function("foo", "  ").call_text(), "foo()");
    }

    #[test]
    fn test_composite_kinds_map() {
        let node = Statement::composite(CompositeKind::Ternary, Vec::new());
        assert_eq!(node.kind(), StatementKind::TernaryExpr);
        assert!(node.is_composite());
        assert_eq!(CompositeKind::ArrayAccess.statement_kind(), StatementKind::ArrayAccessExpr);
    }

    #[test]
    fn test_for_loop_slots() {
        let node = ForLoop {
            children: vec![
                Statement::token(TokenKind::For, "for"),
                Statement::token(TokenKind::LParen, "("),
                Statement::composite(CompositeKind::Variable, Vec::new()),
                Statement::token(TokenKind::Semi, ";"),
                Statement::token(TokenKind::Semi, ";"),
                Statement::token(TokenKind::RParen, ")"),
                Statement::composite(CompositeKind::Block, Vec::new()),
            ],
            control: ForControl::Classic { init: Some(2), condition: None, update: None },
        };
        assert_eq!(node.init().map(Statement::kind), Some(StatementKind::Variable));
        assert!(node.condition().is_none());
        assert!(node.binding().is_none());
        assert_eq!(node.body().map(Statement::kind), Some(StatementKind::Block));
    }

    #[test]
    fn test_statement_serializes_with_tag() {
        let json = serde_json::to_value(Statement::token(TokenKind::Comma, ",")).expect("json");
        assert_eq!(json["node"], "token");
        assert_eq!(json["token_kind"], "COMMA");
    }
}
