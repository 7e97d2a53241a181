//! # Lowering Errors
//!
//! Failures raised while turning a CST into statements and modules.

use crate::kind::DocumentKind;
use quest_parser::{ParseError, Span};
use thiserror::Error;

/// Errors produced by kind extraction, lowering and module assembly.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LowerError {
    /// The leading `@kind` declaration is missing or names no known kind.
    #[error("unrecognized document kind{}", .found.as_ref().map(|k| format!(": {k}")).unwrap_or_default())]
    UnrecognizedKind {
        /// Literal found in the declaration, if there was one.
        found: Option<String>,
    },
    /// The registry holds no pipeline for the kind.
    #[error("no pipeline registered for kind `{0}`")]
    NoPipeline(DocumentKind),
    /// A statement rule with no matching composite kind.
    #[error("unsupported statement `{rule}` at {}:{}", .span.start.line + 1, .span.start.column + 1)]
    UnsupportedStatement {
        /// Rule name of the parsed statement.
        rule: String,
        /// Location of the statement.
        span: Span,
    },
    /// A node that cannot appear where it was found.
    #[error("unsupported node `{rule}` at {}:{}", .span.start.line + 1, .span.start.column + 1)]
    UnsupportedNode {
        /// Rule name of the node.
        rule: String,
        /// Location of the node.
        span: Span,
    },
    /// The tree does not have the shape the parser guarantees.
    #[error("invalid CST: {0}")]
    InvalidCst(String),
    /// The script did not parse.
    #[error("script has {} syntax error(s), first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Syntax(Vec<ParseError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_kind_message() {
        let missing = LowerError::UnrecognizedKind { found: None };
        assert_eq!(missing.to_string(), "unrecognized document kind");

        let unknown = LowerError::UnrecognizedKind { found: Some("memo".into()) };
        assert_eq!(unknown.to_string(), "unrecognized document kind: memo");
    }

    #[test]
    fn test_unsupported_statement_location() {
        let error = LowerError::UnsupportedStatement { rule: "Error".into(), span: Span::zero() };
        assert_eq!(error.to_string(), "unsupported statement `Error` at 1:1");
    }
}
