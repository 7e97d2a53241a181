//! # Parse Errors
//!
//! Error types for the Quest parser.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::error::ParseError;
//!
//! let error = ParseError::unexpected_token(")", "identifier");
//! assert!(error.to_string().contains("unexpected token ')'"));
//! ```

use crate::span::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{kind} at {}:{}", .span.start.line + 1, .span.start.column + 1)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Error kind
    /// - `span`: Source location
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create unexpected token error.
    ///
    /// ## Parameters
    ///
    /// - `found`: Token that was found
    /// - `expected`: Description of expected token
    pub fn unexpected_token(found: &str, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create unexpected EOF error.
    pub fn unexpected_eof(expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create error with span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ParseErrorKind {
    /// Found unexpected token, e.g. expected identifier, found `)`.
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        /// Token that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// Unexpected end of file.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// Character the lexer could not classify, or an unknown `@annotation`.
    #[error("unrecognized input '{text}'")]
    InvalidToken {
        /// The offending text.
        text: String,
    },

    /// Unterminated string literal.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// Nesting exceeded the configured limit.
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit: usize,
    },
}

// =============================================================================
// TESTS
// =============================================================================
