//! # Quest Parser (Pure Rust)
//!
//! Lexer, recursive descent parser and lossless CST for Quest scripts.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → format_script → Lexer → Tokens (with trivia) → Parser → CST
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::{parse, NodeKind};
//!
//! let cst = parse("@kind service;\nprocess biz {\nString id = \"1\";\n}");
//! assert!(cst.is_ok());
//! assert_eq!(cst.root.kind, NodeKind::Script);
//! ```
//!
//! ## Pipeline Integration
//!
//! This crate is the first layer in the Quest pipeline:
//!
//! ```text
//! quest-parser → quest-ast → quest-runner
//! ```

pub mod cst;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export public API
pub use cst::{Cst, CstNode, NodeKind};
pub use error::{ParseError, ParseErrorKind};
pub use format::format_script;
pub use lexer::TokenKind;
pub use span::{Position, Span, Spanned};

use config::constants::QuestConfig;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse Quest source code into a Concrete Syntax Tree.
///
/// This is the main entry point for the parser.
///
/// ## Parameters
///
/// - `source`: Quest source code string
///
/// ## Returns
///
/// `Cst` containing the root node and any parse errors
///
/// ## Error Handling
///
/// The parser attempts to recover from errors and continue parsing.
/// Errors are collected in `cst.errors`. Check `cst.is_ok()` for success.
///
/// ```rust
/// let cst = quest_parser::parse("process p { a = ; }");
/// assert!(!cst.is_ok());
/// ```
pub fn parse(source: &str) -> Cst {
    parse_with_config(source, &QuestConfig::default())
}

/// Parse with explicit settings (nesting limit).
pub fn parse_with_config(source: &str, config: &QuestConfig) -> Cst {
    let tokens = lexer::Lexer::new(source).tokenize();
    parser::Parser::new(tokens)
        .with_max_depth(config.max_nesting_depth)
        .parse()
}

// =============================================================================
// TESTS
// =============================================================================
