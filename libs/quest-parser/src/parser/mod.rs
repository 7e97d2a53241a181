//! # Quest Parser
//!
//! Recursive descent parser for Quest scripts.
//! Produces a lossless Concrete Syntax Tree (CST).
//!
//! ## Trivia
//!
//! Whitespace and comment tokens are attached to the rule being built when
//! the next significant token is consumed. A rule never starts or ends with
//! trivia: whatever precedes a sub-rule is flushed into the parent first, and
//! whatever follows it stays pending for the parent.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::lexer::Lexer;
//! use quest_parser::parser::Parser;
//!
//! let tokens = Lexer::new("process biz {}").tokenize();
//! let cst = Parser::new(tokens).parse();
//! assert!(cst.is_ok());
//! ```

mod control_flow;
mod declarations;
mod expressions;
mod operators;
mod postfix;
mod primaries;
mod statements;
mod types;

use crate::cst::{Cst, CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;
use config::constants::{DEFAULT_MAX_NESTING_DEPTH, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for Quest.
pub struct Parser {
    /// Token stream, trivia included, ending with EOF.
    tokens: Vec<Token>,
    /// Index of the next unconsumed token (may be trivia).
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
    /// Current statement/expression nesting.
    depth: usize,
    /// Nesting limit.
    max_depth: usize,
}

/// Saved parser position for speculative parsing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    current: usize,
    errors: usize,
}

impl Parser {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `tokens`: Tokens from lexer; an EOF token is appended if missing
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| !t.is_eof()) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), String::new()));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Override the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the entire token stream into a CST.
    ///
    /// ## Returns
    ///
    /// CST with root [`NodeKind::Script`] node and any parse errors
    pub fn parse(&mut self) -> Cst {
        let root = self.parse_script();
        Cst::new(root, std::mem::take(&mut self.errors))
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Index of the first significant token at or after `from`.
    fn significant_from(&self, from: usize) -> usize {
        let mut index = from;
        while index + 1 < self.tokens.len() && self.tokens[index].is_trivia() {
            index += 1;
        }
        index.min(self.tokens.len() - 1)
    }

    /// Get current significant token.
    fn peek(&self) -> &Token {
        &self.tokens[self.significant_from(self.current)]
    }

    /// Get current significant token kind.
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the significant token `n` positions ahead (0 = current).
    pub(crate) fn peek_nth_kind(&self, n: usize) -> TokenKind {
        let mut index = self.significant_from(self.current);
        for _ in 0..n {
            if self.tokens[index].is_eof() {
                break;
            }
            index = self.significant_from(index + 1);
        }
        self.tokens[index].kind
    }

    /// Check if current significant token matches kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if at end of file.
    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Move pending trivia into `out`.
    pub(crate) fn trivia(&mut self, out: &mut Vec<CstNode>) {
        while self.current < self.tokens.len() && self.tokens[self.current].is_trivia() {
            out.push(CstNode::token(&self.tokens[self.current]));
            self.current += 1;
        }
    }

    /// Consume the current significant token (and pending trivia) into `out`.
    pub(crate) fn bump(&mut self, out: &mut Vec<CstNode>) {
        self.trivia(out);
        if !self.is_at_end() {
            out.push(CstNode::token(&self.tokens[self.current]));
            self.current += 1;
        }
    }

    /// Consume token if it matches expected kind.
    pub(crate) fn expect(&mut self, kind: TokenKind, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        if self.check(kind) {
            self.bump(out);
            Ok(())
        } else {
            Err(self.unexpected(kind.display()))
        }
    }

    /// Try to consume token if it matches.
    pub(crate) fn eat(&mut self, kind: TokenKind, out: &mut Vec<CstNode>) -> bool {
        if self.check(kind) {
            self.bump(out);
            true
        } else {
            false
        }
    }

    /// Error describing the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let kind = match token.kind {
            TokenKind::Eof => ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            TokenKind::Error => ParseErrorKind::InvalidToken {
                text: token.text.clone(),
            },
            _ => ParseErrorKind::UnexpectedToken {
                found: token.text.clone(),
                expected: expected.to_string(),
            },
        };
        ParseError::new(kind, token.span)
    }

    // =========================================================================
    // SPECULATION
    // =========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current: self.current,
            errors: self.errors.len(),
        }
    }

    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.current;
        self.errors.truncate(checkpoint.errors);
    }

    // =========================================================================
    // NESTING
    // =========================================================================

    /// Run `f` one nesting level deeper, on a grown stack if needed.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.deepen()?;
        let result = stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || f(self));
        self.depth -= 1;
        result
    }

    /// Parse a left-deep chain; every [`Parser::deepen`] inside `f` is undone on exit.
    pub(crate) fn chain<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let depth = self.depth;
        let result = f(self);
        self.depth = depth;
        result
    }

    /// Count one more level against the nesting limit.
    pub(crate) fn deepen(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep { limit: self.max_depth },
                self.peek().span,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    // =========================================================================
    // ERROR RECOVERY
    // =========================================================================

    /// Record an error.
    pub(crate) fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Skip to a statement boundary after an error.
    ///
    /// Consumes through the next `;`, or stops before `}`, an item keyword or
    /// EOF. Skipped tokens are kept in an [`NodeKind::Error`] node.
    pub(crate) fn synchronize(&mut self, out: &mut Vec<CstNode>) {
        let mut skipped = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Eof | TokenKind::RBrace => break,
                kind if is_item_start(kind) => break,
                TokenKind::Semi => {
                    self.bump(&mut skipped);
                    break;
                }
                _ => self.bump(&mut skipped),
            }
        }
        if !skipped.is_empty() {
            out.push(self.node(NodeKind::Error, skipped));
        }
    }

    /// Skip to the next top-level item, consuming at least one token when no
    /// progress was made since `started_at`.
    pub(crate) fn recover_to_item(&mut self, started_at: Checkpoint, out: &mut Vec<CstNode>) {
        let mut skipped = Vec::new();
        if self.significant_from(self.current) == self.significant_from(started_at.current) {
            self.bump(&mut skipped);
        }
        while !self.is_at_end() && !is_item_start(self.peek_kind()) {
            self.bump(&mut skipped);
        }
        if !skipped.is_empty() {
            out.push(self.node(NodeKind::Error, skipped));
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Build a rule node spanning its children.
    pub(crate) fn node(&self, kind: NodeKind, children: Vec<CstNode>) -> CstNode {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => {
                let at = self.peek().span.start;
                Span::new(at, at)
            }
        };
        CstNode::with_children(kind, span, children)
    }
}

/// Tokens that open a top-level item.
pub(crate) fn is_item_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KindAnnotation
            | TokenKind::BusinessAnnotation
            | TokenKind::Process
            | TokenKind::Function
            | TokenKind::Requirement
    )
}

// =============================================================================
// TESTS
// =============================================================================
