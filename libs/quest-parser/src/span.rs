//! # Source Spans
//!
//! Byte/line/column positions and ranges used by tokens and CST nodes.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::span::Span;
//!
//! let span = Span::from_bytes(2, 6);
//! assert_eq!(span.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A point in the source text.
///
/// `line` and `column` are zero-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Zero-based line.
    pub line: usize,
    /// Zero-based column (in characters).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// Half-open range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Span {
    /// Create a span between two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty span at the start of the file.
    pub const fn zero() -> Self {
        Self::new(Position::new(0, 0, 0), Position::new(0, 0, 0))
    }

    /// Span from byte offsets only (line/column left at zero).
    ///
    /// Handy in tests and for synthesized nodes.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self::new(Position::new(start, 0, 0), Position::new(end, 0, 0))
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// True when the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if other.start.byte < self.start.byte { other.start } else { self.start };
        let end = if other.end.byte > self.end.byte { other.end } else { self.end };
        Span::new(start, end)
    }

    /// Slice the covered text out of `source`.
    ///
    /// Returns an empty string when the span does not fall on char boundaries
    /// of `source` (e.g. a span from a different text).
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start.byte..self.end.byte).unwrap_or("")
    }
}

/// Anything that knows where it came from.
pub trait Spanned {
    /// Source range of this item.
    fn span(&self) -> Span;
}

// =============================================================================
// TESTS
// =============================================================================
