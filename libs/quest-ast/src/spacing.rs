//! # Token Spacing
//!
//! Static tables deciding how a token leaf is rendered.
//!
//! | Set | Kinds | Rendering |
//! |-----|-------|-----------|
//! | single trailing space | `COMMA`, `NEW`, `QUESTION` | `text + " "` |
//! | double space | `COLON`, `DOT` | `text` (or `" " + text + " "` when padding is enabled) |
//! | everything else | | `text` |
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::spacing::{spacing_rule, SpacingRule};
//! use quest_parser::TokenKind;
//!
//! assert_eq!(spacing_rule(TokenKind::Comma), SpacingRule::TrailingSpace);
//! assert_eq!(spacing_rule(TokenKind::Semi), SpacingRule::Verbatim);
//! ```

use quest_parser::TokenKind;

/// Tokens always followed by one space when rendered.
pub const SINGLE_TRAILING_SPACE: [TokenKind; 3] = [TokenKind::Comma, TokenKind::New, TokenKind::Question];

/// Tokens padded on both sides when double-space padding is enabled.
pub const DOUBLE_SPACE: [TokenKind; 2] = [TokenKind::Colon, TokenKind::Dot];

/// Rendering rule for a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingRule {
    /// Render the text unchanged.
    Verbatim,
    /// Render the text followed by one space.
    TrailingSpace,
    /// Verbatim by default, `" text "` under padding.
    DoubleSpace,
}

/// Look up the rule for `kind`.
pub fn spacing_rule(kind: TokenKind) -> SpacingRule {
    if SINGLE_TRAILING_SPACE.contains(&kind) {
        SpacingRule::TrailingSpace
    } else if DOUBLE_SPACE.contains(&kind) {
        SpacingRule::DoubleSpace
    } else {
        SpacingRule::Verbatim
    }
}

/// Render `text` for a token of `kind`.
///
/// ## Parameters
///
/// - `pad_double_space`: apply the double-space table
pub fn render_token(kind: TokenKind, text: &str, pad_double_space: bool) -> String {
    match spacing_rule(kind) {
        SpacingRule::TrailingSpace => format!("{text} "),
        SpacingRule::DoubleSpace if pad_double_space => format!(" {text} "),
        SpacingRule::DoubleSpace | SpacingRule::Verbatim => text.to_string(),
    }
}
