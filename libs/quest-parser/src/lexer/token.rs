//! # Tokens
//!
//! Token types for the Quest lexer.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::lexer::{Token, TokenKind};
//! use quest_parser::span::Span;
//!
//! let token = Token::new(TokenKind::Comma, Span::from_bytes(0, 1), ",".to_string());
//! assert_eq!(token.kind.symbolic_name(), "COMMA");
//! ```

use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text exactly as written.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if token is whitespace or a comment.
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Lexical token kinds.
///
/// Serialized with the grammar's symbolic names (`COMMA`, `NEW`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Literals
    /// Number literal like `10`, `3.14`, `100L`
    Number,
    /// String literal like `"hello"`
    String,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    /// Identifier; any Unicode alphabetic start, e.g. `user` or `用户服务`
    Identifier,

    // Annotations
    /// `@kind`
    KindAnnotation,
    /// `@business`
    BusinessAnnotation,

    // Keywords
    /// `service`
    Service,
    /// `prd`
    Prd,
    /// `process`
    Process,
    /// `function`
    Function,
    /// `requirement`
    Requirement,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `while`
    While,
    /// `return`
    Return,
    /// `new`
    New,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,
    /// `%=`
    PercentAssign,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `?`
    Question,
    /// `:`
    Colon,

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semi,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `` ` ``, the quoting delimiter around business names
    Backquote,

    // Trivia
    /// Run of whitespace and/or comments
    Whitespace,

    // Meta
    /// End of file
    Eof,
    /// Unrecognized character
    Error,
}

impl TokenKind {
    /// Whitespace and comments.
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    /// Literal tokens.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Number | Self::String | Self::True | Self::False | Self::Null)
    }

    /// Reserved words.
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Service
                | Self::Prd
                | Self::Process
                | Self::Function
                | Self::Requirement
                | Self::If
                | Self::Else
                | Self::For
                | Self::While
                | Self::Return
                | Self::New
                | Self::True
                | Self::False
                | Self::Null
        )
    }

    /// Assignment operators (`=`, `+=`, ...).
    pub const fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::PlusAssign
                | Self::MinusAssign
                | Self::StarAssign
                | Self::SlashAssign
                | Self::PercentAssign
        )
    }

    /// Symbolic name as used by the grammar (`COMMA`, `NEW`, `QUESTION`, ...).
    pub const fn symbolic_name(&self) -> &'static str {
        match self {
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Null => "NULL",
            Self::Identifier => "IDENTIFIER",
            Self::KindAnnotation => "KIND_ANNOTATION",
            Self::BusinessAnnotation => "BUSINESS_ANNOTATION",
            Self::Service => "SERVICE",
            Self::Prd => "PRD",
            Self::Process => "PROCESS",
            Self::Function => "FUNCTION",
            Self::Requirement => "REQUIREMENT",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::For => "FOR",
            Self::While => "WHILE",
            Self::Return => "RETURN",
            Self::New => "NEW",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "STAR",
            Self::Slash => "SLASH",
            Self::Percent => "PERCENT",
            Self::Bang => "BANG",
            Self::PlusPlus => "PLUS_PLUS",
            Self::MinusMinus => "MINUS_MINUS",
            Self::Assign => "ASSIGN",
            Self::PlusAssign => "PLUS_ASSIGN",
            Self::MinusAssign => "MINUS_ASSIGN",
            Self::StarAssign => "STAR_ASSIGN",
            Self::SlashAssign => "SLASH_ASSIGN",
            Self::PercentAssign => "PERCENT_ASSIGN",
            Self::EqEq => "EQ_EQ",
            Self::BangEq => "BANG_EQ",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::LtEq => "LT_EQ",
            Self::GtEq => "GT_EQ",
            Self::AmpAmp => "AMP_AMP",
            Self::PipePipe => "PIPE_PIPE",
            Self::Question => "QUESTION",
            Self::Colon => "COLON",
            Self::LParen => "L_PAREN",
            Self::RParen => "R_PAREN",
            Self::LBracket => "L_BRACKET",
            Self::RBracket => "R_BRACKET",
            Self::LBrace => "L_BRACE",
            Self::RBrace => "R_BRACE",
            Self::Semi => "SEMI",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Backquote => "BACKQUOTE",
            Self::Whitespace => "WS",
            Self::Eof => "EOF",
            Self::Error => "ERROR",
        }
    }

    /// Get display string for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::Identifier => "identifier",
            Self::KindAnnotation => "@kind",
            Self::BusinessAnnotation => "@business",
            Self::Service => "service",
            Self::Prd => "prd",
            Self::Process => "process",
            Self::Function => "function",
            Self::Requirement => "requirement",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::While => "while",
            Self::Return => "return",
            Self::New => "new",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::Assign => "=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Question => "?",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Semi => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Backquote => "`",
            Self::Whitespace => "whitespace",
            Self::Eof => "end of file",
            Self::Error => "error",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_keyword() {
        assert!(TokenKind::Process.is_keyword());
        assert!(TokenKind::New.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
    }

    #[test]
    fn test_assignment_operators() {
        assert!(TokenKind::Assign.is_assignment_operator());
        assert!(TokenKind::PercentAssign.is_assignment_operator());
        assert!(!TokenKind::EqEq.is_assignment_operator());
    }

    #[test]
    fn test_symbolic_names() {
        assert_eq!(TokenKind::Comma.symbolic_name(), "COMMA");
        assert_eq!(TokenKind::New.symbolic_name(), "NEW");
        assert_eq!(TokenKind::Question.symbolic_name(), "QUESTION");
        assert_eq!(TokenKind::Whitespace.symbolic_name(), "WS");
    }

    #[test]
    fn test_trivia() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(!TokenKind::Semi.is_trivia());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(TokenKind::LParen.display(), "(");
        assert_eq!(TokenKind::Backquote.display(), "`");
        assert_eq!(TokenKind::Identifier.display(), "identifier");
    }
}
