//! # Quest Lexer
//!
//! Tokenizes Quest source code into tokens.
//!
//! Unlike a throwaway scanner the lexer is lossless: runs of whitespace and
//! comments become a single [`TokenKind::Whitespace`] token, so the concatenated
//! token texts reproduce the input exactly.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("process biz {}").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Process);
//! assert_eq!(tokens[1].kind, TokenKind::Whitespace);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// Quest lexer.
///
/// Converts source text into a stream of tokens ending with [`TokenKind::Eof`].
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    ///
    /// ## Parameters
    ///
    /// - `source`: Quest source code
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens including trivia and the EOF token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.cursor.is_eof() {
            if self.at_trivia() {
                self.scan_trivia();
            } else {
                self.scan_token();
            }
        }

        let eof_pos = self.cursor.position();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(eof_pos, eof_pos),
            String::new(),
        ));

        self.tokens
    }

    /// Whitespace or the start of a comment.
    fn at_trivia(&self) -> bool {
        match self.cursor.peek() {
            Some(c) if c.is_whitespace() => true,
            Some('/') => matches!(self.cursor.peek_next(), Some('/') | Some('*')),
            _ => false,
        }
    }

    /// Consume a maximal run of whitespace and comments as one token.
    fn scan_trivia(&mut self) {
        let start = self.cursor.position();
        loop {
            self.cursor.advance_while(char::is_whitespace);

            if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('/') {
                self.cursor.advance_while(|c| c != '\n');
                continue;
            }

            if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('*') {
                self.cursor.advance(); // /
                self.cursor.advance(); // *
                while !self.cursor.is_eof() {
                    if self.cursor.peek() == Some('*') && self.cursor.peek_next() == Some('/') {
                        self.cursor.advance(); // *
                        self.cursor.advance(); // /
                        break;
                    }
                    self.cursor.advance();
                }
                continue;
            }

            break;
        }
        self.push(TokenKind::Whitespace, start);
    }

    /// Scan a single significant token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return,
        };

        let kind = match c {
            // Single-character tokens
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '`' => TokenKind::Backquote,

            // One- or two-character tokens
            '+' => self.either(&[('+', TokenKind::PlusPlus), ('=', TokenKind::PlusAssign)], TokenKind::Plus),
            '-' => self.either(&[('-', TokenKind::MinusMinus), ('=', TokenKind::MinusAssign)], TokenKind::Minus),
            '*' => self.either(&[('=', TokenKind::StarAssign)], TokenKind::Star),
            '/' => self.either(&[('=', TokenKind::SlashAssign)], TokenKind::Slash),
            '%' => self.either(&[('=', TokenKind::PercentAssign)], TokenKind::Percent),
            '=' => self.either(&[('=', TokenKind::EqEq)], TokenKind::Assign),
            '!' => self.either(&[('=', TokenKind::BangEq)], TokenKind::Bang),
            '<' => self.either(&[('=', TokenKind::LtEq)], TokenKind::Lt),
            // `>>` is never fused so nested generic closers lex as two `>`
            '>' => self.either(&[('=', TokenKind::GtEq)], TokenKind::Gt),
            '&' => self.either(&[('&', TokenKind::AmpAmp)], TokenKind::Error),
            '|' => self.either(&[('|', TokenKind::PipePipe)], TokenKind::Error),

            '"' | '\'' => return self.scan_string(start, c),
            '0'..='9' => return self.scan_number(start),
            '@' => return self.scan_annotation(start),
            c if c.is_alphabetic() || c == '_' || c == '$' => return self.scan_identifier(start),

            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Consume a second character when it matches one of `pairs`.
    fn either(&mut self, pairs: &[(char, TokenKind)], single: TokenKind) -> TokenKind {
        for &(next, kind) in pairs {
            if self.cursor.peek() == Some(next) {
                self.cursor.advance();
                return kind;
            }
        }
        single
    }

    /// Scan a string literal delimited by `quote`.
    fn scan_string(&mut self, start: Position, quote: char) {
        while let Some(c) = self.cursor.peek() {
            if c == quote {
                self.cursor.advance();
                break;
            }
            if c == '\n' {
                // Unterminated; stop at the line end
                break;
            }
            if c == '\\' {
                self.cursor.advance(); // Backslash
            }
            self.cursor.advance();
        }
        self.push(TokenKind::String, start);
    }

    /// Scan a number literal (integer, decimal, exponent, `L`/`D`/`F` suffix).
    fn scan_number(&mut self, start: Position) {
        let mut has_dot = false;
        let mut has_exponent = false;

        while let Some(c) = self.cursor.peek() {
            match c {
                '0'..='9' | '_' => {
                    self.cursor.advance();
                }
                '.' if !has_dot && !has_exponent => {
                    // `1.toString()` style member access is not a decimal point
                    if self.cursor.peek_next().map_or(false, |n| n.is_ascii_digit()) {
                        has_dot = true;
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
                'e' | 'E' if !has_exponent => {
                    has_exponent = true;
                    self.cursor.advance();
                    if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                        self.cursor.advance();
                    }
                }
                'l' | 'L' | 'd' | 'D' | 'f' | 'F' => {
                    self.cursor.advance();
                    break;
                }
                _ => break,
            }
        }
        self.push(TokenKind::Number, start);
    }

    /// Scan `@kind`, `@business`; any other annotation is an error token.
    fn scan_annotation(&mut self, start: Position) {
        self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');
        let kind = match &self.source[start.byte..self.cursor.position().byte] {
            "@kind" => TokenKind::KindAnnotation,
            "@business" => TokenKind::BusinessAnnotation,
            _ => TokenKind::Error,
        };
        self.push(kind, start);
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Position) {
        self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');

        let kind = match &self.source[start.byte..self.cursor.position().byte] {
            "service" => TokenKind::Service,
            "prd" => TokenKind::Prd,
            "process" => TokenKind::Process,
            "function" => TokenKind::Function,
            "requirement" => TokenKind::Requirement,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "new" => TokenKind::New,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier,
        };
        self.push(kind, start);
    }

    /// Push a token spanning `start` to the cursor.
    fn push(&mut self, kind: TokenKind, start: Position) {
        let end = self.cursor.position();
        let text = &self.source[start.byte..end.byte];
        self.tokens.push(Token::new(kind, Span::new(start, end), text.to_string()));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_variable() {
        let tokens = Lexer::new("String id = \"1\";").tokenize();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["String", " ", "id", " ", "=", " ", "\"1\"", ";", ""]);
        assert_eq!(tokens[6].kind, TokenKind::String);
        assert_eq!(tokens[8].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let source = "process biz {\n  // note\n  a.b(1, 2); /* x */\n}\n";
        let rebuilt: String = Lexer::new(source).tokenize().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_comments_merge_into_whitespace() {
        let tokens = Lexer::new("a // c\n /* d */ b").tokenize();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].text, " // c\n /* d */ ");
    }

    #[test]
    fn test_tokenize_header() {
        assert_eq!(
            kinds("@kind service;\n@business `订单业务`;"),
            vec![
                TokenKind::KindAnnotation,
                TokenKind::Service,
                TokenKind::Semi,
                TokenKind::BusinessAnnotation,
                TokenKind::Backquote,
                TokenKind::Identifier,
                TokenKind::Backquote,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unicode_identifier() {
        let tokens = Lexer::new("订单业务").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "订单业务");
    }

    #[test]
    fn test_unknown_annotation_is_error() {
        assert_eq!(kinds("@foo"), vec![TokenKind::Error, TokenKind::Eof]);
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("== != <= >= && || ++ -- += -= *= /= %="),
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
                TokenKind::StarAssign,
                TokenKind::SlashAssign,
                TokenKind::PercentAssign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_generic_closers_stay_separate() {
        assert_eq!(
            kinds("Map<String, List<String>>"),
            vec![
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::new("3.14 100L 1e5").tokenize();
        assert_eq!(tokens[0].text, "3.14");
        assert_eq!(tokens[2].text, "100L");
        assert_eq!(tokens[4].text, "1e5");
        assert!(tokens.iter().filter(|t| !t.is_trivia() && !t.is_eof()).all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_tokenize_keywords() {
        assert_eq!(
            kinds("new true null return"),
            vec![TokenKind::New, TokenKind::True, TokenKind::Null, TokenKind::Return, TokenKind::Eof]
        );
    }
}
