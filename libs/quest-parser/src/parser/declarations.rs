//! # Declaration Parsing
//!
//! Parses the top level of a script: kind declaration, business header,
//! processes, functions and requirements.
//!
//! ## Grammar
//!
//! ```text
//! script      = kindDecl? header? (process | function | requirement)*
//! kindDecl    = "@kind" ("service" | "prd" | IDENT) ";"
//! header      = "@business" "`" name "`" ";"
//! process     = "process" IDENT block
//! function    = "function" IDENT "(" parameters? ")" block
//! requirement = "requirement" IDENT "{" (STRING ";")* "}"
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse the whole script.
    pub(super) fn parse_script(&mut self) -> CstNode {
        let mut children = Vec::new();

        loop {
            self.trivia(&mut children);
            if self.is_at_end() {
                break;
            }

            let started_at = self.checkpoint();
            let item = match self.peek_kind() {
                TokenKind::KindAnnotation => self.parse_kind_decl(),
                TokenKind::BusinessAnnotation => self.parse_business_header(),
                TokenKind::Process => self.parse_process(),
                TokenKind::Function => self.parse_function(),
                TokenKind::Requirement => self.parse_requirement(),
                _ => Err(self.unexpected("process, function or requirement")),
            };

            match item {
                Ok(node) => children.push(node),
                Err(error) => {
                    self.report(error);
                    self.recover_to_item(started_at, &mut children);
                }
            }
        }

        self.node(NodeKind::Script, children)
    }

    /// Parse `@kind service;`.
    ///
    /// Any identifier is accepted as the kind literal; deciding whether it is
    /// known happens after parsing.
    fn parse_kind_decl(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::KindAnnotation, &mut children)?;
        match self.peek_kind() {
            TokenKind::Service | TokenKind::Prd | TokenKind::Identifier => self.bump(&mut children),
            _ => return Err(self.unexpected("document kind")),
        }
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.node(NodeKind::KindDecl, children))
    }

    /// Parse ``@business `name`;``.
    fn parse_business_header(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::BusinessAnnotation, &mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_business_name()?);
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.node(NodeKind::BusinessHeader, children))
    }

    /// Parse the back-quoted business name.
    fn parse_business_name(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::Backquote, &mut children)?;
        if self.check(TokenKind::Backquote) {
            return Err(self.unexpected("business name"));
        }
        while !self.check(TokenKind::Backquote) {
            match self.peek_kind() {
                TokenKind::Eof | TokenKind::Semi => return Err(self.unexpected("`")),
                _ => self.bump(&mut children),
            }
        }
        self.expect(TokenKind::Backquote, &mut children)?;
        Ok(self.node(NodeKind::BusinessName, children))
    }

    /// Parse `process name { ... }`.
    fn parse_process(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::Process, &mut children)?;
        self.expect_name(&mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_block()?);
        Ok(self.node(NodeKind::ProcessDecl, children))
    }

    /// Parse `function name(Type a, Type b) { ... }`.
    fn parse_function(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::Function, &mut children)?;
        self.expect_name(&mut children)?;
        self.expect(TokenKind::LParen, &mut children)?;
        if !self.check(TokenKind::RParen) {
            self.trivia(&mut children);
            children.push(self.parse_parameters()?);
        }
        self.expect(TokenKind::RParen, &mut children)?;
        self.trivia(&mut children);
        children.push(self.parse_block()?);
        Ok(self.node(NodeKind::FunctionDecl, children))
    }

    /// Parse `Type name (, Type name)*`.
    fn parse_parameters(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        loop {
            self.trivia(&mut children);
            children.push(self.parse_type()?);
            self.expect(TokenKind::Identifier, &mut children)?;
            if !self.eat(TokenKind::Comma, &mut children) {
                break;
            }
        }
        Ok(self.node(NodeKind::Parameters, children))
    }

    /// Parse `requirement name { "item"; ... }`.
    fn parse_requirement(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        self.expect(TokenKind::Requirement, &mut children)?;
        self.expect_name(&mut children)?;
        self.expect(TokenKind::LBrace, &mut children)?;
        while !self.check(TokenKind::RBrace) {
            if !self.check(TokenKind::String) {
                return Err(self.unexpected("requirement item string"));
            }
            self.expect_string(&mut children)?;
            self.expect(TokenKind::Semi, &mut children)?;
        }
        self.expect(TokenKind::RBrace, &mut children)?;
        Ok(self.node(NodeKind::RequirementDecl, children))
    }

    /// Identifier naming a process, function or requirement.
    fn expect_name(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        if self.check(TokenKind::Identifier) {
            self.bump(out);
            Ok(())
        } else {
            Err(self.unexpected("name"))
        }
    }

    /// Consume a string literal, rejecting unterminated ones.
    pub(super) fn expect_string(&mut self, out: &mut Vec<CstNode>) -> Result<(), ParseError> {
        let token = self.peek();
        if token.kind != TokenKind::String {
            return Err(self.unexpected("string"));
        }
        if !is_terminated(&token.text) {
            return Err(ParseError::new(ParseErrorKind::UnterminatedString, token.span));
        }
        self.bump(out);
        Ok(())
    }
}

/// A string token is terminated when it closes with its opening quote.
fn is_terminated(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(open) = chars.next() else {
        return false;
    };
    let body = chars.as_str();
    if !body.ends_with(open) {
        return false;
    }
    // The closing quote must not be escaped: count trailing backslashes before it.
    let inner = &body[..body.len() - open.len_utf8()];
    inner.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0
}

// =============================================================================
// TESTS
// =============================================================================
