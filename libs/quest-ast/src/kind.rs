//! # Document Kinds
//!
//! Reads the leading `@kind` declaration of a script.
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::kind::{extract_kind, DocumentKind};
//!
//! let cst = quest_parser::parse("@kind prd;\n");
//! assert_eq!(extract_kind(&cst.root), Ok(DocumentKind::Prd));
//! ```

use crate::error::LowerError;
use quest_parser::{CstNode, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which assembly pipeline a script belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Business logic: processes and functions.
    Service,
    /// Product requirement document.
    Prd,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Service, DocumentKind::Prd];

    /// Literal used in `@kind <code>;`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Prd => "prd",
        }
    }

    /// Display alias.
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Service => "服务",
            Self::Prd => "产品",
        }
    }

    /// Exact, case-sensitive lookup by code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read the kind from a script root.
///
/// The declaration must be the first significant child of the root.
pub fn extract_kind(root: &CstNode) -> Result<DocumentKind, LowerError> {
    let declaration = root
        .significant_children()
        .next()
        .filter(|node| node.kind == NodeKind::KindDecl)
        .ok_or(LowerError::UnrecognizedKind { found: None })?;

    let literal = declaration
        .significant_children()
        .nth(1)
        .map(|node| node.text_or_empty().to_string())
        .ok_or(LowerError::UnrecognizedKind { found: None })?;

    DocumentKind::from_code(&literal).ok_or(LowerError::UnrecognizedKind { found: Some(literal) })
}
