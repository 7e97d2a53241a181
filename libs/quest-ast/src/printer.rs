//! # Statement Printer
//!
//! Walks a statement tree and concatenates leaf text in child order.
//! Composites never insert separators; spacing comes from token leaves only.
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::{Invocation, Printer, Statement};
//!
//! let call = Statement::Invocation(Invocation::function("foo", "a, b"));
//! assert_eq!(Printer::content().print(&call), "");
//! assert_eq!(Printer::source().print(&call), "foo(a, b)");
//! ```

use crate::spacing::render_token;
use crate::statement::Statement;
use config::constants::{QuestConfig, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

/// How invocation leaves are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Invocations contribute `""`.
    #[default]
    Content,
    /// Invocations contribute their call text.
    Source,
}

/// Renders statements to text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    mode: RenderMode,
    pad_double_space: bool,
}

impl Printer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode, pad_double_space: false }
    }

    /// Content-mode printer with the default spacing policy.
    pub fn content() -> Self {
        Self::new(RenderMode::Content)
    }

    /// Source-mode printer with the default spacing policy.
    pub fn source() -> Self {
        Self::new(RenderMode::Source)
    }

    /// Take the double-space padding policy from `config`.
    pub fn with_config(mut self, config: &QuestConfig) -> Self {
        self.pad_double_space = config.pad_double_space_tokens;
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render one node.
    pub fn print(&self, node: &Statement) -> String {
        let mut out = String::new();
        self.write(node, &mut out);
        out
    }

    /// Render a sequence of nodes back to back.
    pub fn print_all(&self, nodes: &[Statement]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.write(node, &mut out);
        }
        out
    }

    fn write(&self, node: &Statement, out: &mut String) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match node {
            Statement::Type { text } | Statement::Primary { text } => out.push_str(text),
            Statement::Token { token_kind, text } => {
                out.push_str(&render_token(*token_kind, text, self.pad_double_space));
            }
            Statement::Invocation(call) => {
                if self.mode == RenderMode::Source {
                    out.push_str(&call.call_text());
                }
            }
            Statement::Composite { .. } | Statement::For(_) | Statement::Process(_) | Statement::Function(_) => {
                for child in node.children() {
                    self.write(child, out);
                }
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
