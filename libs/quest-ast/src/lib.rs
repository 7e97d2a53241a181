//! # Quest AST
//!
//! Lowers quest-parser CSTs into statement trees, assembles them into module
//! containers, and renders them back to text.
//!
//! ## Architecture
//!
//! ```text
//! CST → extract_kind → PipelineRegistry → assemble_* → lower_block
//!     → lower_statement → lower_node → Statement → Printer → text
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::{lower_script, PipelineRegistry, StatementKind};
//! use config::constants::QuestConfig;
//!
//! let source = "@kind service;\n@business `订单业务`;\nprocess biz {\nString id = \"1\";\n}";
//! let module = lower_script(source, &PipelineRegistry::standard(), &QuestConfig::default()).unwrap();
//! let service = module.as_service().unwrap();
//!
//! assert_eq!(service.biz_module, "订单业务");
//! assert_eq!(service.processes["biz"].children[0].kind(), StatementKind::Variable);
//! assert_eq!(service.processes["biz"].render(), "String id = \"1\";");
//! ```
//!
//! ## Design Principles
//!
//! - **Closed node set**: every rule maps to one statement kind or an error
//! - **Order preserving**: composites render their children back to back
//! - **Token-driven spacing**: only token leaves add whitespace

pub mod component;
pub mod error;
pub mod kind;
pub mod module;
pub mod printer;
pub mod registry;
pub mod spacing;
pub mod statement;
pub mod visitor;

pub use component::{ComponentDescription, MethodDescription};
pub use error::LowerError;
pub use kind::{extract_kind, DocumentKind};
pub use module::{PrdModule, QuestModule, ServiceModule};
pub use printer::{Printer, RenderMode};
pub use registry::{Pipeline, PipelineRegistry, PrdPipeline, ServicePipeline};
pub use statement::{
    CompositeKind, ForControl, ForLoop, Function, Invocation, Parameter, Process, Statement, StatementKind,
};

use config::constants::QuestConfig;
use quest_parser::{format_script, parse_with_config};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Preprocess, parse and assemble one script.
///
/// ## Errors
///
/// - [`LowerError::Syntax`] when the script does not parse
/// - [`LowerError::UnrecognizedKind`] when `@kind` is missing or unknown
/// - any lowering error of the selected pipeline
pub fn lower_script(
    source: &str,
    registry: &PipelineRegistry,
    config: &QuestConfig,
) -> Result<QuestModule, LowerError> {
    let formatted = format_script(source);
    let cst = parse_with_config(&formatted, config);
    if !cst.is_ok() {
        return Err(LowerError::Syntax(cst.errors));
    }
    registry.assemble(&cst.root)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_errors_reject_script() {
        let result = lower_script("@kind service;\nprocess p { a = ; }", &PipelineRegistry::standard(), &QuestConfig::default());
        assert!(matches!(result, Err(LowerError::Syntax(ref errors)) if errors.len() == 1));
    }

    #[test]
    fn test_lower_prd_script() {
        let module = lower_script(
            "@kind prd;\n@business `用户中心`;\n\n\n\nrequirement login {\n\"短信登录\";\n}",
            &PipelineRegistry::standard(),
            &QuestConfig::default(),
        )
        .expect("module");
        assert_eq!(module.biz_module(), "用户中心");
        assert_eq!(module.as_prd().map(|p| p.requirements.len()), Some(1));
    }
}
