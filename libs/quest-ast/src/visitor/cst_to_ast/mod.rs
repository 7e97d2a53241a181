//! # CST to Statement Lowering
//!
//! Turns a quest-parser CST into statement trees and module containers.
//!
//! ```text
//! Script ─┬─ KindDecl          → DocumentKind (see `kind`)
//!         ├─ BusinessHeader    → biz_module
//!         ├─ ProcessDecl       → Process   ← lower_block ← lower_statement ← lower_node
//!         ├─ FunctionDecl      → Function  ← lower_block ...
//!         └─ RequirementDecl   → requirement items
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::visitor::cst_to_ast::assemble_service;
//!
//! let cst = quest_parser::parse("@kind service;\nprocess biz {\nint a = 1;\n}");
//! let module = assemble_service(&cst.root).unwrap();
//! assert_eq!(module.processes["biz"].render(), "int a = 1;");
//! ```

mod declarations;
mod expressions;
mod statements;

pub use declarations::{assemble_prd, assemble_service, business_name, lower_function, lower_process, lower_requirement};
pub use expressions::{lower_children, lower_node};
pub use statements::{lower_block, lower_for, lower_statement, lower_statements};
