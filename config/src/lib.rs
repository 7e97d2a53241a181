//! # Config Crate
//!
//! Centralized configuration constants for the Quest pipeline.
//! Stack sizes, script discovery rules, and parser limits are defined here so
//! the parser, lowering, and runner crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{QuestConfig, SCRIPT_EXTENSIONS};
//!
//! let config = QuestConfig::default();
//! assert!(config.max_nesting_depth > 0);
//! assert!(SCRIPT_EXTENSIONS.contains(&".ql"));
//! ```

pub mod constants;

#[cfg(test)]
mod tests;
