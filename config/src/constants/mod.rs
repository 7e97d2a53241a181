//! Centralized configuration values shared across the Quest pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which `stacker::maybe_grow` allocates a new segment.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

/// File extensions recognised as Quest scripts, including the leading dot.
///
/// # Examples
/// ```
/// use config::constants::SCRIPT_EXTENSIONS;
/// assert!(SCRIPT_EXTENSIONS.iter().any(|ext| "orders.quest".ends_with(ext)));
/// ```
pub const SCRIPT_EXTENSIONS: [&str; 2] = [".quest", ".ql"];

/// Longest run of consecutive blank lines kept by script preprocessing.
///
/// # Examples
/// ```
/// use config::constants::MAX_CONSECUTIVE_BLANK_LINES;
/// assert_eq!(MAX_CONSECUTIVE_BLANK_LINES, 1);
/// ```
pub const MAX_CONSECUTIVE_BLANK_LINES: usize = 1;

/// Default limit on statement/expression nesting accepted by the parser.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MAX_NESTING_DEPTH;
/// assert!(DEFAULT_MAX_NESTING_DEPTH >= 64);
/// ```
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Upper bound accepted for [`QuestConfig::max_nesting_depth`].
pub const MAX_NESTING_DEPTH_LIMIT: usize = 4096;

/// Immutable snapshot of pipeline settings that can be shared between crates.
///
/// # Examples
/// ```
/// use config::constants::QuestConfig;
/// let config = QuestConfig::default();
/// assert!(!config.pad_double_space_tokens);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestConfig {
    /// Render `:` and `.` tokens with a space on both sides.
    pub pad_double_space_tokens: bool,
    /// Deepest statement/expression nesting the parser accepts.
    pub max_nesting_depth: usize,
}

impl QuestConfig {
    /// Builds a configuration enforcing strict validation of the nesting limit.
    ///
    /// # Examples
    /// ```
    /// use config::constants::QuestConfig;
    /// let cfg = QuestConfig::new(true, 128).expect("valid config");
    /// assert_eq!(cfg.max_nesting_depth, 128);
    /// ```
    pub fn new(pad_double_space_tokens: bool, max_nesting_depth: usize) -> Result<Self, ConfigError> {
        if max_nesting_depth == 0 || max_nesting_depth > MAX_NESTING_DEPTH_LIMIT {
            return Err(ConfigError::InvalidNestingDepth(max_nesting_depth));
        }
        Ok(Self {
            pad_double_space_tokens,
            max_nesting_depth,
        })
    }
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            pad_double_space_tokens: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl fmt::Display for QuestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pad_double_space_tokens={}, max_nesting_depth={}",
            self.pad_double_space_tokens, self.max_nesting_depth
        )
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the nesting limit is zero or above [`MAX_NESTING_DEPTH_LIMIT`].
    InvalidNestingDepth(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNestingDepth(value) => {
                write!(f, "max_nesting_depth must be in 1..={MAX_NESTING_DEPTH_LIMIT}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
