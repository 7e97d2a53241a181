//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// STACK TESTS
// =============================================================================

#[test]
fn test_red_zone_smaller_than_stack() {
    assert!(
        STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES,
        "red zone must leave room in the grown segment"
    );
    assert!(STACKER_RED_ZONE_BYTES >= 64 * 1024);
}

// =============================================================================
// SCRIPT TESTS
// =============================================================================

#[test]
fn test_script_extensions_have_leading_dot() {
    for ext in SCRIPT_EXTENSIONS {
        assert!(ext.starts_with('.'), "{ext} should start with a dot");
    }
}

#[test]
fn test_blank_line_limit_keeps_paragraphs() {
    assert!(MAX_CONSECUTIVE_BLANK_LINES >= 1);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_default_nesting_within_limit() {
    assert!(DEFAULT_MAX_NESTING_DEPTH <= MAX_NESTING_DEPTH_LIMIT);
}
