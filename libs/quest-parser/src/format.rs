//! # Script Preprocessing
//!
//! Normalizes script text before lexing: runs of blank lines collapse to a
//! single blank line and the text always ends with a newline.
//!
//! ## Example
//!
//! ```rust
//! use quest_parser::format_script;
//!
//! assert_eq!(format_script("a\n\n\n\nb"), "a\n\nb\n");
//! ```

use config::constants::MAX_CONSECUTIVE_BLANK_LINES;

/// Collapse blank-line runs and guarantee a trailing newline.
///
/// A run of whitespace containing more than `MAX_CONSECUTIVE_BLANK_LINES + 1`
/// newlines is replaced by exactly that many newlines; indentation after the
/// last newline of the run is kept.
pub fn format_script(source: &str) -> String {
    let keep = MAX_CONSECUTIVE_BLANK_LINES + 1;
    let mut out = String::with_capacity(source.len() + 1);
    let mut rest = source;

    while let Some(at) = rest.find('\n') {
        out.push_str(&rest[..at]);
        let run = &rest[at..];
        let run_len = run.find(|c: char| !c.is_whitespace()).unwrap_or(run.len());
        let whitespace = &run[..run_len];
        let newlines = whitespace.matches('\n').count();

        if newlines > keep {
            // Resume right after the last newline of the run.
            let last_newline = whitespace.rfind('\n').unwrap_or(0);
            out.extend(std::iter::repeat('\n').take(keep));
            rest = &run[last_newline + 1..];
        } else {
            out.push_str(whitespace);
            rest = &run[run_len..];
        }
    }
    out.push_str(rest);

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_trailing_newline() {
        assert_eq!(format_script("process p {}"), "process p {}\n");
        assert_eq!(format_script("process p {}\n"), "process p {}\n");
        assert_eq!(format_script(""), "\n");
    }

    #[test]
    fn test_keeps_single_blank_line() {
        assert_eq!(format_script("a\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_collapses_blank_runs() {
        assert_eq!(format_script("a\n\n\n\n\nb"), "a\n\nb\n");
        assert_eq!(format_script("a\n  \n\t\n    b"), "a\n\n    b\n");
    }

    #[test]
    fn test_is_idempotent() {
        let once = format_script("x\n\n\n\ny\n\n\n");
        assert_eq!(format_script(&once), once);
    }

    #[test]
    fn test_preserves_multibyte_text() {
        assert_eq!(format_script("`订单`\n\n\n\n流程"), "`订单`\n\n流程\n");
    }
}
