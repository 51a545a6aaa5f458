//! Post-processing: deterministic whitespace rules applied to the text layer
//! and to the rendered Markdown.
//!
//! Each rule is a pure `&str → String` function and is independently
//! testable.

use once_cell::sync::Lazy;
use regex::Regex;

// ── Line endings ─────────────────────────────────────────────────────────────

/// CRLF and lone CR become LF. pdfium separates text-layer lines with `\r\n`.
pub fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Paragraph spacing ────────────────────────────────────────────────────────

static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse every run of 3+ newlines to exactly two (one blank line).
///
/// Idempotent: `collapse_blank_lines(collapse_blank_lines(x)) == collapse_blank_lines(x)`.
pub fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_RUN.replace_all(input, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn two_newlines_untouched() {
        assert_eq!(collapse_blank_lines("a\n\nb\nc"), "a\n\nb\nc");
    }

    #[test]
    fn collapse_is_idempotent() {
        for input in ["", "\n\n\n", "x\n\n\n\ny\n\n\n\n\n\nz\n", "a\nb", "\n\n\n\n\n"] {
            let once = collapse_blank_lines(input);
            assert_eq!(collapse_blank_lines(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn whitespace_only_lines_are_not_collapsed() {
        // Lines holding spaces are content as far as this rule is concerned.
        assert_eq!(collapse_blank_lines("a\n \n\nb"), "a\n \n\nb");
    }
}
