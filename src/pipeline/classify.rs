//! Line classification: assign each extracted line a structural category.
//!
//! The text layer carries no font or position metadata, so structure is
//! guessed from the characters of a line and whether the next line is blank.
//! Rules are evaluated in order and the first match wins:
//!
//! 1. blank after trimming                                → [`LineClassification::Blank`]
//! 2. 4–99 chars of `A-Z`, `0-9` and spaces               → heading
//! 3. under 100 chars and followed by a blank line        → heading
//! 4. `•`/`-`/`*` bullet or `12.`/`12)` number prefix     → list item
//! 5. anything else                                       → [`LineClassification::Plain`]
//!
//! Tab-delimited rows are not decided here; see [`crate::pipeline::tables`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown heading depth. Level 1 is reserved for the document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    /// Number of `#` characters.
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    /// The numeric value of the prefix, saturating at `u32::MAX`.
    Numbered(u32),
}

/// Structural category of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClassification {
    Heading(HeadingLevel),
    ListItem(ListKind),
    /// Trimmed cells of a tab-delimited row.
    TableRow(Vec<String>),
    Plain,
    Blank,
}

static RE_CAPS_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9 ]+$").unwrap());
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-*]\s").unwrap());
static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)[.)]\s").unwrap());

const MAX_HEADING_CHARS: usize = 100;
const MIN_CAPS_HEADING_CHARS: usize = 3;
const H2_MAX_CHARS: usize = 30;

/// Classify `line`, looking at most one line ahead.
///
/// `line` is not modified; callers render the original text together with
/// the returned classification.
pub fn classify(line: &str, next_line: Option<&str>) -> LineClassification {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineClassification::Blank;
    }

    if is_heading(trimmed, next_line) {
        return LineClassification::Heading(heading_level(trimmed));
    }

    if let Some(kind) = list_kind(trimmed) {
        return LineClassification::ListItem(kind);
    }

    LineClassification::Plain
}

fn is_heading(trimmed: &str, next_line: Option<&str>) -> bool {
    let len = trimmed.chars().count();

    let all_caps = len > MIN_CAPS_HEADING_CHARS
        && len < MAX_HEADING_CHARS
        && is_uppercase(trimmed)
        && RE_CAPS_HEADING.is_match(trimmed);
    if all_caps {
        return true;
    }

    matches!(next_line, Some(next) if next.trim().is_empty()) && len < MAX_HEADING_CHARS
}

/// Level depends only on the text, not on which heading rule matched.
fn heading_level(trimmed: &str) -> HeadingLevel {
    if trimmed.chars().count() < H2_MAX_CHARS && is_uppercase(trimmed) {
        HeadingLevel::H2
    } else {
        HeadingLevel::H3
    }
}

fn is_uppercase(s: &str) -> bool {
    s.to_uppercase() == s
}

fn list_kind(trimmed: &str) -> Option<ListKind> {
    if RE_BULLET.is_match(trimmed) {
        return Some(ListKind::Bullet);
    }
    RE_NUMBERED.captures(trimmed).map(|caps| {
        let n = caps[1].parse::<u32>().unwrap_or(u32::MAX);
        ListKind::Numbered(n)
    })
}

/// Split a tab-delimited line into trimmed cells.
///
/// Returns `None` when the line has no tab.
pub fn table_cells(line: &str) -> Option<Vec<String>> {
    if !line.contains('\t') {
        return None;
    }
    Some(line.split('\t').map(|c| c.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use LineClassification::*;

    #[test]
    fn blank_lines() {
        for line in ["", "   ", "\t", " \t  "] {
            assert_eq!(classify(line, None), Blank, "line {line:?}");
            assert_eq!(classify(line, Some("NEXT")), Blank, "line {line:?}");
        }
    }

    #[test]
    fn all_caps_heading_short_is_h2() {
        assert_eq!(classify("SUMMARY", Some("text")), Heading(HeadingLevel::H2));
        assert_eq!(classify("  CHAPTER 2  ", None), Heading(HeadingLevel::H2));
    }

    #[test]
    fn all_caps_heading_long_is_h3() {
        let line = "THIS IS A VERY LONG UPPERCASE SECTION TITLE";
        assert!(line.len() >= 30);
        assert_eq!(classify(line, None), Heading(HeadingLevel::H3));
    }

    #[test]
    fn all_caps_needs_more_than_three_chars() {
        assert_eq!(classify("ABC", Some("more")), Plain);
        assert_eq!(classify("ABCD", Some("more")), Heading(HeadingLevel::H2));
    }

    #[test]
    fn short_line_heading_by_isolation() {
        assert_eq!(classify("AB", Some("")), Heading(HeadingLevel::H2));
        assert_eq!(classify("Intro", Some("  ")), Heading(HeadingLevel::H3));
    }

    #[test]
    fn all_caps_rejects_punctuation() {
        assert_eq!(classify("NOTE: READ THIS", Some("body")), Plain);
        assert_eq!(
            classify("NOTE: READ THIS", Some("")),
            Heading(HeadingLevel::H2)
        );
    }

    #[test]
    fn all_caps_rejects_tabs() {
        assert_eq!(classify("NAME\tAGE", Some("BOB\t42")), Plain);
    }

    #[test]
    fn one_hundred_chars_is_never_heading() {
        let line = "A".repeat(100);
        assert_eq!(classify(&line, Some("")), Plain);
        let line = "A".repeat(99);
        assert_eq!(classify(&line, None), Heading(HeadingLevel::H3));
    }

    #[test]
    fn isolation_mixed_case_is_h3_even_when_short() {
        assert_eq!(classify("Results", Some("")), Heading(HeadingLevel::H3));
    }

    #[test]
    fn isolation_needs_a_next_line() {
        assert_eq!(classify("Last line of the document.", None), Plain);
    }

    #[test]
    fn bullets() {
        assert_eq!(classify("• item", None), ListItem(ListKind::Bullet));
        assert_eq!(classify("- item", None), ListItem(ListKind::Bullet));
        assert_eq!(classify("* item", None), ListItem(ListKind::Bullet));
        assert_eq!(classify("  • indented", None), ListItem(ListKind::Bullet));
        assert_eq!(classify("-item", None), Plain);
    }

    #[test]
    fn numbered() {
        assert_eq!(classify("1. first", None), ListItem(ListKind::Numbered(1)));
        assert_eq!(classify("12) twelfth", None), ListItem(ListKind::Numbered(12)));
        assert_eq!(classify("3.14 is pi", None), Plain);
        assert_eq!(
            classify("99999999999. huge", None),
            ListItem(ListKind::Numbered(u32::MAX))
        );
    }

    #[test]
    fn numbered_prefix_is_ascii_digits_only() {
        assert_eq!(classify("١) arabic-indic one", None), Plain);
        assert_eq!(classify("２. fullwidth two", None), Plain);
        assert_eq!(classify("٣.", None), Plain);
    }

    #[test]
    fn heading_rule_wins_over_list_rule() {
        assert_eq!(classify("- item", Some("")), Heading(HeadingLevel::H3));
    }

    #[test]
    fn numeric_only_line_is_caps_heading() {
        assert_eq!(classify("2024", Some("x")), Heading(HeadingLevel::H2));
    }

    #[test]
    fn splits_table_cells() {
        assert_eq!(
            table_cells(" A \t B\tC "),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
        assert_eq!(table_cells("no tabs here"), None);
    }
}
