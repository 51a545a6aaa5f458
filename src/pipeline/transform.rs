//! Line rendering: turn a classified line into its Markdown form.
//!
//! [`render`] is pure and total. Bold/italic cannot be detected from a bare
//! text layer, so emphasis goes through the [`StyleAnnotator`] hook instead,
//! which is a no-op ([`PassthroughStyle`]) unless a caller supplies one.

use crate::pipeline::classify::{LineClassification, ListKind};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_GLYPH_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^•\s").unwrap());
static RE_NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)[.)]\s").unwrap());

/// Render `line` as Markdown according to `classification`.
pub fn render(line: &str, classification: &LineClassification) -> String {
    match classification {
        LineClassification::Blank => String::new(),
        LineClassification::Heading(level) => {
            format!("{} {}", "#".repeat(level.depth()), line.trim())
        }
        LineClassification::ListItem(ListKind::Bullet) => {
            RE_GLYPH_BULLET.replace(line.trim(), "- ").into_owned()
        }
        LineClassification::ListItem(ListKind::Numbered(_)) => RE_NUMBER_PREFIX
            .replace(line.trim(), "${1}. ")
            .into_owned(),
        LineClassification::TableRow(cells) => table_row(cells),
        LineClassification::Plain => line.to_string(),
    }
}

/// `| c1 | c2 | ... |`
fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Hook points for emphasis markup.
///
/// Both methods receive an already rendered line and return it with any
/// `**bold**` / `*italic*` markup applied. The defaults return the line
/// untouched.
pub trait StyleAnnotator: Send + Sync {
    fn bold(&self, line: String) -> String {
        line
    }

    fn italic(&self, line: String) -> String {
        line
    }

    /// Apply both hooks, bold first.
    fn annotate(&self, line: String) -> String {
        self.italic(self.bold(line))
    }
}

/// The default [`StyleAnnotator`]: leaves every line as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughStyle;

impl StyleAnnotator for PassthroughStyle {}
