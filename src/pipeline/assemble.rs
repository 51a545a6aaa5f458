//! Document assembly: run the whole reconstruction over an extracted text layer.
//!
//! ```text
//! raw text ──▶ split ──▶ classify + render ──▶ collapse spacing ──▶ tables ──▶ "# title\n\n" + body
//! ```
//!
//! Tables are rebuilt *after* line rendering, on the rendered text. Rendering
//! never touches tab characters, so a tabbed line that was also rendered as a
//! list item or heading is still recognised as a table row.

use crate::pipeline::classify::classify;
use crate::pipeline::postprocess::{collapse_blank_lines, normalise_line_endings};
use crate::pipeline::tables;
use crate::pipeline::transform::{render, PassthroughStyle, StyleAnnotator};
use tracing::debug;

/// Assemble a Markdown document from `raw_text`, titled after `title_source`.
pub fn assemble(raw_text: &str, title_source: &str) -> String {
    assemble_with(raw_text, title_source, &PassthroughStyle)
}

/// [`assemble`] with a custom emphasis hook.
pub fn assemble_with(raw_text: &str, title_source: &str, style: &dyn StyleAnnotator) -> String {
    let mut markdown = format!("# {}\n\n", document_title(title_source));
    markdown.push_str(&format_body(raw_text, style));
    markdown
}

/// Everything below the title heading.
pub fn format_body(raw_text: &str, style: &dyn StyleAnnotator) -> String {
    let text = normalise_line_endings(raw_text);
    let lines: Vec<&str> = text.split('\n').collect();

    let rendered: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let class = classify(line, lines.get(i + 1).copied());
            style.annotate(render(line, &class))
        })
        .collect();
    debug!("Rendered {} lines", rendered.len());

    let spaced = collapse_blank_lines(&rendered.join("\n"));
    let spaced_lines: Vec<&str> = spaced.split('\n').collect();
    tables::reconstruct(&spaced_lines).join("\n")
}

/// Title derived from a file name: a trailing `.pdf` (any case) is dropped.
pub fn document_title(file_name: &str) -> &str {
    strip_pdf_extension(file_name).unwrap_or(file_name)
}

/// Output file name: `report.pdf` → `report.md`, `notes` → `notes.md`.
pub fn output_file_name(file_name: &str) -> String {
    format!("{}.md", document_title(file_name))
}

fn strip_pdf_extension(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(4)?;
    let (stem, ext) = (name.get(..split)?, name.get(split..)?);
    ext.eq_ignore_ascii_case(".pdf").then_some(stem)
}
