//! Table reconstruction from tab-delimited lines.
//!
//! Once layout metadata is gone, a tab is the only reliable column signal in
//! the text layer. A run of two or more consecutive lines that contain a tab
//! becomes a GFM table: the first line is the header, a `---` separator row
//! follows with one cell per header column, and every following tabbed line
//! is a body row. Rows keep their own cell count; ragged tables are emitted
//! as-is rather than padded or truncated.

use crate::pipeline::classify::{table_cells, LineClassification};
use crate::pipeline::transform::render;
use tracing::debug;

/// A header row plus at least one body row, contiguous in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TableBlock {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableBlock {
    fn into_markdown(self, out: &mut Vec<String>) {
        let separator = vec!["---".to_string(); self.header.len()];
        out.push(render("", &LineClassification::TableRow(self.header)));
        out.push(render("", &LineClassification::TableRow(separator)));
        for row in self.rows {
            out.push(render("", &LineClassification::TableRow(row)));
        }
    }
}

/// Replace every run of ≥2 tab-containing lines with a Markdown table.
///
/// Single forward pass. Lines outside table blocks, blank lines included,
/// are copied unchanged.
pub fn reconstruct<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 4);
    let mut i = 0;

    while i < lines.len() {
        if let Some((block, consumed)) = table_at(lines, i) {
            debug!(
                "Table block at line {}: {} columns, {} rows",
                i + 1,
                block.header.len(),
                block.rows.len()
            );
            block.into_markdown(&mut out);
            i += consumed;
            continue;
        }

        out.push(lines[i].as_ref().to_string());
        i += 1;
    }

    out
}

/// Try to start a table block at `start`; returns the block and the number
/// of lines it consumed.
fn table_at<S: AsRef<str>>(lines: &[S], start: usize) -> Option<(TableBlock, usize)> {
    let next = lines.get(start + 1)?;
    if !next.as_ref().contains('\t') {
        return None;
    }

    let header = table_cells(lines[start].as_ref())?;
    if header.len() < 2 {
        return None;
    }

    let rows: Vec<Vec<String>> = lines[start + 1..]
        .iter()
        .map_while(|line| table_cells(line.as_ref()))
        .collect();
    let consumed = 1 + rows.len();

    Some((TableBlock { header, rows }, consumed))
}
