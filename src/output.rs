//! Conversion result types.

use crate::pipeline::extract::DocumentInfo;
use serde::{Deserialize, Serialize};

/// The finished Markdown document returned by every `convert*` entry point.
///
/// Built once per conversion and handed to the caller; the library never
/// returns a partially populated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownDocument {
    /// Full Markdown text, starting with the `# title` line.
    pub markdown: String,
    /// Page count reported by the extractor.
    pub total_pages: u32,
    /// Source name with `.pdf` replaced by `.md`.
    pub file_name: String,
}

/// Result of [`crate::convert::inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectOutput {
    pub file_name: String,
    pub size_bytes: usize,
    #[serde(flatten)]
    pub info: DocumentInfo,
}
