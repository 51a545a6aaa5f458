//! # pdf2md-text
//!
//! Rebuild a Markdown document from the text layer of a PDF.
//!
//! The extracted text is a flat stream of lines with no font or position
//! information. This crate recovers a plausible structure from it with
//! line-level heuristics: upper-case or isolated lines become headings,
//! bullet and numbered prefixes become Markdown lists, and runs of
//! tab-delimited lines become GFM tables. The document is titled after the
//! source file name.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     resolve local file or download from URL
//!  ├─ 2. Extract   page count + full text layer via pdfium (spawn_blocking)
//!  ├─ 3. Classify  heading / list / plain / blank, one line of lookahead
//!  ├─ 4. Render    prefix injection, bullet and number normalisation
//!  ├─ 5. Space     collapse runs of blank lines
//!  ├─ 6. Tables    tab-delimited runs → GFM tables
//!  └─ 7. Output    "# title" + body, `.pdf` → `.md` file name
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2md_text::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let doc = convert("document.pdf", &config).await?;
//!     println!("{}", doc.markdown);
//!     eprintln!("{} pages → {}", doc.total_pages, doc.file_name);
//!     Ok(())
//! }
//! ```
//!
//! The reconstruction itself needs no PDF library:
//!
//! ```rust
//! let md = pdf2md_text::assemble("SUMMARY\n\n• point one", "report.pdf");
//! assert_eq!(md, "# report\n\n## SUMMARY\n\n- point one");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2md` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{
    convert, convert_bytes, convert_from_bytes, convert_sync, convert_to_file, inspect,
};
pub use error::ConversionError;
pub use output::{InspectOutput, MarkdownDocument};
pub use pipeline::assemble::{assemble, assemble_with, document_title, output_file_name};
pub use pipeline::classify::{classify, HeadingLevel, LineClassification, ListKind};
pub use pipeline::extract::{DocumentInfo, ExtractionHandle, PdfiumExtractor, TextExtractor};
pub use pipeline::tables::reconstruct;
pub use pipeline::transform::{render, PassthroughStyle, StyleAnnotator};
pub use progress::{
    ConversionProgressCallback, NoopProgressCallback, ProgressCallback, ProgressEvent,
    ProgressStatus,
};
