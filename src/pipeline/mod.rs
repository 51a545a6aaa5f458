//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements exactly one step and is independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ classify ──▶ transform ──▶ postprocess ──▶ tables
//! (URL/path) (pdfium)   (per line)   (per line)    (spacing)       (tab runs)
//!                        └──────────────── assemble ───────────────┘
//! ```
//!
//! 1. [`input`]: load the user-supplied path or URL into memory
//! 2. [`extract`]: page count and text layer through the [`extract::TextExtractor`] seam
//! 3. [`classify`]: heading / list / plain / blank decision with one line of lookahead
//! 4. [`transform`]: Markdown rendering of a classified line, plus the emphasis hook
//! 5. [`postprocess`]: line-ending and blank-line normalisation
//! 6. [`tables`]: tab-delimited runs become GFM tables
//! 7. [`assemble`]: title line + stages 3–6 over the whole text

pub mod assemble;
pub mod classify;
pub mod extract;
pub mod input;
pub mod postprocess;
pub mod tables;
pub mod transform;
