//! Error types for the pdf2md-text library.
//!
//! Conversion is all-or-nothing: the caller receives either a complete
//! [`crate::output::MarkdownDocument`] or a single [`ConversionError`]. The
//! Markdown reconstruction stages are total, so every variant here originates
//! in input resolution, text extraction, or output writing.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2md-text library.
#[derive(Debug, Error)]
pub enum ConversionError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The extractor could not open, parse, or read the document.
    #[error("PDF conversion failed: {detail}")]
    ExtractionFailed { detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install pdfium for your platform, or point to an existing copy with\n\
  --pdfium-lib /path/to/libpdfium  (or PDFIUM_LIB_PATH).\n"
    )]
    ExtractorUnavailable(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConversionError {
    /// Shorthand for wrapping an extractor failure message.
    pub fn extraction(detail: impl Into<String>) -> Self {
        ConversionError::ExtractionFailed {
            detail: detail.into(),
        }
    }

    /// The message carried by an `Error` progress event.
    ///
    /// For extraction failures this is the underlying detail alone, without
    /// the `PDF conversion failed:` prefix the `Display` impl adds.
    pub fn message(&self) -> String {
        match self {
            ConversionError::ExtractionFailed { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failed_display_wraps_detail() {
        let e = ConversionError::extraction("Invalid PDF structure");
        assert_eq!(e.to_string(), "PDF conversion failed: Invalid PDF structure");
        assert_eq!(e.message(), "Invalid PDF structure");
    }

    #[test]
    fn not_a_pdf_display_includes_magic() {
        let e = ConversionError::NotAPdf {
            path: PathBuf::from("/tmp/x.pdf"),
            magic: *b"GIF8",
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/x.pdf"), "got: {msg}");
        assert!(msg.contains("71"), "got: {msg}");
    }

    #[test]
    fn message_falls_back_to_display() {
        let e = ConversionError::InvalidConfig("page delay too large".into());
        assert_eq!(e.message(), e.to_string());
    }

    #[test]
    fn output_write_failed_has_source() {
        use std::error::Error as _;
        let e = ConversionError::OutputWriteFailed {
            path: PathBuf::from("out.md"),
            source: std::io::Error::other("disk full"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("disk full"));
    }
}
