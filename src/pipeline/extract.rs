//! Text-layer extraction behind a narrow trait seam.
//!
//! The pipeline needs exactly two things from a PDF library: the page count
//! and the whole text layer as one string. [`TextExtractor`] opens a document
//! and returns an [`ExtractionHandle`]; [`HandleGuard`] owns that handle and
//! calls [`ExtractionHandle::close`] exactly once when it goes out of scope,
//! whichever way the conversion exits.
//!
//! [`PdfiumExtractor`] is the production implementation. pdfium keeps
//! thread-local state and blocks, so async callers run it on the blocking
//! thread pool (see [`crate::convert::convert`]).

use crate::config::ConversionConfig;
use crate::error::ConversionError;
use once_cell::sync::OnceCell;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Page count and descriptive metadata of an opened document.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentInfo {
    pub total_pages: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
}

/// An open document session. Must be released with [`close`](Self::close).
pub trait ExtractionHandle {
    fn info(&self) -> Result<DocumentInfo, ConversionError>;

    /// The full text layer, with embedded line breaks.
    fn text(&self) -> Result<String, ConversionError>;

    /// Release the underlying document. Called once, by [`HandleGuard`].
    fn close(&mut self);
}

/// Opens documents from raw bytes.
pub trait TextExtractor {
    fn open<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Box<dyn ExtractionHandle + 'a>, ConversionError>;
}

/// Scoped owner of an open handle; closes it on drop.
pub struct HandleGuard<'a> {
    handle: Box<dyn ExtractionHandle + 'a>,
}

impl<'a> HandleGuard<'a> {
    /// Open `bytes` with `extractor` and guard the resulting handle.
    pub fn open(
        extractor: &'a dyn TextExtractor,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Self, ConversionError> {
        let handle = extractor.open(bytes, password)?;
        Ok(Self { handle })
    }

    pub fn info(&self) -> Result<DocumentInfo, ConversionError> {
        self.handle.info()
    }

    pub fn text(&self) -> Result<String, ConversionError> {
        self.handle.text()
    }
}

impl Drop for HandleGuard<'_> {
    fn drop(&mut self) {
        self.handle.close();
        debug!("Extraction handle released");
    }
}

// ── pdfium ───────────────────────────────────────────────────────────────────

/// [`TextExtractor`] backed by the pdfium library via `pdfium-render`.
///
/// The library is bound lazily on the first [`open`](TextExtractor::open) so
/// a binding failure surfaces as a conversion error like any other.
pub struct PdfiumExtractor {
    library_path: Option<PathBuf>,
    pdfium: OnceCell<Pdfium>,
}

impl PdfiumExtractor {
    pub fn new(library_path: Option<PathBuf>) -> Self {
        Self {
            library_path,
            pdfium: OnceCell::new(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.pdfium_library_path.clone())
    }

    fn pdfium(&self) -> Result<&Pdfium, ConversionError> {
        self.pdfium
            .get_or_try_init(|| bind_pdfium(self.library_path.as_deref()))
    }
}

fn bind_pdfium(library_path: Option<&Path>) -> Result<Pdfium, ConversionError> {
    let bindings = match library_path {
        Some(path) if path.is_dir() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(path))
        }
        Some(path) => Pdfium::bind_to_library(path),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| ConversionError::ExtractorUnavailable(format!("{:?}", e)))?;

    info!(
        "Bound pdfium from {}",
        library_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "system library".into())
    );
    Ok(Pdfium::new(bindings))
}

impl TextExtractor for PdfiumExtractor {
    fn open<'a>(
        &'a self,
        bytes: &'a [u8],
        password: Option<&'a str>,
    ) -> Result<Box<dyn ExtractionHandle + 'a>, ConversionError> {
        let pdfium = self.pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, password)
            .map_err(|e| {
                let detail = format!("{:?}", e);
                if detail.contains("Password") || detail.contains("password") {
                    if password.is_some() {
                        ConversionError::WrongPassword
                    } else {
                        ConversionError::PasswordRequired
                    }
                } else {
                    ConversionError::extraction(detail)
                }
            })?;

        debug!("Opened PDF ({} bytes)", bytes.len());
        Ok(Box::new(PdfiumHandle {
            document: Some(document),
        }))
    }
}

struct PdfiumHandle<'a> {
    document: Option<PdfDocument<'a>>,
}

impl<'a> PdfiumHandle<'a> {
    fn document(&self) -> Result<&PdfDocument<'a>, ConversionError> {
        self.document
            .as_ref()
            .ok_or_else(|| ConversionError::Internal("PDF handle used after close".into()))
    }
}

impl ExtractionHandle for PdfiumHandle<'_> {
    fn info(&self) -> Result<DocumentInfo, ConversionError> {
        let document = self.document()?;
        let metadata = document.metadata();

        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata.get(tag).and_then(|t| {
                let v = t.value().to_string();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
        };

        Ok(DocumentInfo {
            total_pages: document.pages().len() as u32,
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
        })
    }

    fn text(&self) -> Result<String, ConversionError> {
        let document = self.document()?;
        let mut pages_text = Vec::new();

        for (idx, page) in document.pages().iter().enumerate() {
            match page.text() {
                Ok(text) => pages_text.push(text.all()),
                Err(e) => {
                    warn!("No text layer on page {}: {:?}", idx + 1, e);
                    pages_text.push(String::new());
                }
            }
        }

        Ok(pages_text.join("\n\n"))
    }

    fn close(&mut self) {
        self.document.take();
    }
}
