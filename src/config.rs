//! Configuration types for PDF-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Every value the extraction call needs
//! (pdfium location, password, pacing) travels in this struct, so nothing is
//! configured through process-wide state.

use crate::error::ConversionError;
use crate::pipeline::transform::{PassthroughStyle, StyleAnnotator};
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Upper bound for [`ConversionConfig::page_delay_ms`].
pub const MAX_PAGE_DELAY_MS: u64 = 5_000;

/// Configuration for a PDF-to-Markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2md_text::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .pdfium_library_path("/opt/pdfium/lib")
///     .page_delay_ms(100)
///     .build()
///     .unwrap();
/// assert_eq!(config.page_delay_ms, 100);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Directory containing the pdfium shared library, or the library file
    /// itself. `None` binds to the system library. Default: `None`.
    pub pdfium_library_path: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Delay between synthetic per-page `Processing` events. Default: 0.
    ///
    /// Purely cosmetic: the text is already extracted when these events fire.
    /// A UI that wants a visibly advancing bar can set ~100 ms.
    pub page_delay_ms: u64,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Optional progress sink.
    pub progress_callback: Option<ProgressCallback>,

    /// Bold/italic hook applied to every rendered line. Default: no-op.
    pub style_annotator: Arc<dyn StyleAnnotator>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pdfium_library_path: None,
            password: None,
            page_delay_ms: 0,
            download_timeout_secs: 120,
            progress_callback: None,
            style_annotator: Arc::new(PassthroughStyle),
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("page_delay_ms", &self.page_delay_ms)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .field("style_annotator", &"<dyn StyleAnnotator>")
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn page_delay_ms(mut self, ms: u64) -> Self {
        self.config.page_delay_ms = ms.min(MAX_PAGE_DELAY_MS);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn style_annotator(mut self, annotator: Arc<dyn StyleAnnotator>) -> Self {
        self.config.style_annotator = annotator;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConversionError> {
        let c = &self.config;
        if c.download_timeout_secs == 0 {
            return Err(ConversionError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        if let Some(ref p) = c.pdfium_library_path {
            if p.as_os_str().is_empty() {
                return Err(ConversionError::InvalidConfig(
                    "pdfium library path must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ConversionConfig::default();
        assert!(c.pdfium_library_path.is_none());
        assert_eq!(c.page_delay_ms, 0);
        assert_eq!(c.download_timeout_secs, 120);
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn page_delay_is_capped() {
        let c = ConversionConfig::builder()
            .page_delay_ms(60_000)
            .build()
            .unwrap();
        assert_eq!(c.page_delay_ms, MAX_PAGE_DELAY_MS);
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = ConversionConfig::builder()
            .download_timeout_secs(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidConfig(_)));
    }

    #[test]
    fn empty_library_path_rejected() {
        let err = ConversionConfig::builder()
            .pdfium_library_path("")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("pdfium"));
    }

    #[test]
    fn debug_redacts_password() {
        let c = ConversionConfig::builder()
            .password("hunter2")
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"), "got: {dbg}");
        assert!(dbg.contains("<redacted>"));
    }
}
