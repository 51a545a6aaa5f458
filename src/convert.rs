//! Conversion entry points.
//!
//! [`convert_bytes`] is the synchronous core: it opens the document through a
//! [`TextExtractor`], emits progress events, and assembles the Markdown. The
//! async functions resolve a path or URL first and run pdfium on the blocking
//! thread pool, since it is neither async-aware nor cheap.
//!
//! ## Progress contract
//!
//! With a callback configured, one conversion emits one `Processing` event per
//! page, then exactly one `Completed` *or* `Error` event. The extraction
//! handle is closed before the terminal event fires.

use crate::config::ConversionConfig;
use crate::error::ConversionError;
use crate::output::{InspectOutput, MarkdownDocument};
use crate::pipeline::assemble::{assemble_with, output_file_name};
use crate::pipeline::extract::{HandleGuard, PdfiumExtractor, TextExtractor};
use crate::pipeline::input::{self, ResolvedInput};
use crate::progress::ProgressEvent;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Convert in-memory PDF bytes to Markdown using `extractor`.
///
/// # Errors
/// Any failure to open or read the document. No partial Markdown is ever
/// returned; an empty document converts to a title-only Markdown file.
pub fn convert_bytes(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    file_name: &str,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    let doc = convert_until_complete(extractor, bytes, file_name, config)?;
    notify(config, ProgressEvent::completed(doc.total_pages));
    Ok(doc)
}

/// [`convert_bytes`] without the final `Completed` event.
///
/// Failures are still reported to the progress sink.
fn convert_until_complete(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    file_name: &str,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    let start = Instant::now();
    info!("Starting conversion: {}", file_name);

    let mut total_pages = 0;
    match extract_and_assemble(extractor, bytes, file_name, config, &mut total_pages) {
        Ok(doc) => {
            info!(
                "Conversion complete: {} pages, {} bytes of Markdown, {}ms",
                doc.total_pages,
                doc.markdown.len(),
                start.elapsed().as_millis()
            );
            Ok(doc)
        }
        Err(e) => Err(fail(config, total_pages, e)),
    }
}

/// Convert and write the Markdown to `path`. `Completed` fires only once the
/// file is in place; a failed write is reported as the terminal `Error`.
fn convert_bytes_to_file(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    file_name: &str,
    path: &Path,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    let doc = convert_until_complete(extractor, bytes, file_name, config)?;
    write_atomic(path, &doc.markdown).map_err(|e| fail(config, doc.total_pages, e))?;
    notify(config, ProgressEvent::completed(doc.total_pages));
    Ok(doc)
}

fn extract_and_assemble(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    file_name: &str,
    config: &ConversionConfig,
    total_pages: &mut u32,
) -> Result<MarkdownDocument, ConversionError> {
    let text = {
        let handle = HandleGuard::open(extractor, bytes, config.password.as_deref())?;
        let doc_info = handle.info()?;
        *total_pages = doc_info.total_pages;
        info!("PDF has {} pages", doc_info.total_pages);
        handle.text()?
    };
    debug!("Extracted {} chars of text", text.len());

    emit_page_events(config, *total_pages);

    let markdown = assemble_with(&text, file_name, config.style_annotator.as_ref());

    Ok(MarkdownDocument {
        markdown,
        total_pages: *total_pages,
        file_name: output_file_name(file_name),
    })
}

/// Synthetic per-page pacing events.
fn emit_page_events(config: &ConversionConfig, total_pages: u32) {
    let Some(ref cb) = config.progress_callback else {
        return;
    };
    let delay = Duration::from_millis(config.page_delay_ms);
    for page in 1..=total_pages {
        cb.on_progress(&ProgressEvent::processing(page, total_pages));
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

fn notify(config: &ConversionConfig, event: ProgressEvent) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_progress(&event);
    }
}

/// Report `err` to the progress sink and hand it back for propagation.
fn fail(config: &ConversionConfig, total_pages: u32, err: ConversionError) -> ConversionError {
    warn!("Conversion failed: {}", err);
    notify(config, ProgressEvent::error(total_pages, err.message()));
    err
}

/// Convert a PDF file or URL to Markdown.
///
/// This is the primary entry point for the library. The PDF is parsed with
/// pdfium, located via [`ConversionConfig::pdfium_library_path`].
///
/// # Example
/// ```rust,no_run
/// use pdf2md_text::{convert, ConversionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = convert("report.pdf", &ConversionConfig::default()).await?;
/// assert_eq!(doc.file_name, "report.md");
/// println!("{}", doc.markdown);
/// # Ok(())
/// # }
/// ```
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    let resolved = input::resolve_input(input_str.as_ref(), config.download_timeout_secs)
        .await
        .map_err(|e| fail(config, 0, e))?;
    let ResolvedInput { bytes, file_name } = resolved;
    convert_from_bytes(bytes, file_name, config).await
}

/// Convert owned PDF bytes, running pdfium on the blocking thread pool.
///
/// Use this when the PDF arrives from an upload or a database rather than
/// a path.
pub async fn convert_from_bytes(
    bytes: Vec<u8>,
    file_name: impl Into<String>,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    let file_name = file_name.into();
    let config = config.clone();

    tokio::task::spawn_blocking(move || {
        let extractor = PdfiumExtractor::from_config(&config);
        convert_bytes(&extractor, &bytes, &file_name, &config)
    })
    .await
    .map_err(|e| ConversionError::Internal(format!("Conversion task panicked: {}", e)))?
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConversionError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_str, config))
}

/// Convert a PDF and write the Markdown to `output_path`.
///
/// Uses an atomic write (temp file in the same directory + rename) so a
/// failed or interrupted run never leaves a truncated file behind. The
/// progress sink sees `Completed` only after the file has been written.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<MarkdownDocument, ConversionError> {
    let ResolvedInput { bytes, file_name } =
        input::resolve_input(input_str.as_ref(), config.download_timeout_secs)
            .await
            .map_err(|e| fail(config, 0, e))?;
    let path = output_path.as_ref().to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || {
        let extractor = PdfiumExtractor::from_config(&config);
        convert_bytes_to_file(&extractor, &bytes, &file_name, &path, &config)
    })
    .await
    .map_err(|e| ConversionError::Internal(format!("Conversion task panicked: {}", e)))?
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), ConversionError> {
    let write_err = |source: std::io::Error| ConversionError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Report page count and metadata without converting content.
pub async fn inspect(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<InspectOutput, ConversionError> {
    let ResolvedInput { bytes, file_name } =
        input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    let config = config.clone();

    tokio::task::spawn_blocking(move || {
        let extractor = PdfiumExtractor::from_config(&config);
        let handle = HandleGuard::open(&extractor, &bytes, config.password.as_deref())?;
        let info = handle.info()?;
        Ok::<_, ConversionError>(InspectOutput {
            file_name,
            size_bytes: bytes.len(),
            info,
        })
    })
    .await
    .map_err(|e| ConversionError::Internal(format!("Inspect task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extract::{DocumentInfo, ExtractionHandle};
    use crate::progress::{ProgressCallback, ProgressStatus};
    use std::sync::{Arc, Mutex};

    struct FixedText;

    struct FixedHandle;

    impl ExtractionHandle for FixedHandle {
        fn info(&self) -> Result<DocumentInfo, ConversionError> {
            Ok(DocumentInfo {
                total_pages: 2,
                ..Default::default()
            })
        }

        fn text(&self) -> Result<String, ConversionError> {
            Ok("OVERVIEW\n\nbody".to_string())
        }

        fn close(&mut self) {}
    }

    impl TextExtractor for FixedText {
        fn open<'a>(
            &'a self,
            _bytes: &'a [u8],
            _password: Option<&'a str>,
        ) -> Result<Box<dyn ExtractionHandle + 'a>, ConversionError> {
            Ok(Box::new(FixedHandle))
        }
    }

    fn recording_config() -> (ConversionConfig, Arc<Mutex<Vec<ProgressEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let cb: ProgressCallback = Arc::new(move |e: &ProgressEvent| {
            sink.lock().unwrap().push(e.clone());
        });
        let config = ConversionConfig::builder()
            .progress_callback(cb)
            .build()
            .unwrap();
        (config, events)
    }

    #[test]
    fn file_write_completes_after_markdown_is_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.md");
        let (config, events) = recording_config();

        let doc = convert_bytes_to_file(&FixedText, b"%PDF", "doc.pdf", &path, &config).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), doc.markdown);
        assert_eq!(doc.markdown, "# doc\n\n## OVERVIEW\n\nbody");
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], ProgressEvent::completed(2));
    }

    #[test]
    fn failed_write_is_the_terminal_error_event() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("doc.md");
        let (config, events) = recording_config();

        let err =
            convert_bytes_to_file(&FixedText, b"%PDF", "doc.pdf", &path, &config).unwrap_err();

        assert!(
            matches!(err, ConversionError::OutputWriteFailed { .. }),
            "got: {err:?}"
        );
        let events = events.lock().unwrap();
        assert!(events.iter().all(|e| e.status != ProgressStatus::Completed));
        let last = events.last().unwrap();
        assert_eq!(last.status, ProgressStatus::Error);
        assert_eq!(last.total_pages, 2);
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    }
}
