//! Input resolution: load a user-supplied path or URL into memory.
//!
//! The extractor works on a byte slice, so both local files and downloads
//! end up as a `Vec<u8>` plus the file name the title is derived from. The
//! `%PDF` magic bytes are checked here so callers get a meaningful error
//! rather than an opaque parser failure.

use crate::error::ConversionError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// PDF bytes plus the name used for the title and output file.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to PDF bytes.
///
/// If the input is a URL, download it. Otherwise read the local file.
pub async fn resolve_input(
    input: &str,
    timeout_secs: u64,
) -> Result<ResolvedInput, ConversionError> {
    if input.trim().is_empty() {
        return Err(ConversionError::InvalidInput {
            input: input.to_string(),
        });
    }
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        resolve_local(Path::new(input)).await
    }
}

/// Read a local file, validating existence and PDF magic bytes.
async fn resolve_local(path: &Path) -> Result<ResolvedInput, ConversionError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ConversionError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ConversionError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    check_magic(&bytes, path)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    debug!("Resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedInput { bytes, file_name })
}

/// Download a URL into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedInput, ConversionError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ConversionError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ConversionError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ConversionError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(ConversionError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let file_name = extract_filename(url);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ConversionError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .to_vec();

    check_magic(&bytes, Path::new(&file_name))?;

    info!("Downloaded {} bytes as {}", bytes.len(), file_name);
    Ok(ResolvedInput { bytes, file_name })
}

/// Reject buffers that don't start with `%PDF`. Buffers shorter than four
/// bytes are left for the extractor to reject.
fn check_magic(bytes: &[u8], path: &Path) -> Result<(), ConversionError> {
    if bytes.len() >= 4 && &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        return Err(ConversionError::NotAPdf {
            path: PathBuf::from(path),
            magic,
        });
    }
    Ok(())
}

/// Extract a reasonable filename from the URL path.
fn extract_filename(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    "downloaded.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com/doc.pdf"));
        assert!(!is_url("/tmp/doc.pdf"));
        assert!(!is_url("doc.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("https://example.com/a/report.pdf"), "report.pdf");
        assert_eq!(extract_filename("https://arxiv.org/pdf/1706"), "downloaded.pdf");
        assert_eq!(extract_filename("not a url"), "downloaded.pdf");
    }

    #[test]
    fn test_check_magic() {
        assert!(check_magic(b"%PDF-1.7\n", Path::new("a.pdf")).is_ok());
        assert!(check_magic(b"%P", Path::new("a.pdf")).is_ok());
        assert!(matches!(
            check_magic(b"PK\x03\x04", Path::new("a.pdf")),
            Err(ConversionError::NotAPdf { magic, .. }) if &magic == b"PK\x03\x04"
        ));
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = tokio_test::block_on(resolve_input("  ", 5)).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));
    }
}
