//! Progress events emitted while a document is converted.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events. Any `Fn(&ProgressEvent) + Send + Sync` closure is a callback.
//!
//! The extractor returns the whole text layer in one call, so the
//! per-page `Processing` events are pacing signals for a UI, not a measure of
//! extraction work. Each conversion emits zero or more `Processing` events
//! followed by exactly one terminal event: `Completed` or `Error`.
//!
//! # Example
//!
//! ```rust
//! use pdf2md_text::{ConversionConfig, ProgressEvent, ProgressCallback};
//! use std::sync::Arc;
//!
//! let cb: ProgressCallback = Arc::new(|event: &ProgressEvent| {
//!     eprintln!("{:?} {}/{}", event.status, event.current_page, event.total_pages);
//! });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(cb)
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lifecycle state reported by a [`ProgressEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Processing,
    Completed,
    Error,
}

/// A single progress notification.
///
/// All events of one conversion share the same `total_pages` once the
/// extractor has reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// 1-indexed page the event refers to; `0` on error.
    pub current_page: u32,
    pub total_pages: u32,
    pub status: ProgressStatus,
    /// Human-readable failure message, set only for [`ProgressStatus::Error`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    pub fn processing(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            status: ProgressStatus::Processing,
            error: None,
        }
    }

    pub fn completed(total_pages: u32) -> Self {
        Self {
            current_page: total_pages,
            total_pages,
            status: ProgressStatus::Completed,
            error: None,
        }
    }

    pub fn error(total_pages: u32, message: impl Into<String>) -> Self {
        Self {
            current_page: 0,
            total_pages,
            status: ProgressStatus::Error,
            error: Some(message.into()),
        }
    }

    /// `true` for `Completed` and `Error`.
    pub fn is_terminal(&self) -> bool {
        self.status != ProgressStatus::Processing
    }
}

/// Receives [`ProgressEvent`]s from the conversion pipeline.
///
/// Called synchronously on the converting thread. Implementations must be
/// `Send + Sync` because [`crate::convert::convert`] runs extraction on the
/// blocking thread pool.
pub trait ConversionProgressCallback: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> ConversionProgressCallback for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_progress(&ProgressEvent::processing(1, 5));
        cb.on_progress(&ProgressEvent::completed(5));
        cb.on_progress(&ProgressEvent::error(5, "boom"));
    }

    #[test]
    fn closure_callback_records_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cb: ProgressCallback = Arc::new(move |e: &ProgressEvent| {
            sink.lock().unwrap().push(e.clone());
        });

        cb.on_progress(&ProgressEvent::processing(1, 2));
        cb.on_progress(&ProgressEvent::processing(2, 2));
        cb.on_progress(&ProgressEvent::completed(2));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|e| e.total_pages == 2));
        assert!(seen[2].is_terminal());
        assert_eq!(seen[2].current_page, 2);
    }

    #[test]
    fn error_event_carries_message() {
        let e = ProgressEvent::error(0, "corrupt xref");
        assert_eq!(e.status, ProgressStatus::Error);
        assert_eq!(e.current_page, 0);
        assert_eq!(e.error.as_deref(), Some("corrupt xref"));
    }

    #[test]
    fn serialises_status_lowercase() {
        let json = serde_json::to_string(&ProgressEvent::processing(3, 9)).unwrap();
        assert_eq!(
            json,
            r#"{"current_page":3,"total_pages":9,"status":"processing"}"#
        );
    }
}
