//! Error types for the pdf-highlighter library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`HighlightError`] — **Fatal**: the operation cannot proceed at all
//!   (file missing, not a PDF, bad configuration, result download failed).
//!   Returned as `Err(HighlightError)` from loading, configuration and
//!   download functions.
//!
//! * [`SubmitError`] — **Recovered**: the highlight round trip failed
//!   (transport, server status, malformed body). Never escapes the
//!   [`crate::controller::UploadForm`]; it is folded into a
//!   [`crate::controller::SubmissionStatus::Failed`] message instead.
//!
//! [`FormNotice`] is neither: a submit that was refused before any request
//! was built (missing field, one already in flight). The form state is left
//! untouched.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf-highlighter library.
#[derive(Debug, Error)]
pub enum HighlightError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The picked file does not have the `application/pdf` type.
    #[error("File '{name}' is not a PDF (only application/pdf is accepted)")]
    NotAPdf { name: String },

    // ── Result errors ─────────────────────────────────────────────────────
    /// Fetching the highlighted PDF from its result reference failed.
    #[error("Failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Health probe against the service failed.
    #[error("Highlight service at '{url}' is unhealthy: {reason}")]
    Unhealthy { url: String, reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
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

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A failed highlight round trip.
///
/// Produced by a [`crate::service::HighlightService`] and consumed by the
/// form controller, which turns it into the status banner text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request never produced a response (connect refused, DNS, reset…).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// 2xx status, but the body is not JSON or has no `file_url`.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Why the form refused to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormNotice {
    /// No PDF has been picked.
    #[error("Upload a PDF and set time")]
    MissingFile,

    /// Reading time is empty.
    #[error("Upload a PDF and set time")]
    MissingReadingTime,

    /// A submission is still in flight.
    #[error("A PDF is already being processed")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_mentions_status() {
        let e = SubmitError::Server { status: 500 };
        assert_eq!(e.to_string(), "Server error: 500");
    }

    #[test]
    fn transport_display_is_the_cause() {
        let e = SubmitError::Transport("connection refused".into());
        assert_eq!(e.to_string(), "connection refused");
    }

    #[test]
    fn not_a_pdf_display() {
        let e = HighlightError::NotAPdf {
            name: "notes.txt".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
        assert!(msg.contains("application/pdf"));
    }

    #[test]
    fn download_failed_display() {
        let e = HighlightError::DownloadFailed {
            url: "http://host/out.pdf".into(),
            reason: "HTTP 404".into(),
        };
        assert!(e.to_string().contains("HTTP 404"));
        assert!(e.to_string().contains("http://host/out.pdf"));
    }
}
