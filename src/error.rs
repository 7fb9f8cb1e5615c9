//! Error types for the tnc-analyzer library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`TncError`] — **Fatal** for the current user action: the text could
//!   not be acquired, the model call failed, or its reply could not be
//!   parsed. Every entry point returns `Err(TncError)` and the presentation
//!   layer turns it into a user-visible message.
//!
//! * [`PageWarning`] — **Non-fatal**: a single PDF page produced no text.
//!   Stored inside [`crate::output::DocumentText`] so callers can tell a
//!   blank page from a page whose text could not be extracted.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the tnc-analyzer library.
#[derive(Debug, Error)]
pub enum TncError {
    // ── Acquisition errors ────────────────────────────────────────────────
    /// The download URL answered with a non-success HTTP status.
    #[error("Failed to download PDF from '{url}' (status {status})")]
    Download { url: String, status: u16 },

    /// The download never produced a response (DNS, TLS, timeout, …).
    #[error("Failed to download '{url}': {reason}\nCheck the URL and your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// The URL is not an absolute HTTP/HTTPS URL.
    #[error("Invalid URL '{0}': expected an http:// or https:// address")]
    InvalidUrl(String),

    /// The bytes could not be read as a PDF document.
    #[error("Could not read PDF '{source_name}': {detail}")]
    PdfParse { source_name: String, detail: String },

    /// The uploaded or downloaded document exceeds `max_upload_bytes`.
    #[error("'{source_name}' is larger than the {limit_bytes} byte limit")]
    TooLarge {
        source_name: String,
        limit_bytes: usize,
    },

    /// Nothing to analyze: the pasted or extracted text is blank.
    #[error("No text to analyze: {0}")]
    EmptyInput(String),

    // ── Model errors ──────────────────────────────────────────────────────
    /// The model service call itself failed (network, auth, quota).
    #[error("Model call failed: {detail}")]
    ModelInvocation { detail: String },

    /// The model answered, but not with the expected JSON object.
    #[error("Model output is not valid JSON: {detail}\nRaw output:\n{raw}")]
    MalformedResponse { detail: String, raw: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// The API key environment variable is unset or empty.
    #[error("API key not configured: set {var} before starting the analyzer")]
    ApiKeyMissing { var: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the JSON export file.
    #[error("Failed to write export file '{path}': {source}")]
    ExportWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TncError {
    /// HTTP status the web layer answers with for this error.
    ///
    /// Upstream failures (download, model) are reported as `502` so they are
    /// distinguishable from bad user input in access logs.
    pub fn status_code(&self) -> u16 {
        match self {
            TncError::InvalidUrl(_)
            | TncError::PdfParse { .. }
            | TncError::EmptyInput(_) => 400,
            TncError::TooLarge { .. } => 413,
            TncError::Download { .. }
            | TncError::DownloadFailed { .. }
            | TncError::ModelInvocation { .. }
            | TncError::MalformedResponse { .. } => 502,
            TncError::ApiKeyMissing { .. }
            | TncError::InvalidConfig(_)
            | TncError::ExportWriteFailed { .. }
            | TncError::Internal(_) => 500,
        }
    }
}

/// A non-fatal extraction note for a single PDF page (1-indexed).
///
/// The page is left out of the extracted text either way.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum PageWarning {
    /// The page parsed fine but carries no text (blank or image-only).
    #[error("Page {page}: no extractable text")]
    NoText { page: usize },

    /// The page's content stream could not be decoded.
    #[error("Page {page}: text extraction failed: {detail}")]
    ExtractFailed { page: usize, detail: String },
}
