//! Input resolution: turn a paste, an upload or a URL into PDF bytes or text.
//!
//! Downloads are kept in memory. lopdf parses straight from a byte slice, so
//! the body never has to be written to disk; dropping the buffer is the
//! cleanup.

use crate::error::TncError;
use std::time::Duration;
use tracing::{debug, info};

/// Check if the input string is an absolute HTTP/HTTPS URL.
///
/// The scheme is matched case-insensitively, as URL parsing lowercases it.
pub fn is_url(input: &str) -> bool {
    reqwest::Url::parse(input.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Pass pasted text through, rejecting blank input.
pub fn accept_pasted(text: &str) -> Result<&str, TncError> {
    if text.trim().is_empty() {
        return Err(TncError::EmptyInput(
            "paste the Terms & Conditions text first".into(),
        ));
    }
    Ok(text)
}

/// Validate the `%PDF` magic bytes before handing data to the parser.
pub fn check_pdf_magic(bytes: &[u8], source_name: &str) -> Result<(), TncError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let shown = &bytes[..bytes.len().min(4)];
        return Err(TncError::PdfParse {
            source_name: source_name.to_string(),
            detail: format!("not a PDF file (first bytes: {shown:?})"),
        });
    }
    Ok(())
}

/// Download a PDF into memory.
///
/// A non-success status fails with [`TncError::Download`] before the body is
/// read, so nothing is ever parsed from an error page.
pub async fn download_pdf(
    url: &str,
    timeout_secs: u64,
    max_bytes: usize,
) -> Result<Vec<u8>, TncError> {
    let url = url.trim();
    if !is_url(url) {
        return Err(TncError::InvalidUrl(url.to_string()));
    }
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| TncError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        let reason = if e.is_timeout() {
            format!("timed out after {timeout_secs}s")
        } else {
            e.to_string()
        };
        TncError::DownloadFailed {
            url: url.to_string(),
            reason,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TncError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(len) = response.content_length() {
        if len > max_bytes as u64 {
            return Err(too_large(url, max_bytes));
        }
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TncError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if bytes.len() > max_bytes {
        return Err(too_large(url, max_bytes));
    }

    debug!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

fn too_large(url: &str, max_bytes: usize) -> TncError {
    TncError::TooLarge {
        source_name: url.to_string(),
        limit_bytes: max_bytes,
    }
}
