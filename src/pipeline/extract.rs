//! PDF text extraction via lopdf.
//!
//! Pages are read in document order. Each page that yields text contributes
//! that text followed by a newline; a page that yields nothing is left out
//! and recorded as a [`PageWarning`] so the caller can tell a blank page
//! from one whose content stream could not be decoded.

use crate::error::{PageWarning, TncError};
use crate::pipeline::input::check_pdf_magic;
use lopdf::Document;
use tracing::{debug, info, warn};

/// Text pulled out of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPdf {
    /// Concatenated page texts, each followed by `\n`.
    pub text: String,
    /// Total number of pages in the document.
    pub page_count: usize,
    /// Pages that contributed no text.
    pub warnings: Vec<PageWarning>,
}

/// Extract the text of every page of an in-memory PDF.
///
/// This runs inside `spawn_blocking` since parsing is CPU-bound.
pub async fn extract_pdf_text(
    bytes: Vec<u8>,
    source_name: String,
) -> Result<ExtractedPdf, TncError> {
    tokio::task::spawn_blocking(move || extract_pdf_text_blocking(&bytes, &source_name))
        .await
        .map_err(|e| TncError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Blocking implementation of text extraction.
pub fn extract_pdf_text_blocking(
    bytes: &[u8],
    source_name: &str,
) -> Result<ExtractedPdf, TncError> {
    check_pdf_magic(bytes, source_name)?;

    let document = Document::load_mem(bytes).map_err(|e| TncError::PdfParse {
        source_name: source_name.to_string(),
        detail: e.to_string(),
    })?;

    let pages = document.get_pages();
    let page_count = pages.len();
    info!("PDF loaded: {} pages", page_count);

    let mut text = String::new();
    let mut warnings = Vec::new();

    // get_pages() is keyed by 1-based page number, so iteration is in order.
    for (index, &page_number) in pages.keys().enumerate() {
        let page = index + 1;
        match document.extract_text(&[page_number]) {
            Ok(page_text) => {
                // lopdf ends every text object with '\n'; everything else is kept.
                let page_text = page_text.trim_end_matches(['\r', '\n']);
                if page_text.trim().is_empty() {
                    debug!("Page {}: no text", page);
                    warnings.push(PageWarning::NoText { page });
                } else {
                    text.push_str(page_text);
                    text.push('\n');
                }
            }
            Err(e) => {
                warn!("Page {}: text extraction failed: {}", page, e);
                warnings.push(PageWarning::ExtractFailed {
                    page,
                    detail: e.to_string(),
                });
            }
        }
    }

    debug!(
        "Extracted {} chars from {} pages ({} skipped)",
        text.len(),
        page_count,
        warnings.len()
    );

    Ok(ExtractedPdf {
        text,
        page_count,
        warnings,
    })
}
