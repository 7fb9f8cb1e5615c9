//! Data produced by the analyzer: the acquired document and the model's
//! structured summary.

use crate::error::{PageWarning, TncError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name offered for the JSON export.
pub const EXPORT_FILE_NAME: &str = "structured_tnc.json";

/// Where a [`DocumentText`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextSource {
    /// Pasted directly by the user.
    Pasted,
    /// Parsed from an uploaded PDF.
    Uploaded { file_name: String },
    /// Parsed from a PDF downloaded over HTTP.
    Downloaded { url: String },
}

/// The acquired T&C text. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    text: String,
    source: TextSource,
    page_count: Option<usize>,
    warnings: Vec<PageWarning>,
}

impl DocumentText {
    /// Text pasted by the user; no page information.
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: TextSource::Pasted,
            page_count: None,
            warnings: Vec::new(),
        }
    }

    /// Text extracted from a PDF with `page_count` pages.
    pub fn from_pdf(
        text: String,
        source: TextSource,
        page_count: usize,
        warnings: Vec<PageWarning>,
    ) -> Self {
        Self {
            text,
            source,
            page_count: Some(page_count),
            warnings,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &TextSource {
        &self.source
    }

    /// Number of pages in the source PDF, `None` for pasted text.
    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    /// Pages that were left out of [`Self::text`].
    pub fn warnings(&self) -> &[PageWarning] {
        &self.warnings
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// The model's structured summary of a T&C document.
///
/// All three keys are required when deserialising model output; headings in
/// the two mappings keep the order the model produced them in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Short bullet points, in order.
    pub terms_summary: Vec<String>,
    /// Heading → explanation of clauses the reader should watch out for.
    pub critical_watchpoints: IndexMap<String, String>,
    /// Heading → what the reader should do about it.
    pub recommended_action: IndexMap<String, String>,
}

impl AnalysisResult {
    /// The three top-level keys of the JSON shape.
    pub const KEYS: [&'static str; 3] =
        ["terms_summary", "critical_watchpoints", "recommended_action"];
}

/// Serialise a result as the pretty-printed export document.
pub fn export_json(result: &AnalysisResult) -> Result<String, TncError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| TncError::Internal(format!("Failed to serialise result: {e}")))
}

/// Write the export document to `path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn export_to_file(
    result: &AnalysisResult,
    path: impl AsRef<Path>,
) -> Result<(), TncError> {
    let path = path.as_ref();
    let json = export_json(result)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| TncError::ExportWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| TncError::ExportWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| TncError::ExportWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}
