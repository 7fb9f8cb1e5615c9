//! Analyzer entry points: one method per user action.
//!
//! ```text
//! submit_text ─┐
//! upload_pdf  ─┼─▶ DocumentText ──▶ analyze ──▶ AnalysisResult
//! fetch_url   ─┘                  (prompt → model → parse)
//! ```
//!
//! Each action is single-shot and returns a typed result or a [`TncError`]
//! for the presentation layer to render. The [`Analyzer`] itself holds no
//! per-user state, so one instance is shared by every request.

use crate::config::AnalyzerConfig;
use crate::error::TncError;
use crate::output::{AnalysisResult, DocumentText, TextSource};
use crate::pipeline::llm::{LlmTermsModel, TermsModel};
use crate::pipeline::{extract, input, postprocess};
use crate::prompts;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Resolved model client plus configuration.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn TermsModel>,
    config: AnalyzerConfig,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Analyzer {
    /// Resolve the model client from `config`.
    ///
    /// A pre-built `config.model` is used as-is. Otherwise the Gemini
    /// provider is created from the environment, and a missing API key is
    /// returned as [`TncError::ApiKeyMissing`].
    pub fn new(config: AnalyzerConfig) -> Result<Self, TncError> {
        let model: Arc<dyn TermsModel> = match config.model {
            Some(ref model) => Arc::clone(model),
            None => Arc::new(LlmTermsModel::gemini_from_env(&config)?),
        };
        Ok(Self { model, config })
    }

    /// Use `model` directly, bypassing provider resolution.
    pub fn with_model(model: Arc<dyn TermsModel>, config: AnalyzerConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Accept pasted text. Blank text is rejected.
    pub fn submit_text(&self, text: &str) -> Result<DocumentText, TncError> {
        let text = input::accept_pasted(text)?;
        debug!("Accepted {} chars of pasted text", text.len());
        Ok(DocumentText::pasted(text))
    }

    /// Extract the text of an uploaded PDF.
    pub async fn upload_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<DocumentText, TncError> {
        info!("Extracting uploaded PDF '{}' ({} bytes)", file_name, bytes.len());
        if bytes.len() > self.config.max_upload_bytes {
            return Err(TncError::TooLarge {
                source_name: file_name.to_string(),
                limit_bytes: self.config.max_upload_bytes,
            });
        }
        let source = TextSource::Uploaded {
            file_name: file_name.to_string(),
        };
        self.pdf_to_document(bytes, file_name.to_string(), source)
            .await
    }

    /// Download a PDF and extract its text.
    ///
    /// A non-success status fails with [`TncError::Download`] before any
    /// parsing is attempted.
    pub async fn fetch_url(&self, url: &str) -> Result<DocumentText, TncError> {
        let url = url.trim();
        let bytes = input::download_pdf(
            url,
            self.config.download_timeout_secs,
            self.config.max_upload_bytes,
        )
        .await?;
        let source = TextSource::Downloaded {
            url: url.to_string(),
        };
        self.pdf_to_document(bytes, url.to_string(), source).await
    }

    /// Summarise `text` with the model. Exactly one model call is made.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, TncError> {
        let text = input::accept_pasted(text)?;
        let start = Instant::now();
        info!(
            "Analyzing {} chars with {}",
            text.len(),
            self.model.name()
        );

        let prompt = prompts::build_prompt(text, self.config.summary_points);
        let raw = self.model.generate_json(&prompt).await?;
        let result = postprocess::parse_analysis(&raw)?;

        info!(
            "Analysis complete: {} summary points, {} watchpoints, {} actions in {}ms",
            result.terms_summary.len(),
            result.critical_watchpoints.len(),
            result.recommended_action.len(),
            start.elapsed().as_millis()
        );
        Ok(result)
    }

    /// Convenience for callers holding a [`DocumentText`].
    pub async fn analyze_document(
        &self,
        document: &DocumentText,
    ) -> Result<AnalysisResult, TncError> {
        self.analyze(document.text()).await
    }

    async fn pdf_to_document(
        &self,
        bytes: Vec<u8>,
        source_name: String,
        source: TextSource,
    ) -> Result<DocumentText, TncError> {
        let extracted = extract::extract_pdf_text(bytes, source_name.clone()).await?;
        if extracted.text.trim().is_empty() {
            return Err(TncError::EmptyInput(format!(
                "'{}' has {} pages but none contain extractable text",
                source_name, extracted.page_count
            )));
        }
        Ok(DocumentText::from_pdf(
            extracted.text,
            source,
            extracted.page_count,
            extracted.warnings,
        ))
    }
}
