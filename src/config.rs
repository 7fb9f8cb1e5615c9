//! Configuration types for the analyzer.
//!
//! All behaviour is controlled through [`AnalyzerConfig`], built via its
//! [`AnalyzerConfigBuilder`]. The config is resolved once at startup into an
//! [`crate::Analyzer`]; nothing here is read again per request.

use crate::error::TncError;
use crate::pipeline::llm::TermsModel;
use std::fmt;
use std::sync::Arc;

/// Default Gemini model used for the analysis.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the model API key. The Gemini provider
/// reads it directly; the analyzer only checks it is set.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for T&C analysis.
///
/// Built via [`AnalyzerConfig::builder()`] or using
/// [`AnalyzerConfig::default()`].
///
/// # Example
/// ```rust
/// use tnc_analyzer::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .model_name("gemini-2.0-flash")
///     .download_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Gemini model identifier. Default: `gemini-2.0-flash`.
    pub model_name: String,

    /// Pre-constructed model client. Takes precedence over `model_name`,
    /// and skips the [`API_KEY_ENV`] check.
    pub model: Option<Arc<dyn TermsModel>>,

    /// Sampling temperature for the model call. Default: 0.2.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 4096.
    pub max_tokens: usize,

    /// Number of summary bullet points asked for in the prompt. Default: 10.
    pub summary_points: usize,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Largest accepted upload or download body in bytes. Default: 20 MiB.
    pub max_upload_bytes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            model: None,
            temperature: 0.2,
            max_tokens: 4096,
            summary_points: 10,
            download_timeout_secs: 120,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("model_name", &self.model_name)
            .field("model", &self.model.as_ref().map(|_| "<dyn TermsModel>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("summary_points", &self.summary_points)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Create a new builder for `AnalyzerConfig`.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalyzerConfig`].
#[derive(Debug)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.config.model_name = name.into();
        self
    }

    pub fn model(mut self, model: Arc<dyn TermsModel>) -> Self {
        self.config.model = Some(model);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn summary_points(mut self, n: usize) -> Self {
        self.config.summary_points = n;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalyzerConfig, TncError> {
        let c = &self.config;
        if c.model.is_none() && c.model_name.trim().is_empty() {
            return Err(TncError::InvalidConfig("Model name must not be empty".into()));
        }
        if c.summary_points == 0 {
            return Err(TncError::InvalidConfig(
                "Summary points must be ≥ 1".into(),
            ));
        }
        if c.max_tokens == 0 {
            return Err(TncError::InvalidConfig("Max tokens must be ≥ 1".into()));
        }
        if c.download_timeout_secs == 0 {
            return Err(TncError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        if c.max_upload_bytes == 0 {
            return Err(TncError::InvalidConfig(
                "Upload limit must be ≥ 1 byte".into(),
            ));
        }
        Ok(self.config)
    }
}
