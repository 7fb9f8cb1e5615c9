//! Model interaction: send the prompt and return the raw JSON reply.
//!
//! [`TermsModel`] is the seam between the analyzer and the model service.
//! The production implementation wraps an `edgequake_llm` provider; tests
//! substitute a fake that returns canned JSON. Parsing the reply lives in
//! [`crate::pipeline::postprocess`] so it is shared by every implementation.
//!
//! There is exactly one attempt per analysis: a failed call surfaces as
//! [`TncError::ModelInvocation`] and the user decides whether to try again.

use crate::config::{AnalyzerConfig, API_KEY_ENV};
use crate::error::TncError;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A generative model that answers a prompt with JSON text.
#[async_trait]
pub trait TermsModel: Send + Sync {
    /// Human-readable model identifier, used in logs and the UI.
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw reply text.
    ///
    /// # Errors
    /// [`TncError::ModelInvocation`] when the service call fails.
    async fn generate_json(&self, prompt: &str) -> Result<String, TncError>;
}

/// [`TermsModel`] backed by an `edgequake_llm` provider in JSON mode.
pub struct LlmTermsModel {
    provider: Arc<dyn LLMProvider>,
    model_name: String,
    options: CompletionOptions,
}

impl LlmTermsModel {
    /// Wrap an already constructed provider.
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        model_name: impl Into<String>,
        config: &AnalyzerConfig,
    ) -> Self {
        Self {
            provider,
            model_name: model_name.into(),
            options: build_options(config),
        }
    }

    /// Create the Gemini provider named by `config.model_name`.
    ///
    /// The API key must be present in [`API_KEY_ENV`]; its absence is
    /// reported as [`TncError::ApiKeyMissing`] so the caller can refuse to
    /// start.
    pub fn gemini_from_env(config: &AnalyzerConfig) -> Result<Self, TncError> {
        let key_set = std::env::var(API_KEY_ENV)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        if !key_set {
            return Err(TncError::ApiKeyMissing {
                var: API_KEY_ENV.to_string(),
            });
        }

        let provider = ProviderFactory::create_llm_provider("gemini", &config.model_name)
            .map_err(|e| TncError::InvalidConfig(format!("Gemini provider: {e}")))?;

        info!("Using model {}", config.model_name);
        Ok(Self::new(provider, config.model_name.clone(), config))
    }
}

impl std::fmt::Debug for LlmTermsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmTermsModel")
            .field("model_name", &self.model_name)
            .field("provider", &"<dyn LLMProvider>")
            .finish()
    }
}

#[async_trait]
impl TermsModel for LlmTermsModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, TncError> {
        let start = Instant::now();
        let messages = vec![ChatMessage::user(prompt)];

        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| TncError::ModelInvocation {
                detail: e.to_string(),
            })?;

        debug!(
            "{}: {} input tokens, {} output tokens, {:?}",
            self.model_name,
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );
        Ok(response.content)
    }
}

/// Build `CompletionOptions` from the analyzer config, with JSON output on.
fn build_options(config: &AnalyzerConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        response_format: Some("json_object".to_string()),
        ..Default::default()
    }
}
