//! # tnc-analyzer
//!
//! Summarise a Terms & Conditions document into structured JSON with a
//! generative model, and show the result in a small web UI.
//!
//! ## Pipeline Overview
//!
//! ```text
//! paste / PDF upload / PDF URL
//!  │
//!  ├─ 1. Input    accept text, or download the PDF into memory
//!  ├─ 2. Extract  page texts in order via lopdf (spawn_blocking)
//!  ├─ 3. Prompt   fixed template embedding the text and the JSON shape
//!  ├─ 4. Model    one Gemini call in JSON mode via edgequake-llm
//!  ├─ 5. Parse    strip fences, validate the three required keys
//!  └─ 6. Render   summary / watchpoints / actions + structured_tnc.json
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tnc_analyzer::{Analyzer, AnalyzerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY; fails if it is not set.
//!     let analyzer = Analyzer::new(AnalyzerConfig::default())?;
//!     let doc = analyzer.fetch_url("https://example.com/terms.pdf").await?;
//!     let result = analyzer.analyze_document(&doc).await?;
//!     for point in &result.terms_summary {
//!         println!("- {point}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tnc-analyzer` binary (clap + anyhow + tracing-subscriber) |
//!
//! ## Testing without a model
//!
//! Implement [`TermsModel`] for a fake that returns canned JSON and pass it
//! through [`AnalyzerConfigBuilder::model`] or [`Analyzer::with_model`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod web;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::Analyzer;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, API_KEY_ENV, DEFAULT_MODEL};
pub use error::{PageWarning, TncError};
pub use output::{
    export_json, export_to_file, AnalysisResult, DocumentText, TextSource, EXPORT_FILE_NAME,
};
pub use pipeline::llm::{LlmTermsModel, TermsModel};
pub use report::Report;
