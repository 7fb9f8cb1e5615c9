//! Pipeline stages for T&C analysis.
//!
//! Each submodule implements exactly one step, so each is testable alone
//! and the model client can be swapped without touching extraction.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ llm ──▶ postprocess
//! (paste/URL)  (lopdf)   (JSON)   (typed result)
//! ```
//!
//! 1. [`input`]   — validate pasted text, check PDF magic, download URLs
//! 2. [`extract`] — read page texts in order; runs in `spawn_blocking`
//! 3. [`llm`]     — the [`llm::TermsModel`] seam and its edgequake-llm
//!    implementation; the only stage that calls the model
//! 4. [`postprocess`] — strip fences and parse into
//!    [`crate::output::AnalysisResult`]

pub mod extract;
pub mod input;
pub mod llm;
pub mod postprocess;
