//! Post-processing: turn the model's raw reply into an [`AnalysisResult`].
//!
//! Even in JSON mode models occasionally wrap their answer in a
//! ` ```json ... ``` ` fence or prefix it with a byte-order mark. Those are
//! stripped deterministically before parsing; nothing inside the JSON is
//! touched.
//!
//! Parsing happens in two steps so the error says what went wrong: first
//! the text must be JSON at all, then it must have the expected shape.

use crate::error::TncError;
use crate::output::AnalysisResult;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// Normalise and parse a raw model reply.
///
/// # Errors
/// [`TncError::MalformedResponse`] carrying the untouched `raw` text when the
/// reply is not JSON, is not an object, or misses/mistypes a required key.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, TncError> {
    let cleaned = clean_reply(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| malformed(e.to_string(), raw))?;

    let Value::Object(mut map) = value else {
        return Err(malformed("expected a JSON object at the top level".into(), raw));
    };

    let unknown: Vec<String> = map
        .keys()
        .filter(|k| !AnalysisResult::KEYS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        warn!("Ignoring unexpected keys in model output: {:?}", unknown);
        map.retain(|k, _| AnalysisResult::KEYS.contains(&k.as_str()));
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| malformed(e.to_string(), raw))
}

fn malformed(detail: String, raw: &str) -> TncError {
    TncError::MalformedResponse {
        detail,
        raw: raw.to_string(),
    }
}

/// Apply the cleanup rules in order:
/// 1. Strip a leading byte-order mark
/// 2. Strip outer code fences (models sometimes disobey JSON mode)
/// 3. Trim surrounding whitespace
pub fn clean_reply(input: &str) -> String {
    let s = strip_bom(input);
    let s = strip_code_fences(s);
    s.trim().to_string()
}

// ── Rule 1: Strip BOM ────────────────────────────────────────────────────────

fn strip_bom(input: &str) -> &str {
    input.trim_start_matches('\u{FEFF}')
}

// ── Rule 2: Strip outer code fences ──────────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json|JSON)?[ \t]*\r?\n(.*?)\r?\n?```\s*$").unwrap());

fn strip_code_fences(input: &str) -> &str {
    let trimmed = input.trim();
    match RE_OUTER_FENCES.captures(trimmed).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => input,
    }
}
