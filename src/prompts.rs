//! Prompt template for T&C summarisation.
//!
//! Every prompt lives here so unit tests can inspect it directly without a
//! model. The template is plain string assembly; the only input is the
//! document text and the number of bullet points to ask for.

/// Instruction preamble sent before the JSON shape description.
pub const INSTRUCTIONS: &str = "You are a helpful assistant. \
Summarize the following Terms & Conditions into JSON format with the following structure:";

/// Reminder that the two mappings must always be present.
pub const ALWAYS_PRESENT_RULE: &str = "Please make sure to always provide 'critical_watchpoints' \
and 'recommended_action'. If these sections are not present in the document, say so clearly \
inside the object (for example {\"Note\": \"The document has no such clauses.\"}) instead of \
leaving it out.";

/// Label placed directly before the embedded document text.
pub const DOCUMENT_LABEL: &str = "Terms & Conditions:";

/// Build the full prompt for `tnc_text`.
///
/// The text is embedded verbatim after [`DOCUMENT_LABEL`].
pub fn build_prompt(tnc_text: &str, summary_points: usize) -> String {
    format!(
        "{INSTRUCTIONS}\n\n{}\n\n{ALWAYS_PRESENT_RULE}\n\n\
Respond with a single JSON object and exactly these three top-level keys.\n\n\
{DOCUMENT_LABEL}\n{tnc_text}",
        json_shape(summary_points)
    )
}

/// The JSON shape description the model is asked to follow.
fn json_shape(summary_points: usize) -> String {
    format!(
        "{{\n  \
\"terms_summary\": [list of {summary_points} short bullet points as strings],\n  \
\"critical_watchpoints\": {{\"Heading 1\": string, \"Heading 2\": string}},\n  \
\"recommended_action\": {{\"Heading\": string}}\n\
}}"
    )
}
