//! Server-side HTML for the web UI.
//!
//! Pages are assembled with `format!`; every piece of user or model text
//! goes through `html_escape` first. The acquired document travels between
//! requests inside the page itself (an editable textarea), so the server
//! keeps no session.

use crate::error::TncError;
use crate::output::{export_json, AnalysisResult, DocumentText, TextSource, EXPORT_FILE_NAME};
use crate::report::{Entry, Report, Section, Tone};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

/// Flash message shown at the top of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice success",
            NoticeKind::Info => "notice info",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem;line-height:1.5}\
textarea{width:100%;min-height:18rem;font-family:inherit}\
fieldset{margin-bottom:1.5rem;border:1px solid #ccc;border-radius:6px}\
.notice{padding:.6rem .9rem;border-radius:6px;margin:.5rem 0}\
.success{background:#e7f6ea}.info{background:#e8f0fb}.warning{background:#fff6dc}.error{background:#fde8e8}\
.summary li{margin:.25rem 0}\
pre{background:#f5f5f5;padding:1rem;overflow-x:auto;white-space:pre-wrap}";

fn layout(title: &str, notices: &[Notice], body: &str) -> String {
    let mut flash = String::new();
    for n in notices {
        let _ = write!(
            flash,
            "<div class=\"{}\">{}</div>",
            n.kind.class(),
            text(&n.message)
        );
    }
    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{STYLE}</style></head>\
<body><h1>📜 Terms &amp; Conditions Analyzer</h1>{flash}{body}</body></html>\n",
        title = text(title),
    )
}

/// The starting page: one form per input method.
pub fn input_page(notice: Option<Notice>) -> String {
    let body = "<p>Enter T&amp;C text, upload a PDF, or use a PDF URL to start.</p>\
<fieldset><legend>Paste Text</legend>\
<form method=\"post\" action=\"/text\">\
<textarea name=\"text\" placeholder=\"Paste your T&amp;C here\"></textarea>\
<p><button type=\"submit\">Use this text</button></p></form></fieldset>\
<fieldset><legend>Upload PDF</legend>\
<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\
<input type=\"file\" name=\"file\" accept=\"application/pdf,.pdf\" required> \
<button type=\"submit\">Extract text</button></form></fieldset>\
<fieldset><legend>PDF URL</legend>\
<form method=\"post\" action=\"/fetch\">\
<input type=\"url\" name=\"url\" placeholder=\"https://example.com/terms.pdf\" size=\"50\"> \
<button type=\"submit\">Download and Extract PDF Text</button></form></fieldset>";
    layout("T&C Analyzer", notice.as_slice(), body)
}

/// Page shown once text is acquired; the Analyze button posts it back.
pub fn acquired_page(document: &DocumentText, notice: Option<Notice>) -> String {
    let mut notices: Vec<Notice> = notice.into_iter().collect();
    for warning in document.warnings() {
        notices.push(Notice::new(
            NoticeKind::Info,
            format!("{warning} (skipped)"),
        ));
    }

    let origin = match document.source() {
        TextSource::Pasted => "pasted text".to_string(),
        TextSource::Uploaded { file_name } => format!("uploaded file {file_name}"),
        TextSource::Downloaded { url } => format!("downloaded from {url}"),
    };
    let pages = document
        .page_count()
        .map(|n| format!(", {n} pages"))
        .unwrap_or_default();

    let body = format!(
        "<p>Source: {origin}{pages}, {chars} characters.</p>\
<form method=\"post\" action=\"/analyze\">\
<textarea name=\"text\">{doc}</textarea>\
<p><button type=\"submit\">Analyze T&amp;C</button> <a href=\"/\">Start over</a></p></form>",
        origin = text(&origin),
        chars = document.text().chars().count(),
        doc = text(document.text()),
    );
    layout("T&C Analyzer — text ready", &notices, &body)
}

/// The analysis report with export and raw-JSON view.
pub fn report_page(result: &AnalysisResult, model_name: &str) -> Result<String, TncError> {
    let report = Report::from_result(result);
    let json = export_json(result)?;

    let mut body = String::new();
    for section in report.sections() {
        render_section(&mut body, section);
    }

    let _ = write!(
        body,
        "<form method=\"post\" action=\"/export\">\
<input type=\"hidden\" name=\"result\" value=\"{value}\">\
<button type=\"submit\">💾 Download JSON</button> <small>{file}</small></form>\
<details><summary>💾 View Raw JSON</summary><pre>{raw}</pre></details>\
<p><small>Analyzed with {model}.</small> <a href=\"/\">Analyze another document</a></p>",
        value = attr(&json),
        file = EXPORT_FILE_NAME,
        raw = text(&json),
        model = text(model_name),
    );
    Ok(layout("T&C Analyzer — report", &[], &body))
}

fn render_section(out: &mut String, section: &Section) {
    let icon = match section.tone {
        Tone::Summary => "🔹",
        Tone::Warning => "⚠️",
        Tone::Advisory => "💡",
    };
    let _ = write!(out, "<h2>{icon} {}</h2>", text(section.title));

    let block_class = match section.tone {
        Tone::Summary => "notice info",
        Tone::Warning => "notice error",
        Tone::Advisory => "notice warning",
    };

    if section.tone == Tone::Summary && !section.is_placeholder() {
        out.push_str("<ul class=\"summary\">");
        for entry in &section.entries {
            if let Entry::Item(item) = entry {
                let _ = write!(out, "<li>✅ {}</li>", text(item));
            }
        }
        out.push_str("</ul>");
        return;
    }

    for entry in &section.entries {
        match entry {
            Entry::Item(item) => {
                let _ = write!(out, "<div class=\"{block_class}\">{}</div>", text(item));
            }
            Entry::Labeled { label, text: body } => {
                let _ = write!(
                    out,
                    "<div class=\"{block_class}\"><strong>{}:</strong> {}</div>",
                    text(label),
                    text(body)
                );
            }
            Entry::Notice(message) => {
                let _ = write!(out, "<div class=\"{block_class}\">{}</div>", text(message));
            }
        }
    }
}

/// Error page; the full message (including any raw model output) is shown.
pub fn error_page(err: &TncError) -> String {
    let body = format!(
        "<div class=\"notice error\"><strong>Error:</strong><pre>{}</pre></div>\
<p><a href=\"/\">Back</a></p>",
        text(&err.to_string())
    );
    layout("T&C Analyzer — error", &[], &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageWarning;

    fn parse(json: &str) -> AnalysisResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn report_shows_notices_for_empty_sections() {
        let result = parse(
            r#"{"terms_summary": [], "critical_watchpoints": {}, "recommended_action": {"Action": "Review clause 5"}}"#,
        );
        let html = report_page(&result, "gemini-2.0-flash").unwrap();
        assert!(html.contains(crate::report::NO_SUMMARY));
        assert!(html.contains("No critical watchpoints provided."));
        assert!(html.contains("<strong>Action:</strong> Review clause 5"));
        assert!(!html.contains("No recommended action provided."));
        assert!(!html.contains("<ul class=\"summary\">"));
    }

    #[test]
    fn model_text_is_escaped() {
        let result = parse(
            r#"{"terms_summary": ["<script>alert(1)</script>"], "critical_watchpoints": {"A & B": "x"}, "recommended_action": {}}"#,
        );
        let html = report_page(&result, "m").unwrap();
        assert!(!html.contains("<li>✅ <script>"));
        assert!(html.contains("<li>✅ &lt;script&gt;alert(1)&lt;/script&gt;</li>"));
        assert!(html.contains("A &amp; B:"));
    }

    #[test]
    fn report_embeds_export_form_and_raw_json() {
        let result = parse(
            r#"{"terms_summary": ["a"], "critical_watchpoints": {}, "recommended_action": {}}"#,
        );
        let html = report_page(&result, "m").unwrap();
        assert!(html.contains("action=\"/export\""));
        assert!(html.contains("<details><summary>💾 View Raw JSON</summary>"));
        assert!(html.contains("&quot;terms_summary&quot;"));
    }

    #[test]
    fn acquired_page_lists_skipped_pages() {
        let doc = DocumentText::from_pdf(
            "Page1 text\n".into(),
            TextSource::Uploaded {
                file_name: "t.pdf".into(),
            },
            2,
            vec![PageWarning::NoText { page: 2 }],
        );
        let html = acquired_page(&doc, None);
        assert!(html.contains("Page 2: no extractable text (skipped)"));
        assert!(html.contains("uploaded file t.pdf, 2 pages"));
        assert!(html.contains("<textarea name=\"text\">Page1 text\n</textarea>"));
    }

    #[test]
    fn error_page_shows_message() {
        let err = TncError::Download {
            url: "https://example.com/x.pdf".into(),
            status: 404,
        };
        let html = error_page(&err);
        assert!(html.contains("status 404"));
    }
}
