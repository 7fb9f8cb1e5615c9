//! Integration tests for the acquisition → analysis pipeline.
//!
//! No network or API key is needed: the model is a fake and PDFs are
//! served from a local axum server on an ephemeral port.

mod common;

use common::{analyzer_with, pdf_with_pages, spawn_pdf_server, FakeModel, REPLY};
use tnc_analyzer::report::{Entry, NO_WATCHPOINTS};
use tnc_analyzer::{export_json, AnalysisResult, PageWarning, Report, TextSource, TncError};

#[tokio::test]
async fn pasted_text_is_sent_verbatim_once() {
    let model = FakeModel::replying(REPLY);
    let analyzer = analyzer_with(model.clone());
    let text = "Section 5. We may suspend your account without notice.\nSection 6. Fees are non-refundable.";

    let doc = analyzer.submit_text(text).unwrap();
    assert_eq!(doc.source(), &TextSource::Pasted);
    let result = analyzer.analyze_document(&doc).await.unwrap();

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1, "model must be called exactly once");
    assert!(prompts[0].contains(text));
    assert_eq!(result.terms_summary.len(), 2);
}

#[tokio::test]
async fn upload_skips_blank_pages_and_keeps_order() {
    let analyzer = analyzer_with(FakeModel::replying(REPLY));
    let pdf = pdf_with_pages(&["Page1 text", "", "Page3 text"]);

    let doc = analyzer.upload_pdf("terms.pdf", pdf).await.unwrap();

    assert_eq!(doc.text(), "Page1 text\nPage3 text\n");
    assert_eq!(doc.page_count(), Some(3));
    assert_eq!(doc.warnings(), &[PageWarning::NoText { page: 2 }]);
    assert_eq!(
        doc.source(),
        &TextSource::Uploaded {
            file_name: "terms.pdf".into()
        }
    );
}

#[tokio::test]
async fn upload_of_image_only_pdf_is_empty_input() {
    let analyzer = analyzer_with(FakeModel::replying(REPLY));
    let pdf = pdf_with_pages(&["", ""]);
    let err = analyzer.upload_pdf("scan.pdf", pdf).await.unwrap_err();
    assert!(matches!(err, TncError::EmptyInput(_)), "got {err:?}");
}

#[tokio::test]
async fn uppercase_scheme_is_fetched() {
    let addr = spawn_pdf_server(pdf_with_pages(&["Page1 text"])).await;
    let analyzer = analyzer_with(FakeModel::replying(REPLY));
    let doc = analyzer
        .fetch_url(&format!("HTTP://{addr}/terms.pdf"))
        .await
        .unwrap();
    assert_eq!(doc.text(), "Page1 text\n");
}

#[tokio::test]
async fn fetch_url_extracts_like_upload() {
    common::init_tracing();
    let addr = spawn_pdf_server(pdf_with_pages(&["Page1 text", "", "Page3 text"])).await;
    let analyzer = analyzer_with(FakeModel::replying(REPLY));
    let url = format!("http://{addr}/terms.pdf");

    let doc = analyzer.fetch_url(&url).await.unwrap();

    assert_eq!(doc.text(), "Page1 text\nPage3 text\n");
    assert_eq!(doc.source(), &TextSource::Downloaded { url });
}

#[tokio::test]
async fn http_404_is_download_error_before_parsing() {
    // The 404 body is a valid PDF: parsing it would have succeeded.
    let addr = spawn_pdf_server(pdf_with_pages(&["Should never be read"])).await;
    let analyzer = analyzer_with(FakeModel::replying(REPLY));

    let err = analyzer
        .fetch_url(&format!("http://{addr}/missing.pdf"))
        .await
        .unwrap_err();

    match err {
        TncError::Download { status, .. } => assert_eq!(status, 404),
        other => panic!("expected Download error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_download_failure() {
    // Port 9 (discard) on localhost is closed in test environments.
    let analyzer = analyzer_with(FakeModel::replying(REPLY));
    let err = analyzer
        .fetch_url("http://127.0.0.1:9/terms.pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, TncError::DownloadFailed { .. }), "got {err:?}");
}

#[tokio::test]
async fn non_json_reply_is_malformed_with_raw_text() {
    let analyzer = analyzer_with(FakeModel::replying("{not json"));
    let err = analyzer.analyze("Some terms").await.unwrap_err();
    assert!(matches!(err, TncError::MalformedResponse { .. }));
    assert!(err.to_string().contains("{not json"));
}

#[tokio::test]
async fn model_failure_is_reported_not_retried() {
    let model = FakeModel::failing("401 unauthorized");
    let analyzer = analyzer_with(model.clone());
    let err = analyzer.analyze("Some terms").await.unwrap_err();
    assert!(matches!(err, TncError::ModelInvocation { .. }));
    assert_eq!(model.prompts().len(), 1);
}

#[tokio::test]
async fn empty_mappings_render_notices() {
    let reply = r#"{"terms_summary": [], "critical_watchpoints": {}, "recommended_action": {"Action": "Review clause 5"}}"#;
    let analyzer = analyzer_with(FakeModel::replying(reply));
    let result = analyzer.analyze("Some terms").await.unwrap();
    let report = Report::from_result(&result);

    assert!(report.summary.is_placeholder());
    assert_eq!(report.watchpoints.entries, vec![Entry::Notice(NO_WATCHPOINTS)]);
    assert_eq!(report.actions.entries.len(), 1);
    assert!(matches!(
        &report.actions.entries[0],
        Entry::Labeled { label, .. } if label == "Action"
    ));
}

#[tokio::test]
async fn export_keeps_heading_order_from_reply() {
    let reply = r#"{"terms_summary": [], "critical_watchpoints": {"Zeta fees": "z", "Arbitration": "a"}, "recommended_action": {}}"#;
    let analyzer = analyzer_with(FakeModel::replying(reply));
    let result = analyzer.analyze("Some terms").await.unwrap();

    let json = export_json(&result).unwrap();
    let zeta = json.find("Zeta fees").unwrap();
    let arbitration = json.find("Arbitration").unwrap();
    assert!(zeta < arbitration, "got {json}");
}

#[tokio::test]
async fn oversized_download_matches_upload_limit_error() {
    let addr = spawn_pdf_server(pdf_with_pages(&["Page1 text"])).await;
    let config = tnc_analyzer::AnalyzerConfig::builder()
        .model(FakeModel::replying(REPLY))
        .max_upload_bytes(16)
        .build()
        .unwrap();
    let analyzer = tnc_analyzer::Analyzer::new(config).unwrap();

    let err = analyzer
        .fetch_url(&format!("http://{addr}/terms.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, TncError::TooLarge { limit_bytes: 16, .. }), "got {err:?}");
    assert_eq!(err.status_code(), 413);
}

#[tokio::test]
async fn export_round_trip_is_identical() {
    let analyzer = analyzer_with(FakeModel::replying(REPLY));
    let result = analyzer.analyze("Some terms").await.unwrap();

    let json = export_json(&result).unwrap();
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
    assert_eq!(export_json(&back).unwrap(), json);
}
