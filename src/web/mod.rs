//! Web UI: one route per user action.
//!
//! ```text
//! GET  /         input page (paste / upload / URL)
//! POST /text     accept pasted text        ─┐
//! POST /upload   extract an uploaded PDF    ├─▶ text-ready page
//! POST /fetch    download + extract a PDF  ─┘
//! POST /analyze  call the model, render the report
//! POST /export   return structured_tnc.json
//! GET  /health   liveness probe
//! ```
//!
//! Every handler catches its own [`TncError`] and renders it as an error
//! page; nothing is retried and no partial report is ever shown.

pub mod html;

use crate::analyze::Analyzer;
use crate::error::TncError;
use crate::output::{export_json, AnalysisResult, EXPORT_FILE_NAME};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use html::{Notice, NoticeKind};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Extra room on top of the document limit for multipart framing and form
/// encoding overhead.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
}

#[derive(Debug, Deserialize)]
struct TextForm {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct UrlForm {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct ExportForm {
    result: String,
}

/// Build the application router around a shared [`Analyzer`].
pub fn router(analyzer: Arc<Analyzer>) -> Router {
    // Form-encoded text roughly triples in size, so allow for that too.
    let limit = analyzer.config().max_upload_bytes.saturating_mul(3) + BODY_LIMIT_SLACK;
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/text", post(submit_text))
        .route("/upload", post(upload_pdf))
        .route("/fetch", post(fetch_url))
        .route("/analyze", post(analyze))
        .route("/export", post(export))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { analyzer })
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(analyzer: Arc<Analyzer>, addr: SocketAddr) -> Result<(), TncError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TncError::Internal(format!("Failed to bind {addr}: {e}")))?;
    let local = listener
        .local_addr()
        .map_err(|e| TncError::Internal(e.to_string()))?;
    info!("Listening on http://{}", local);

    axum::serve(listener, router(analyzer))
        .await
        .map_err(|e| TncError::Internal(format!("Server error: {e}")))
}

async fn index() -> Html<String> {
    Html(html::input_page(None))
}

async fn health() -> &'static str {
    "ok"
}

async fn submit_text(State(state): State<AppState>, Form(form): Form<TextForm>) -> Response {
    match state.analyzer.submit_text(&form.text) {
        Ok(document) => Html(html::acquired_page(&document, None)).into_response(),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Html(html::input_page(Some(Notice::new(
                NoticeKind::Warning,
                "Please paste some Terms & Conditions text.",
            )))),
        )
            .into_response(),
    }
}

async fn upload_pdf(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(&TncError::PdfParse {
                source_name: "upload".into(),
                detail: e.to_string(),
            }),
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        match field.bytes().await {
            Ok(bytes) => upload = Some((file_name, bytes.to_vec())),
            Err(e) => {
                return error_response(&TncError::PdfParse {
                    source_name: file_name,
                    detail: e.to_string(),
                })
            }
        }
    }

    let Some((file_name, bytes)) = upload.filter(|(_, b)| !b.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Html(html::input_page(Some(Notice::new(
                NoticeKind::Warning,
                "Please choose a PDF file to upload.",
            )))),
        )
            .into_response();
    };

    match state.analyzer.upload_pdf(&file_name, bytes).await {
        Ok(document) => Html(html::acquired_page(&document, None)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn fetch_url(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Response {
    if form.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Html(html::input_page(Some(Notice::new(
                NoticeKind::Warning,
                "Please enter a valid URL.",
            )))),
        )
            .into_response();
    }

    match state.analyzer.fetch_url(&form.url).await {
        Ok(document) => Html(html::acquired_page(
            &document,
            Some(Notice::new(
                NoticeKind::Success,
                "PDF downloaded and text extracted!",
            )),
        ))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

async fn analyze(State(state): State<AppState>, Form(form): Form<TextForm>) -> Response {
    let result = match state.analyzer.analyze(&form.text).await {
        Ok(result) => result,
        Err(e) => return error_response(&e),
    };
    match html::report_page(&result, state.analyzer.model_name()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn export(Form(form): Form<ExportForm>) -> Response {
    let parsed: AnalysisResult = match serde_json::from_str(&form.result) {
        Ok(result) => result,
        Err(e) => {
            return error_response(&TncError::MalformedResponse {
                detail: e.to_string(),
                raw: form.result,
            })
        }
    };
    match export_json(&parsed) {
        Ok(json) => (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            json,
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &TncError) -> Response {
    warn!("Request failed: {}", err);
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Html(html::error_page(err))).into_response()
}
