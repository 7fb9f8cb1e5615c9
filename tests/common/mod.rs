//! Shared fixtures: a fake model, generated PDFs and a local file server.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tnc_analyzer::{Analyzer, AnalyzerConfig, TermsModel, TncError};

pub const REPLY: &str = r#"{
  "terms_summary": ["You pay monthly.", "Either party may cancel."],
  "critical_watchpoints": {"Auto-renewal": "The plan renews unless cancelled."},
  "recommended_action": {"Action": "Review clause 5"}
}"#;

/// Model double returning one canned reply and recording every prompt.
pub struct FakeModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(detail.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TermsModel for FakeModel {
    fn name(&self) -> &str {
        "fake-model"
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, TncError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(|detail| TncError::ModelInvocation { detail })
    }
}

pub fn analyzer_with(model: Arc<FakeModel>) -> Arc<Analyzer> {
    let config = AnalyzerConfig::builder()
        .model(model)
        .download_timeout_secs(10)
        .build()
        .expect("valid config");
    Arc::new(Analyzer::new(config).expect("injected model needs no key"))
}

/// Build a PDF with one line of Helvetica text per page; `""` is a blank page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            vec![]
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Serve `/terms.pdf` (200) and `/missing.pdf` (404, with a valid PDF body)
/// on an ephemeral local port.
pub async fn spawn_pdf_server(pdf: Vec<u8>) -> SocketAddr {
    let ok_body = pdf.clone();
    let app = Router::new()
        .route(
            "/terms.pdf",
            get(move || {
                let body = ok_body.clone();
                async move { ([("content-type", "application/pdf")], body) }
            }),
        )
        .route(
            "/missing.pdf",
            get(move || {
                let body = pdf.clone();
                async move { (StatusCode::NOT_FOUND, body) }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// `application/x-www-form-urlencoded` body for the given pairs.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    let mut url = reqwest::Url::parse("http://localhost/").expect("static url");
    {
        let mut query = url.query_pairs_mut();
        for (k, v) in pairs {
            query.append_pair(k, v);
        }
    }
    url.query().unwrap_or_default().to_string()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
