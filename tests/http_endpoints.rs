//! End-to-end tests of the assembled API router with in-memory ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use repo_dossier::adapters::api_router;
use repo_dossier::adapters::http::{DossierAppState, ExportAppState, RepositoryAppState};
use repo_dossier::domain::dossier::DossierAssembler;
use repo_dossier::ports::{
    sanitize_filename, ContentEntry, ContentsError, DocumentExportService, ExportError,
    RepositoryContents,
};

// ════════════════════════════════════════════════════════════════════════════════
// In-memory ports
// ════════════════════════════════════════════════════════════════════════════════

struct InMemoryRepository {
    listings: HashMap<String, Vec<ContentEntry>>,
}

#[async_trait]
impl RepositoryContents for InMemoryRepository {
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, ContentsError> {
        if (owner, repo) != ("acme", "demo") {
            return Err(ContentsError::not_found(format!("{}/{}", owner, repo)));
        }
        Ok(self.listings.get(path).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingExporter {
    documents: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl DocumentExportService for RecordingExporter {
    async fn to_pdf(&self, markdown: &str, title: &str) -> Result<Vec<u8>, ExportError> {
        self.documents
            .lock()
            .unwrap()
            .push((markdown.to_string(), title.to_string()));
        Ok(b"%PDF-1.7\n%mock\n".to_vec())
    }

    async fn to_html(&self, markdown: &str, _title: &str) -> Result<String, ExportError> {
        Ok(format!("<p>{}</p>", markdown))
    }
}

fn app(exporter: Arc<RecordingExporter>) -> Router {
    let repository = InMemoryRepository {
        listings: HashMap::from([
            (
                String::new(),
                vec![ContentEntry::file("README.md", 10), ContentEntry::dir("src")],
            ),
            ("src".to_string(), vec![ContentEntry::file("src/index.ts", 20)]),
        ]),
    };

    api_router(
        RepositoryAppState::new(Arc::new(repository)),
        ExportAppState::new(exporter),
        DossierAppState::new(DossierAssembler::default()),
    )
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn tree_endpoint_returns_flat_node_list() {
    let response = app(Arc::default())
        .oneshot(
            Request::builder()
                .uri("/api/repos/acme/demo/tree")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let nodes: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        nodes,
        serde_json::json!([
            {"path": "README.md", "type": "file", "size": 10},
            {"path": "src", "type": "dir"},
            {"path": "src/index.ts", "type": "file", "size": 20}
        ])
    );
}

#[tokio::test]
async fn tree_endpoint_unknown_repository() {
    let response = app(Arc::default())
        .oneshot(
            Request::builder()
                .uri("/api/repos/acme/other/tree")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dossier_can_be_exported_to_pdf() {
    let exporter = Arc::new(RecordingExporter::default());
    let app = app(exporter.clone());

    let dossier = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/dossier")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"metadata":{"owner":"acme","repo":"demo"},"all_paths":["README.md","src/index.ts"]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(dossier.status(), StatusCode::OK);
    let markdown = String::from_utf8(body_bytes(dossier).await).unwrap();

    let export_body = serde_json::json!({"markdown": markdown, "title": "acme/demo dossier"});
    let pdf = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/export/pdf")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(export_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(pdf.status(), StatusCode::OK);
    assert_eq!(
        pdf.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"acme_demo_dossier.pdf\""
    );
    assert!(body_bytes(pdf).await.starts_with(b"%PDF"));

    let documents = exporter.documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].0, markdown);
    assert_eq!(documents[0].1, "acme/demo dossier");
}

#[tokio::test]
async fn pdf_endpoint_rejects_missing_markdown() {
    let exporter = Arc::new(RecordingExporter::default());
    let response = app(exporter.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/export/pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"markdown required");
    assert!(exporter.documents.lock().unwrap().is_empty());
}

#[test]
fn filename_sanitizer_replaces_unsafe_characters() {
    assert_eq!(sanitize_filename("Q1 Report/2024"), "Q1_Report_2024");
    assert_eq!(sanitize_filename("release-1.2_final"), "release-1.2_final");
}
