//! HTTP handlers for export endpoints.
//!
//! Errors are returned as plain text bodies carrying the failure message.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::ExportDocumentHandler;
use crate::ports::{DocumentExportService, ExportError, ExportFormat, ExportedDocument};

use super::dto::ExportRequest;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ExportAppState {
    pub export_service: Arc<dyn DocumentExportService>,
}

impl ExportAppState {
    pub fn new(export_service: Arc<dyn DocumentExportService>) -> Self {
        Self { export_service }
    }

    pub fn export_handler(&self) -> ExportDocumentHandler {
        ExportDocumentHandler::new(self.export_service.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/export/pdf - Print markdown to a PDF attachment
pub async fn export_pdf(
    State(state): State<ExportAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ExportApiError> {
    let document = export(&state, &body, ExportFormat::Pdf).await?;
    let disposition = document.content_disposition();

    Ok((
        [
            (header::CONTENT_TYPE, document.content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        document.content,
    ))
}

/// POST /api/export/html - Render markdown to a printable HTML document
pub async fn export_html(
    State(state): State<ExportAppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ExportApiError> {
    let document = export(&state, &body, ExportFormat::Html).await?;

    Ok((
        [
            (header::CONTENT_TYPE, document.content_type),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        document.content,
    ))
}

async fn export(
    state: &ExportAppState,
    body: &[u8],
    format: ExportFormat,
) -> Result<ExportedDocument, ExportApiError> {
    let request = ExportRequest::from_body(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected export body");
        ExportApiError::InvalidJson
    })?;

    let document = state
        .export_handler()
        .handle(request.into_command(format))
        .await?;
    Ok(document)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error mapping export failures to plain text HTTP responses.
#[derive(Debug)]
pub enum ExportApiError {
    InvalidJson,
    Export(ExportError),
}

impl From<ExportError> for ExportApiError {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}

impl IntoResponse for ExportApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ExportApiError::InvalidJson => {
                (StatusCode::BAD_REQUEST, "invalid JSON body".to_string())
            }
            ExportApiError::Export(ExportError::InvalidInput(reason)) => {
                (StatusCode::BAD_REQUEST, reason)
            }
            ExportApiError::Export(err) => {
                tracing::error!(error = %err, "Document export failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
