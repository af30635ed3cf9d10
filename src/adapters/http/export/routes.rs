//! Axum router configuration for export endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{export_html, export_pdf, ExportAppState};

/// Create the export API router.
///
/// # Routes
/// - `POST /api/export/pdf` - Markdown to PDF attachment
/// - `POST /api/export/html` - Markdown to printable HTML
pub fn export_router() -> Router<ExportAppState> {
    Router::new()
        .route("/api/export/pdf", post(export_pdf))
        .route("/api/export/html", post(export_html))
}
