//! Document Export Service Port - Format conversion interface.
//!
//! This port defines the contract for converting markdown documents to
//! printable formats (HTML, PDF). Handlers depend on this trait, while
//! adapters (like ChromiumExportService) provide the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for exporting markdown documents to other formats.
///
/// # Contract
///
/// Implementations must:
/// - Render markdown with raw HTML passthrough, without autolinking and
///   without turning soft line breaks into `<br>`
/// - HTML-escape the title before placing it in the document shell
/// - Release every external resource (browser processes) before returning,
///   on success and on failure
///
/// # Usage
///
/// ```rust,ignore
/// let export_service: &dyn DocumentExportService = get_service();
///
/// let pdf_bytes = export_service.to_pdf("# Report\n\nContent", "Q1 Report").await?;
/// let html = export_service.to_html("# Report\n\nContent", "Q1 Report").await?;
/// ```
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Convert markdown content to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::ServiceUnavailable` when no browser executable
    /// can be resolved, and other variants for rendering failures.
    async fn to_pdf(&self, markdown: &str, title: &str) -> Result<Vec<u8>, ExportError>;

    /// Convert markdown content to a complete, print-styled HTML document.
    async fn to_html(&self, markdown: &str, title: &str) -> Result<String, ExportError>;
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Html,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Exported document with content and download metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Sanitized filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document; `title` is sanitized into the filename.
    pub fn new(content: Vec<u8>, format: ExportFormat, title: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", sanitize_filename(title), format.extension()),
            format,
        }
    }

    /// Create from HTML content.
    pub fn from_html(html: String, title: &str) -> Self {
        Self::new(html.into_bytes(), ExportFormat::Html, title)
    }

    /// Create from PDF bytes.
    pub fn from_pdf(pdf_bytes: Vec<u8>, title: &str) -> Self {
        Self::new(pdf_bytes, ExportFormat::Pdf, title)
    }

    /// `Content-Disposition` header value offering the document as a download.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Required input is missing or empty.
    #[error("{0}")]
    InvalidInput(String),

    /// No usable browser executable could be resolved.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Conversion to PDF failed.
    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    /// The render pipeline exceeded its time budget.
    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),
}

impl ExportError {
    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Create a service unavailable error.
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    /// Create a PDF conversion error.
    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_format_content_types_are_correct() {
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(ExportFormat::Html.content_type(), "text/html; charset=utf-8");
    }

    #[test]
    fn export_format_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&ExportFormat::Pdf).unwrap(), "\"pdf\"");
        assert_eq!(ExportFormat::Html.to_string(), "html");
    }

    // ───────────────────────────────────────────────────────────────
    // Filename sanitizing
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn sanitize_replaces_disallowed_characters() {
        assert_eq!(sanitize_filename("Q1 Report/2024"), "Q1_Report_2024");
    }

    #[test]
    fn sanitize_keeps_allowlisted_characters() {
        assert_eq!(sanitize_filename("release-notes_v1.2"), "release-notes_v1.2");
    }

    #[test]
    fn sanitize_replaces_each_non_ascii_character() {
        assert_eq!(sanitize_filename("dossiê <final>"), "dossi___final_");
    }

    // ───────────────────────────────────────────────────────────────
    // ExportedDocument
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn exported_pdf_uses_sanitized_filename() {
        let doc = ExportedDocument::from_pdf(b"%PDF-1.7".to_vec(), "Q1 Report/2024");
        assert_eq!(doc.filename, "Q1_Report_2024.pdf");
        assert_eq!(doc.content_type, "application/pdf");
        assert_eq!(
            doc.content_disposition(),
            "attachment; filename=\"Q1_Report_2024.pdf\""
        );
    }

    #[test]
    fn exported_html_creates_correctly() {
        let doc = ExportedDocument::from_html("<html></html>".to_string(), "dossie");
        assert_eq!(doc.filename, "dossie.html");
        assert_eq!(doc.format, ExportFormat::Html);
    }

    #[test]
    fn export_error_displays_messages() {
        let err = ExportError::service_unavailable("no browser executable found");
        assert!(err.to_string().contains("no browser executable found"));

        let err = ExportError::invalid_input("markdown required");
        assert_eq!(err.to_string(), "markdown required");

        let err = ExportError::Timeout(60);
        assert!(err.to_string().contains("60 seconds"));
    }

    #[test]
    fn document_export_service_is_object_safe() {
        fn check<T: DocumentExportService + ?Sized>() {}
        check::<dyn DocumentExportService>();
    }
}
