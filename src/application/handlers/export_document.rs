//! ExportDocumentHandler - Command handler turning markdown into a download.

use std::sync::Arc;

use crate::ports::{DocumentExportService, ExportError, ExportFormat, ExportedDocument};

/// Title used when the caller supplies none.
pub const DEFAULT_TITLE: &str = "dossie";

/// Command to export a markdown document.
#[derive(Debug, Clone)]
pub struct ExportDocumentCommand {
    pub markdown: Option<String>,
    pub title: Option<String>,
    pub format: ExportFormat,
}

impl ExportDocumentCommand {
    pub fn pdf(markdown: Option<String>, title: Option<String>) -> Self {
        Self {
            markdown,
            title,
            format: ExportFormat::Pdf,
        }
    }

    pub fn html(markdown: Option<String>, title: Option<String>) -> Self {
        Self {
            markdown,
            title,
            format: ExportFormat::Html,
        }
    }

    /// Effective title: the caller's, unless absent or blank.
    pub fn effective_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }
}

/// Handler for document exports.
pub struct ExportDocumentHandler {
    export_service: Arc<dyn DocumentExportService>,
}

impl ExportDocumentHandler {
    pub fn new(export_service: Arc<dyn DocumentExportService>) -> Self {
        Self { export_service }
    }

    pub async fn handle(&self, cmd: ExportDocumentCommand) -> Result<ExportedDocument, ExportError> {
        let markdown = cmd
            .markdown
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ExportError::invalid_input("markdown required"))?;
        let title = cmd.effective_title();

        let document = match cmd.format {
            ExportFormat::Pdf => {
                let bytes = self.export_service.to_pdf(markdown, title).await?;
                ExportedDocument::from_pdf(bytes, title)
            }
            ExportFormat::Html => {
                let html = self.export_service.to_html(markdown, title).await?;
                ExportedDocument::from_html(html, title)
            }
        };

        tracing::info!(
            format = %document.format,
            filename = %document.filename,
            bytes = document.content.len(),
            "Document exported"
        );

        Ok(document)
    }
}
