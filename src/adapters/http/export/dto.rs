//! DTOs for export endpoints.

use serde::Deserialize;

use crate::application::handlers::ExportDocumentCommand;
use crate::ports::ExportFormat;

/// Request body for export endpoints: `{markdown, title?}`.
///
/// Both fields are optional at the wire level so a missing `markdown`
/// reaches the application handler and is reported as a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ExportRequest {
    /// Parses a raw request body. An empty body is an empty request.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    pub fn into_command(self, format: ExportFormat) -> ExportDocumentCommand {
        match format {
            ExportFormat::Pdf => ExportDocumentCommand::pdf(self.markdown, self.title),
            ExportFormat::Html => ExportDocumentCommand::html(self.markdown, self.title),
        }
    }
}
