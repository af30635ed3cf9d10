//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `RepositoryContents` - Directory listings of a hosted repository
//! - `DocumentExportService` - Markdown to HTML/PDF conversion
//! - `BrowserResolver` - One strategy for locating a browser executable

mod browser_resolver;
mod document_export_service;
mod repository_contents;

pub use browser_resolver::BrowserResolver;
pub use document_export_service::{
    sanitize_filename, DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use repository_contents::{ContentEntry, ContentsError, EntryKind, RepositoryContents};
