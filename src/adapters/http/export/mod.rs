//! Export HTTP adapter - REST API for markdown document export.
//!
//! Provides endpoints for:
//! - Printing markdown to a downloadable PDF
//! - Rendering markdown to a printable HTML preview

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ExportApiError, ExportAppState};
pub use routes::export_router;
