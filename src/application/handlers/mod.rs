//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over ports.

mod export_document;
mod walk_repository_tree;

pub use export_document::{ExportDocumentCommand, ExportDocumentHandler, DEFAULT_TITLE};
pub use walk_repository_tree::{WalkRepositoryTreeHandler, WalkTreeQuery, DEFAULT_MAX_DEPTH};
