//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `github` - GitHub contents API client (`RepositoryContents`)
//! - `document` - Markdown rendering and headless Chromium PDF printing
//! - `http` - axum routers exposing the API

pub mod document;
pub mod github;
pub mod http;

pub use document::ChromiumExportService;
pub use github::{GitHubClientConfig, GitHubContentsClient};
pub use http::api_router;
