//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid GitHub API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Tree depth bound must be at least 1")]
    InvalidTreeDepth,

    #[error("Invalid render timeout")]
    InvalidRenderTimeout,

    #[error("Render timeout ({render_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    RenderTimeoutExceedsRequest { render_secs: u64, request_secs: u64 },
}
