//! DTOs for repository endpoints.

use serde::{Deserialize, Serialize};

/// Query parameters for the tree endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeQuery {
    /// Directory to start from; the repository root when absent.
    #[serde(default)]
    pub path: Option<String>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
