//! HTTP handlers for repository endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{WalkRepositoryTreeHandler, WalkTreeQuery, DEFAULT_MAX_DEPTH};
use crate::ports::{ContentsError, RepositoryContents};

use super::dto::{ErrorResponse, TreeQuery};

/// Response header listing directories whose contents were cut by the depth bound.
pub const TRUNCATED_HEADER: &str = "x-tree-truncated";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RepositoryAppState {
    pub contents: Arc<dyn RepositoryContents>,
    pub max_tree_depth: usize,
}

impl RepositoryAppState {
    pub fn new(contents: Arc<dyn RepositoryContents>) -> Self {
        Self {
            contents,
            max_tree_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = max_tree_depth;
        self
    }

    pub fn walk_tree_handler(&self) -> WalkRepositoryTreeHandler {
        WalkRepositoryTreeHandler::new(self.contents.clone()).with_max_depth(self.max_tree_depth)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/repos/:owner/:repo/tree - Every node of the repository tree
pub async fn get_tree(
    State(state): State<RepositoryAppState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<TreeQuery>,
) -> Result<impl IntoResponse, RepositoryApiError> {
    let mut walk_query = WalkTreeQuery::root(owner, repo);
    if let Some(path) = query.path {
        walk_query = walk_query.with_path(path);
    }

    let walk = state.walk_tree_handler().handle(walk_query).await?;

    let mut headers = HeaderMap::new();
    if walk.is_truncated() {
        // Paths that are not valid header text are left out of the header only.
        if let Ok(value) = HeaderValue::from_str(&walk.truncated.join(",")) {
            headers.insert(TRUNCATED_HEADER, value);
        }
    }

    Ok((headers, Json(walk.nodes)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper mapping listing failures to HTTP responses.
#[derive(Debug)]
pub struct RepositoryApiError(ContentsError);

impl From<ContentsError> for RepositoryApiError {
    fn from(err: ContentsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RepositoryApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            ContentsError::MissingCredential | ContentsError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            ContentsError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ContentsError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Repository tree walk failed");
        }

        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
