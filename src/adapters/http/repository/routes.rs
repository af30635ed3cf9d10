//! Axum router configuration for repository endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_tree, RepositoryAppState};

/// Create the repository API router.
///
/// # Routes
/// - `GET /api/repos/:owner/:repo/tree` - Walk the tree (query: path)
pub fn repository_router() -> Router<RepositoryAppState> {
    Router::new().route("/api/repos/:owner/:repo/tree", get(get_tree))
}
