//! Repository HTTP adapter - REST API for repository tree walks.
//!
//! Provides endpoints for:
//! - Listing every file and directory of a hosted repository

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{RepositoryApiError, RepositoryAppState, TRUNCATED_HEADER};
pub use routes::repository_router;
