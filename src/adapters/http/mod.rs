//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter; [`api_router`] merges them into the
//! application router.

pub mod dossier;
pub mod export;
pub mod repository;

use axum::Router;

pub use dossier::{dossier_router, DossierAppState};
pub use export::{export_router, ExportAppState};
pub use repository::{repository_router, RepositoryAppState};

/// Full API router with every endpoint and its state applied.
pub fn api_router(
    repository: RepositoryAppState,
    export: ExportAppState,
    dossier: DossierAppState,
) -> Router {
    Router::new()
        .merge(repository_router().with_state(repository))
        .merge(export_router().with_state(export))
        .merge(dossier_router().with_state(dossier))
}
