//! Axum router configuration for dossier endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{build_dossier, DossierAppState};

/// Create the dossier API router.
///
/// # Routes
/// - `POST /api/dossier` - Assemble a dossier from a JSON `DossierRequest`
pub fn dossier_router() -> Router<DossierAppState> {
    Router::new().route("/api/dossier", post(build_dossier))
}
