//! HTTP handlers for dossier endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::dossier::{DossierAssembler, DossierRequest};

#[derive(Clone)]
pub struct DossierAppState {
    pub assembler: Arc<DossierAssembler>,
}

impl DossierAppState {
    pub fn new(assembler: DossierAssembler) -> Self {
        Self {
            assembler: Arc::new(assembler),
        }
    }
}

/// POST /api/dossier - Assemble the markdown dossier for a repository
pub async fn build_dossier(
    State(state): State<DossierAppState>,
    Json(request): Json<DossierRequest>,
) -> impl IntoResponse {
    let markdown = state.assembler.build(&request);

    tracing::info!(
        repository = %request.metadata.full_name(),
        files = request.files.len(),
        bytes = markdown.len(),
        "Dossier assembled"
    );

    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        markdown,
    )
}
