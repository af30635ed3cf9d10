//! Repo Dossier HTTP server.

use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use repo_dossier::adapters::http::{DossierAppState, ExportAppState, RepositoryAppState};
use repo_dossier::adapters::{api_router, ChromiumExportService, GitHubClientConfig, GitHubContentsClient};
use repo_dossier::config::{AppConfig, LogFormat, ServerConfig};
use repo_dossier::domain::dossier::DossierAssembler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));
    match config.server.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    config.validate()?;

    if !config.github.has_token() {
        tracing::warn!("No GitHub token configured; tree requests will be rejected");
    }

    let contents = GitHubContentsClient::new(GitHubClientConfig::from(&config.github))?;
    let repository = RepositoryAppState::new(Arc::new(contents))
        .with_max_tree_depth(config.github.max_tree_depth);

    let export = ExportAppState::new(Arc::new(ChromiumExportService::from_config(&config.browser)));

    let template = config.dossier.load_template()?;
    let dossier = DossierAppState::new(DossierAssembler::new(template));

    let app = api_router(repository, export, dossier)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
