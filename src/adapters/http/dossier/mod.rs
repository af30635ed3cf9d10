//! Dossier HTTP adapter - Markdown dossier assembly over HTTP.

pub mod handlers;
pub mod routes;

pub use handlers::DossierAppState;
pub use routes::dossier_router;
