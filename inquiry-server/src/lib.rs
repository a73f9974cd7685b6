pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Configuration;
pub use error::ServerError;

use axum::{
    routing::{get, post},
    Router,
};
use inquiry_auth::CredentialManager;
use services::Forwarder;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<dyn Forwarder>,
    pub credentials: Arc<CredentialManager>,
}

/// Build the HTTP router, optionally serving a static directory for unmatched paths
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/submit", post(handlers::submit))
        .route("/oauth2callback", get(handlers::oauth_callback));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            // CORS needs a `Default` response body, so the limit wraps it from outside
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
