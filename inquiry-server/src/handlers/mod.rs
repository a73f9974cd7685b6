mod callback;
mod submit;

pub use callback::oauth_callback;
pub use submit::submit;

use crate::{models::HealthResponse, AppState};
use axum::{extract::State, Json};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        channel: state.forwarder.channel().to_string(),
        authenticated: state.credentials.status().await.is_authenticated(),
    })
}
