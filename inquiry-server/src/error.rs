use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inquiry_auth::AuthError;
use thiserror::Error;

use crate::models::SubmitResponse;
use crate::services::ForwardError;

/// Message shown for every failure that is not the client's fault
pub const GENERIC_FAILURE: &str = "Unable to record your submission. Please try again.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::Forward(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ServerError::Validation(msg) => msg,
            ServerError::Forward(err) => {
                tracing::error!(kind = err.kind(), error = %err, "Submission was not forwarded");
                GENERIC_FAILURE.to_string()
            }
            ServerError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                GENERIC_FAILURE.to_string()
            }
        };

        (status, Json(SubmitResponse::error(message))).into_response()
    }
}

/// Failure of the OAuth redirect endpoint, rendered as plain text
#[derive(Debug, Error)]
#[error(transparent)]
pub struct CallbackError(#[from] pub AuthError);

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            tracing::warn!(error = %self.0, "Rejected OAuth callback");
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "OAuth callback failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, format!("Authorization failed: {}", self.0)).into_response()
    }
}
