use axum::{
    extract::{Query, State},
    response::Redirect,
};
use inquiry_auth::AuthError;

use crate::{error::CallbackError, models::CallbackParams, AppState};

pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, CallbackError> {
    // Provider-side denial, e.g. the operator clicked "Cancel"
    if let Some(error) = params.error {
        return Err(AuthError::Denied(error).into());
    }

    state
        .credentials
        .handle_callback(params.code.as_deref(), params.state.as_deref())
        .await?;

    tracing::info!("OAuth callback successful");

    Ok(Redirect::to("/"))
}
