use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::Instrument;

use crate::{
    error::ServerError,
    models::{SubmissionRecord, SubmitRequest, SubmitResponse},
    AppState,
};

pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ServerError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected submission body");
        ServerError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let record = SubmissionRecord::from_fields(req.name.as_deref(), req.phone.as_deref())?;

    let channel = state.forwarder.channel();
    let span = tracing::info_span!("forward_submission", %channel);

    let ack = state
        .forwarder
        .submit(&record)
        .instrument(span.clone())
        .await?;

    span.in_scope(|| {
        tracing::info!(location = ?ack.location, "Submission forwarded");
    });

    Ok(Json(SubmitResponse::success()))
}
