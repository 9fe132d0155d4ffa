//! Routes for the Gate bounded context.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use journey_gate::application::command_handlers::{self, GateOutcome};
use journey_gate::domain::commands;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Deserialize)]
pub struct SubmitCodeRequest {
    /// The code as entered.
    pub code: String,
}

/// POST /
///
/// `200` when granted, `401` when denied. Both carry a [`GateOutcome`].
#[instrument(skip(state, request))]
async fn submit_code(
    State(state): State<AppState>,
    Json(request): Json<SubmitCodeRequest>,
) -> Result<(StatusCode, Json<GateOutcome>), ApiError> {
    let command = commands::SubmitCode {
        correlation_id: Uuid::new_v4(),
        code: request.code,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_code command");

    let outcome = command_handlers::handle_submit_code(
        &command,
        &state.gate,
        &*state.store,
        &state.playback,
        state.clock.as_ref(),
    )
    .await?;

    let status = match outcome {
        GateOutcome::Granted { .. } => StatusCode::OK,
        GateOutcome::Denied { .. } => StatusCode::UNAUTHORIZED,
    };
    Ok((status, Json(outcome)))
}

/// Returns the router for the gate context.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_code))
}
