//! Routes for resuming and restarting the journey.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use journey_catalog::domain::catalog::ScreenSource;
use journey_navigation::application::command_handlers;
use journey_navigation::application::query_handlers::{self, ProgressView};
use journey_navigation::domain::commands;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::screens::NavigationResponse;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn get_progress(State(state): State<AppState>) -> Json<ProgressView> {
    Json(query_handlers::get_progress(&*state.store, state.catalog.as_ref()).await)
}

/// POST /restart
#[instrument(skip(state))]
async fn restart_journey(
    State(state): State<AppState>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let command = commands::RestartJourney {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling restart_journey command");

    let outcome = command_handlers::handle_restart_journey(
        &command,
        state.catalog.as_ref(),
        &*state.store,
        state.clock.as_ref(),
    )
    .await?;

    Ok(Json(NavigationResponse::from_outcome(
        outcome,
        state.catalog.max_screen(),
    )))
}

/// Returns the router for the journey endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_progress))
        .route("/restart", post(restart_journey))
}
