//! Routes for the Screen Catalog and Screen Navigation bounded contexts.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use journey_catalog::domain::catalog::ScreenSource;
use journey_core::advisory::Advisory;
use journey_core::screen_id::ScreenId;
use journey_navigation::application::command_handlers::{self, NavigationOutcome};
use journey_navigation::application::query_handlers::{self, ScreenView};
use journey_navigation::domain::commands;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// One entry of the catalog listing.
#[derive(Debug, Serialize)]
pub struct ScreenSummary {
    /// Screen id.
    pub id: ScreenId,
    /// Screen title.
    pub title: String,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Asset version.
    pub version: u32,
    /// SHA-256 of the asset.
    pub version_hash: String,
    /// Highest screen id.
    pub max_screen: u32,
    /// Screens in id order.
    pub screens: Vec<ScreenSummary>,
}

/// Response body for navigation commands.
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// Client route to move to.
    pub route: String,
    /// Target screen id.
    pub target: ScreenId,
    /// The resolved view of the target.
    pub view: ScreenView,
    /// Set when the cursor could not be persisted.
    pub advisory: Option<Advisory>,
}

impl NavigationResponse {
    pub(crate) fn from_outcome(outcome: NavigationOutcome, max_screen: u32) -> Self {
        Self {
            route: outcome.route(),
            target: outcome.target,
            view: ScreenView::from_state(&outcome.state, max_screen),
            advisory: outcome.advisory,
        }
    }
}

/// GET /
#[instrument(skip(state))]
async fn list_screens(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = &state.catalog;
    Json(CatalogResponse {
        version: catalog.version(),
        version_hash: catalog.version_hash().to_owned(),
        max_screen: catalog.max_screen(),
        screens: catalog
            .iter()
            .map(|record| ScreenSummary {
                id: record.id,
                title: record.title.clone(),
            })
            .collect(),
    })
}

/// GET /{screen_id}
#[instrument(skip(state))]
async fn get_screen(
    State(state): State<AppState>,
    Path(screen_id): Path<String>,
) -> Json<ScreenView> {
    Json(query_handlers::get_screen(&screen_id, state.catalog.as_ref()))
}

/// POST /{screen_id}/advance
#[instrument(skip(state))]
async fn advance_screen(
    State(state): State<AppState>,
    Path(screen_id): Path<String>,
) -> Result<Json<NavigationResponse>, ApiError> {
    let command = commands::AdvanceScreen {
        correlation_id: Uuid::new_v4(),
        from_screen: screen_id,
    };

    info!(correlation_id = %command.correlation_id, "handling advance_screen command");

    let outcome = command_handlers::handle_advance_screen(
        &command,
        state.catalog.as_ref(),
        &*state.store,
        &state.advance_in_flight,
        state.clock.as_ref(),
    )
    .await?;

    Ok(Json(NavigationResponse::from_outcome(
        outcome,
        state.catalog.max_screen(),
    )))
}

/// Returns the router for the screen contexts.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_screens))
        .route("/{screen_id}", get(get_screen))
        .route("/{screen_id}/advance", post(advance_screen))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use journey_core::store::CURRENT_SCREEN_KEY;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::state::test_state;

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_screens_returns_catalog_summary() {
        // Arrange
        let (state, _) = test_state::fresh();
        let app = router().with_state(state);

        // Act
        let (status, json) = send(app, "GET", "/").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["max_screen"], 50);
        assert_eq!(json["screens"].as_array().unwrap().len(), 50);
        assert_eq!(json["screens"][0]["title"], "A Radiant Welcome!");
        assert_eq!(json["version_hash"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_get_screen_returns_displaying_view() {
        let (state, _) = test_state::fresh();
        let app = router().with_state(state);

        let (status, json) = send(app, "GET", "/7").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "displaying");
        assert_eq!(json["screen"]["id"], 7);
        assert_eq!(json["screen"]["chapter"], "Chapter 7 / 50");
    }

    #[tokio::test]
    async fn test_get_screen_past_the_end_returns_completed_view() {
        let (state, _) = test_state::fresh();
        let app = router().with_state(state);

        let (status, json) = send(app, "GET", "/51").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "completed");
        assert_eq!(json["actions"]["restart"], "/screens/1");
    }

    #[tokio::test]
    async fn test_get_screen_with_oversized_id_returns_completed_view() {
        let (state, _) = test_state::fresh();
        let app = router().with_state(state);

        let (status, json) = send(app, "GET", "/99999999999").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "completed");
    }

    #[tokio::test]
    async fn test_get_screen_with_garbage_id_returns_error_view() {
        let (state, _) = test_state::fresh();
        let app = router().with_state(state);

        let (status, json) = send(app, "GET", "/abc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "error");
        assert_eq!(json["actions"]["return_to_start"], "/");
    }

    #[tokio::test]
    async fn test_advance_persists_and_returns_next_route() {
        // Arrange
        let (state, store) = test_state::fresh();
        let app = router().with_state(state);

        // Act
        let (status, json) = send(app, "POST", "/3/advance").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["route"], "/screens/4");
        assert_eq!(json["view"]["screen"]["id"], 4);
        assert!(json["advisory"].is_null());
        assert_eq!(store.value(CURRENT_SCREEN_KEY).as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_advance_from_completed_returns_422() {
        let (state, _) = test_state::fresh();
        let app = router().with_state(state);

        let (status, json) = send(app, "POST", "/51/advance").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "invalid_transition");
        assert_eq!(json["recovery"], "restart");
    }

    #[tokio::test]
    async fn test_advance_while_in_flight_returns_409() {
        let (state, store) = test_state::fresh();
        let flag = Arc::clone(&state.advance_in_flight);
        let _held = flag.try_begin().unwrap();
        let app = router().with_state(state);

        let (status, json) = send(app, "POST", "/3/advance").await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "already_in_flight");
        assert!(store.operations().is_empty());
    }

    #[tokio::test]
    async fn test_advance_with_failing_store_still_routes_with_advisory() {
        let state = test_state::with_store(Arc::new(journey_test_support::FailingStore));
        let app = router().with_state(state);

        let (status, json) = send(app, "POST", "/50/advance").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["route"], "/screens/51");
        assert_eq!(json["view"]["state"], "completed");
        assert_eq!(json["advisory"]["kind"], "persistence_unavailable");
    }
}
