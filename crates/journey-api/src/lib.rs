//! Digital Journey API: the HTTP surface over the gate, navigation and
//! playback contexts.

use axum::Router;

pub mod audio;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the full application router over `state`.
pub fn build_router(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/gate", routes::gate::router())
        .nest("/api/v1/screens", routes::screens::router())
        .nest("/api/v1/journey", routes::journey::router())
        .nest("/api/v1/playback", routes::playback::router())
        .with_state(state)
}
