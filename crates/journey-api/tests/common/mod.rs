//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use journey_catalog::application::loader::load_bundled;
use journey_core::clock::Clock;
use journey_core::store::KeyValueStore;
use journey_gate::application::command_handlers::GateCheck;
use journey_gate::domain::secret::GateSecret;
use journey_test_support::{FixedClock, RecordingStore};
use tower::ServiceExt;

use journey_api::audio::ClientAudioBridge;
use journey_api::build_router;
use journey_api::state::AppState;

/// Secret the test gate accepts.
pub const SECRET: &str = "HK-THANGO25";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A running application over the bundled catalog. Cloning the state shares
/// the store, gate and audio bridge, so successive requests see each other.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<RecordingStore>,
}

impl TestApp {
    /// Builds the app with an empty recording store and an instant gate.
    pub fn new() -> Self {
        Self::with_store(Arc::new(RecordingStore::new()))
    }

    /// Builds the app over `store`.
    pub fn with_store(store: Arc<RecordingStore>) -> Self {
        let state = build_state(store.clone());
        Self { state, store }
    }

    /// A fresh router over the shared state.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        get_json(self.router(), uri).await
    }

    pub async fn post(&self, uri: &str, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        post_json(self.router(), uri, body).await
    }
}

/// Builds state the same way `main.rs` does, with deterministic clock and no
/// gate delay.
pub fn build_state(store: Arc<dyn KeyValueStore>) -> AppState {
    AppState::new(
        Arc::new(load_bundled().unwrap()),
        store,
        fixed_clock(),
        Arc::new(GateCheck::new(GateSecret::new(SECRET), Duration::ZERO)),
        Arc::new(ClientAudioBridge::new()),
    )
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
