//! Shared application state.

use std::sync::Arc;

use journey_catalog::domain::catalog::ScreenCatalog;
use journey_core::busy::BusyFlag;
use journey_core::clock::Clock;
use journey_core::store::KeyValueStore;
use journey_gate::application::command_handlers::GateCheck;
use journey_playback::application::toggle::PlaybackToggle;

use crate::audio::ClientAudioBridge;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The screen catalog, loaded once at startup.
    pub catalog: Arc<ScreenCatalog>,
    /// Progress store.
    pub store: Arc<dyn KeyValueStore>,
    /// Clock for advisory timestamps.
    pub clock: Arc<dyn Clock>,
    /// Secret-code gate.
    pub gate: Arc<GateCheck>,
    /// Guards screen advance against overlapping requests.
    pub advance_in_flight: Arc<BusyFlag>,
    /// The process-wide audio resource.
    pub audio: Arc<ClientAudioBridge>,
    /// Play/pause control over `audio`.
    pub playback: Arc<PlaybackToggle>,
}

impl AppState {
    /// Create new application state. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn new(
        catalog: Arc<ScreenCatalog>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        gate: Arc<GateCheck>,
        audio: Arc<ClientAudioBridge>,
    ) -> Self {
        let playback = Arc::new(PlaybackToggle::new(audio.clone(), clock.clone()));
        Self {
            catalog,
            store,
            clock,
            gate,
            advance_in_flight: Arc::new(BusyFlag::new()),
            audio,
            playback,
        }
    }
}
