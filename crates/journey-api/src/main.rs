//! Digital Journey API server entry point.

use std::error::Error;
use std::sync::Arc;

use journey_api::audio::ClientAudioBridge;
use journey_api::config::ServerConfig;
use journey_api::state::AppState;
use journey_catalog::application::loader::load_bundled;
use journey_core::clock::SystemClock;
use journey_core::store::KeyValueStore;
use journey_gate::application::command_handlers::GateCheck;
use journey_store::json_file_store::JsonFileStore;
use journey_store::memory_store::MemoryStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Digital Journey API server");

    let config = ServerConfig::from_env()?;
    let catalog = load_bundled()?;

    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using file-backed progress store");
            Arc::new(JsonFileStore::new(path))
        }
        None => {
            tracing::info!("using in-memory progress store");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = AppState::new(
        Arc::new(catalog),
        store,
        Arc::new(SystemClock),
        Arc::new(GateCheck::new(config.gate_secret(), config.gate_delay)),
        Arc::new(ClientAudioBridge::new()),
    );
    app_state
        .playback
        .initialize_background(&config.audio_src)
        .await;

    // TODO: Replace CorsLayer::permissive() with the client's origin once it is served separately.
    let app = journey_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
