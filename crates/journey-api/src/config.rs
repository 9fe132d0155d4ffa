//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use journey_gate::application::command_handlers::DEFAULT_VERIFICATION_DELAY;
use journey_gate::domain::secret::GateSecret;

use crate::error::AppError;

/// Default track for the background music.
pub const DEFAULT_AUDIO_SRC: &str = "/audio/background-music.mp3";

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Progress file (`JOURNEY_STORE_PATH`). In-memory store when unset.
    pub store_path: Option<PathBuf>,
    /// Background track URL (`JOURNEY_AUDIO_SRC`).
    pub audio_src: String,
    /// Gate verification delay (`JOURNEY_GATE_DELAY_MS`).
    pub gate_delay: Duration,
    /// Runtime override of the built-in secret (`JOURNEY_SECRET_CODE`).
    pub secret_override: Option<String>,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let gate_delay = match lookup("JOURNEY_GATE_DELAY_MS") {
            Some(raw) => raw.parse().map(Duration::from_millis).map_err(|e| {
                AppError::Config(format!("JOURNEY_GATE_DELAY_MS must be milliseconds: {e}"))
            })?,
            None => DEFAULT_VERIFICATION_DELAY,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            store_path: lookup("JOURNEY_STORE_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            audio_src: lookup("JOURNEY_AUDIO_SRC").unwrap_or_else(|| DEFAULT_AUDIO_SRC.to_string()),
            gate_delay,
            secret_override: lookup("JOURNEY_SECRET_CODE").filter(|code| !code.is_empty()),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// The gate secret: the runtime override if set, else the built-in one.
    #[must_use]
    pub fn gate_secret(&self) -> GateSecret {
        self.secret_override
            .as_ref()
            .map_or_else(GateSecret::built_in, GateSecret::new)
    }
}
