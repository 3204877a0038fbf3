//! HTTP Game Server
//!
//! Router assembly, configuration, and the serve loop. The actual game
//! lives in `game/` and `highscore/`; this module only wires handlers to
//! shared state and keeps the session table swept.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::time::interval;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::highscore::HighscoreStore;
use crate::network::handlers;
use crate::network::session::SessionManager;

/// How often the idle-session sweep runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Path of the persisted highscore file.
    pub highscore_path: PathBuf,
    /// Sessions idle longer than this are pruned.
    pub session_idle_timeout: Duration,
    /// Server version string.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            highscore_path: PathBuf::from("highscores.txt"),
            session_idle_timeout: Duration::from_secs(1800),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ServerConfig {
    /// Build from environment variables, falling back to defaults:
    /// `HILO_ADDR`, `HILO_HIGHSCORES`, `HILO_SESSION_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HILO_ADDR") {
            if let Ok(addr) = addr.parse() {
                config.bind_addr = addr;
            }
        }
        if let Ok(path) = std::env::var("HILO_HIGHSCORES") {
            config.highscore_path = PathBuf::from(path);
        }
        if let Ok(secs) = std::env::var("HILO_SESSION_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.session_idle_timeout = Duration::from_secs(secs);
            }
        }

        config
    }
}

/// Game server errors.
#[derive(Debug, thiserror::Error)]
pub enum GameServerError {
    /// Failed to bind the listen address.
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serving failed after startup.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    /// Active player sessions.
    pub sessions: Arc<SessionManager>,
    /// Persisted highscore store.
    pub store: Arc<HighscoreStore>,
    /// Version reported by the health endpoint.
    pub version: String,
}

impl AppState {
    /// Build the shared state for a configuration.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new()),
            store: Arc::new(HighscoreStore::new(&config.highscore_path)),
            version: config.version.clone(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_guess))
        .route("/healthz", get(handlers::health))
        .route("/highscores", get(handlers::highscores))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: ServerConfig) -> Result<(), GameServerError> {
    let state = AppState::new(&config);

    // Periodic idle-session sweep
    let sessions = state.sessions.clone();
    let idle_timeout = config.session_idle_timeout;
    tokio::spawn(async move {
        let mut tick = interval(CLEANUP_INTERVAL);
        loop {
            tick.tick().await;
            let removed = sessions.cleanup(idle_timeout).await;
            if removed > 0 {
                debug!(removed, "pruned idle sessions");
            }
        }
    });

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| GameServerError::BindFailed {
            addr: config.bind_addr,
            source,
        })?;

    info!(addr = %config.bind_addr, highscores = %config.highscore_path.display(), "listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
