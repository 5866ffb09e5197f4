//! Gateway server startup helper for embedding in the server binary.
//!
//! Provides [`spawn_gateway`] which launches the Gateway HTTP +
//! `WebSocket` server on a background Tokio task. The server binary
//! calls this during startup so the API runs concurrently with the
//! tick loop.
//!
//! # Usage
//!
//! ```rust,ignore
//! use delve_gateway::startup::spawn_gateway;
//! use delve_gateway::state::AppState;
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(engine, stats));
//! let handle = spawn_gateway("0.0.0.0", 8080, state).await?;
//! // The server is now running. The handle can be awaited on shutdown.
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the Gateway server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the Gateway HTTP server on a background Tokio task.
///
/// Binds to `{host}:{port}` eagerly, so misconfigured addresses and
/// occupied ports surface here rather than inside the background task,
/// then serves the REST API plus `WebSocket` endpoint until the Tokio
/// runtime shuts down. Returns a [`JoinHandle`] so the caller can
/// manage the server's lifecycle alongside the simulation loop.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the listener cannot bind to the
/// requested address.
pub async fn spawn_gateway(
    host: &str,
    port: u16,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    let config = ServerConfig {
        host: String::from(host),
        port,
    };

    let listener = crate::server::bind(&config).await?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::serve(listener, state).await {
            tracing::error!(error = %e, "Gateway server exited with error");
        }
    });

    tracing::info!(host, port, "Gateway server spawned on background task");

    Ok(handle)
}
