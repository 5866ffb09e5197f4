//! Axum router construction for the Gateway API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Gateway server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/events` -- `WebSocket` dungeon event stream
/// - `POST /api/players` -- join the dungeon
/// - `POST /api/players/:id/move` -- step a player one cell
/// - `GET /api/players` -- list players
/// - `GET /api/players/:id/profile` -- per-player stats profile
/// - `GET /api/leaderboard` -- players ranked by experience
/// - `GET /api/map` -- dungeon grid dump
/// - `GET /api/events` -- recent events
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/events", get(ws::ws_events))
        // REST API
        .route(
            "/api/players",
            post(handlers::join_player).get(handlers::list_players),
        )
        .route("/api/players/{id}/move", post(handlers::move_player))
        .route("/api/players/{id}/profile", get(handlers::get_profile))
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .route("/api/map", get(handlers::get_map))
        .route("/api/events", get(handlers::list_events))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
