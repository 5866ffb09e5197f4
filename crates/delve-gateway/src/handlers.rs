//! REST API endpoint handlers for the Gateway server.
//!
//! Command handlers (join, move) call into the shared
//! [`DungeonEngine`](delve_engine::DungeonEngine); read handlers serve
//! the engine's world state or the stats projector's read model via the
//! shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/players` | Join the dungeon as a new player |
//! | `POST` | `/api/players/:id/move` | Step a player one cell |
//! | `GET` | `/api/players` | List all players |
//! | `GET` | `/api/players/:id/profile` | Per-player stats profile |
//! | `GET` | `/api/leaderboard` | Players ranked by experience |
//! | `GET` | `/api/map` | Dungeon grid dump |
//! | `GET` | `/api/events` | Recent events from the log |

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use delve_map::MapSnapshot;
use delve_types::{PlayerClass, PlayerId};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body and query parameter structs
// ---------------------------------------------------------------------------

/// Request body for the `POST /api/players` endpoint.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Display name for the new player.
    pub name: String,
    /// Character class to join as (wire name `playerClass`).
    pub player_class: PlayerClass,
}

/// Request body for the `POST /api/players/:id/move` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct MoveRequest {
    /// Compass direction to step in (`north`, `south`, `east`, `west`).
    pub direction: String,
}

/// Query parameters for the `GET /api/events` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EventsQuery {
    /// Maximum number of events to return (default 50, max 1000).
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing world status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tick = state.engine.tick_count().await;
    let player_count = state.engine.players().await.len();
    let monster_count = state.engine.monsters().await.len();
    let event_count = state.stats.event_count().await;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Delve Gateway</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        li.post::before {{ content: "POST "; color: #d2a8ff; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Delve Gateway</h1>
    <p class="subtitle">Dungeon simulation gateway</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Tick</div>
            <div class="value">{tick}</div>
        </div>
        <div class="metric">
            <div class="label">Players</div>
            <div class="value">{player_count}</div>
        </div>
        <div class="metric">
            <div class="label">Monsters</div>
            <div class="value">{monster_count}</div>
        </div>
        <div class="metric">
            <div class="label">Events</div>
            <div class="value">{event_count}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li class="post"><a href="/api/players">/api/players</a> -- Join the dungeon ({{name, playerClass}})</li>
        <li class="post"><a href="/api/players/:id/move">/api/players/:id/move</a> -- Step one cell ({{direction}})</li>
        <li><a href="/api/players">/api/players</a> -- List all players</li>
        <li><a href="/api/players/:id/profile">/api/players/:id/profile</a> -- Per-player stats profile</li>
        <li><a href="/api/leaderboard">/api/leaderboard</a> -- Players ranked by experience</li>
        <li><a href="/api/map">/api/map</a> -- Dungeon grid dump</li>
        <li><a href="/api/events">/api/events</a> -- Recent events (?limit=N)</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li style="list-style:none;"><code>ws://host:port/ws/events</code> -- Live dungeon event stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// POST /api/players -- join the dungeon
// ---------------------------------------------------------------------------

/// Create a new player at the dungeon entrance and publish
/// `player.joined`.
///
/// # Request Body
///
/// ```json
/// { "name": "Mira", "playerClass": "mage" }
/// ```
pub async fn join_player(
    State(state): State<Arc<AppState>>,
    Json(body): Json<JoinRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let player = state.engine.join(body.name, body.player_class).await;

    Ok((StatusCode::CREATED, Json(player)))
}

// ---------------------------------------------------------------------------
// POST /api/players/:id/move -- step a player one cell
// ---------------------------------------------------------------------------

/// Move a player one cell in a compass direction.
///
/// Returns the player's position after the command: the new cell when
/// the step was walkable, the unchanged cell when it was blocked.
///
/// # Request Body
///
/// ```json
/// { "direction": "north" }
/// ```
pub async fn move_player(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Json(body): Json<MoveRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = parse_uuid(&id_str)?;

    let position = state
        .engine
        .move_player(PlayerId::from(id), &body.direction)
        .await?;

    Ok(Json(serde_json::json!({ "position": position })))
}

// ---------------------------------------------------------------------------
// GET /api/players -- list players
// ---------------------------------------------------------------------------

/// List every player currently in the world, dead or alive.
pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, GatewayError> {
    let players = state.engine.players().await;

    Ok(Json(serde_json::json!({
        "count": players.len(),
        "players": players,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/players/:id/profile -- per-player stats profile
// ---------------------------------------------------------------------------

/// Return the stats profile for a single player: identity plus damage
/// received, monsters encountered, and loot collected.
///
/// The profile comes from the event-fold projector, so a player that
/// joined in the last few milliseconds can briefly 404 here while
/// already visible under `/api/players`.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = parse_uuid(&id_str)?;

    let profile = state.stats.profile(PlayerId::from(id)).await?;

    Ok(Json(profile))
}

// ---------------------------------------------------------------------------
// GET /api/leaderboard -- players ranked by experience
// ---------------------------------------------------------------------------

/// Return all player profiles ordered by experience, highest first.
/// Ties keep join order.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, GatewayError> {
    let leaderboard = state.stats.leaderboard().await;

    Ok(Json(serde_json::json!({
        "count": leaderboard.len(),
        "leaderboard": leaderboard,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/map -- dungeon grid dump
// ---------------------------------------------------------------------------

/// Return the full dungeon grid: dimensions plus one row of cell kinds
/// per grid row, top to bottom.
pub async fn get_map(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, GatewayError> {
    let MapSnapshot {
        width,
        height,
        cells,
    } = state.engine.map().snapshot();

    Ok(Json(serde_json::json!({
        "width": width,
        "height": height,
        "cells": cells,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/events -- recent events
// ---------------------------------------------------------------------------

/// Return the most recent dungeon events from the stats log, oldest
/// first within the returned window.
///
/// # Query Parameters
///
/// - `limit`: Maximum number of events to return (default 50, max 1000).
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let limit = params.limit.unwrap_or(50).min(1000);

    let events = state.stats.events(Some(limit)).await;

    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": events,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a UUID from a string, returning a [`GatewayError`] on failure.
fn parse_uuid(s: &str) -> Result<Uuid, GatewayError> {
    s.parse::<Uuid>()
        .map_err(|e| GatewayError::InvalidUuid(format!("{s}: {e}")))
}
