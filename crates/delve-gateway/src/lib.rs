//! Gateway API server for the Delve dungeon simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Command endpoints** (`POST /api/players`,
//!   `POST /api/players/{id}/move`) that drive the shared
//!   [`DungeonEngine`](delve_engine::DungeonEngine)
//! - **Read endpoints** for world state (players, map) and for the
//!   stats projector's read model (profiles, leaderboard, event log)
//! - **`WebSocket` endpoint** (`/ws/events`) streaming every bus event
//!   as JSON text frames
//! - **Minimal HTML dashboard** (`GET /`) showing current tick, entity
//!   counts, and links to API endpoints
//!
//! # Architecture
//!
//! The gateway owns no state of its own. Commands go through the
//! engine, which mutates the world and publishes events; reads come
//! from either the engine's world state or the stats projector, both
//! behind cheap shared handles in [`AppState`]. `WebSocket` clients
//! receive events via a bus subscription with automatic lag handling.
//!
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::GatewayError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use startup::{spawn_gateway, StartupError};
pub use state::AppState;
