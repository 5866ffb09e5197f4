//! Shared application state for the Gateway API server.
//!
//! [`AppState`] bundles the three live surfaces the HTTP layer exposes:
//! the engine's command-and-query interface, the stats read model, and
//! the event bus for `WebSocket` streaming. All of them are cheap
//! handles over shared interiors, so the state clones freely into
//! extractors and background tasks.

use delve_bus::{EventBus, Subscription};
use delve_engine::DungeonEngine;
use delve_stats::StatsReader;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Command routes go through `engine`, read routes through
/// `stats`, and the `WebSocket` route subscribes to `bus`.
#[derive(Clone)]
pub struct AppState {
    /// Command surface and authoritative world state.
    pub engine: DungeonEngine,
    /// Event-fold read model (profiles, leaderboard, event log).
    pub stats: StatsReader,
    /// Bus handle for live event subscriptions.
    pub bus: EventBus,
}

impl AppState {
    /// Build the gateway state over a running engine and stats reader.
    ///
    /// The bus handle is taken from the engine so every surface the
    /// gateway serves observes the same event stream.
    pub fn new(engine: DungeonEngine, stats: StatsReader) -> Self {
        let bus = engine.bus().clone();
        Self { engine, stats, bus }
    }

    /// Subscribe to the full dungeon event stream.
    ///
    /// Returns a receiver that yields every event published after this
    /// call, across all topics.
    pub fn subscribe_events(&self) -> Subscription {
        self.bus.subscribe_all()
    }
}
