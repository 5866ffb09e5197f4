//! Delve server binary for the dungeon simulation.
//!
//! This is the main entry point that wires together the dungeon map,
//! event bus, engine tick loop, stats projector, and HTTP/`WebSocket`
//! gateway. It loads configuration, initializes all subsystems, and
//! runs the simulation until ctrl-c.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `delve.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Generate the dungeon map (seeded when configured)
//! 4. Create the event bus and engine
//! 5. Spawn the stats projector
//! 6. Start the Gateway API server
//! 7. Spawn the engine tick loop and wait for ctrl-c
//! 8. Signal shutdown and log the final reports

mod error;

use std::path::Path;
use std::sync::Arc;

use delve_bus::EventBus;
use delve_engine::{spawn_engine, DungeonConfig, DungeonEngine, EngineSettings};
use delve_gateway::{spawn_gateway, AppState};
use delve_map::DungeonMap;
use delve_stats::spawn_stats;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Config file looked up relative to the current working directory.
const CONFIG_FILE: &str = "delve.yaml";

/// Application entry point for the Delve server.
///
/// Initializes all subsystems and runs the simulation until ctrl-c.
/// Returns an error code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step fails or a background
/// task panics.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. This happens before logging is installed
    //    so the configured default level can apply.
    let config_from_file = Path::new(CONFIG_FILE).exists();
    let config = load_config()?;

    // 2. Initialize structured logging. `RUST_LOG` overrides the
    //    configured default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("delve-server starting");
    let config_source = if config_from_file { CONFIG_FILE } else { "defaults" };
    info!(
        source = config_source,
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_monsters = config.spawn.max_monsters,
        "Configuration loaded"
    );

    // 3. Generate the dungeon map. A configured seed makes the map and
    //    every later spawn, movement, and loot roll reproducible.
    let mut rng = config
        .world
        .seed
        .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);

    let map = DungeonMap::generate(
        config.map.width,
        config.map.height,
        config.map.wall_density,
        &mut rng,
    )
    .map_err(ServerError::from)?;
    info!(
        width = map.width(),
        height = map.height(),
        entrance = %map.entrance(),
        treasure_room = %map.treasure_room(),
        "Dungeon map generated"
    );

    // 4. Create the event bus and engine.
    let bus = EventBus::new();
    let engine = DungeonEngine::new(map, bus.clone(), EngineSettings::from_config(&config));
    info!("Engine initialized");

    // 5. Spawn the stats projector.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (stats, stats_handle) = spawn_stats(&bus, shutdown_rx.clone());
    info!("Stats projector started");

    // 6. Start the Gateway API server.
    let app_state = Arc::new(AppState::new(engine.clone(), stats));
    let _gateway_handle = spawn_gateway(&config.gateway.host, config.gateway.port, app_state)
        .await
        .map_err(ServerError::from)?;
    info!(
        host = config.gateway.host,
        port = config.gateway.port,
        "Gateway API server started"
    );

    // 7. Spawn the engine tick loop and wait for ctrl-c. The tick loop
    //    continues the map's RNG stream.
    let engine_handle = spawn_engine(engine, config.tick_interval(), rng, shutdown_rx);
    info!("Tick loop running, press ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-c received, shutting down");

    // 8. Signal shutdown and collect the final reports.
    if shutdown_tx.send(true).is_err() {
        warn!("All subsystems already stopped before shutdown signal");
    }

    let runner_report = engine_handle.await?;
    let stats_report = stats_handle.await?;

    info!(
        ticks = runner_report.ticks,
        joins_applied = runner_report.joins_applied,
        moves_applied = runner_report.moves_applied,
        events_folded = stats_report.events_folded,
        events_missed = stats_report.events_missed,
        "delve-server shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from [`CONFIG_FILE`].
///
/// Looks for the config file relative to the current working
/// directory; missing files fall back to defaults. Logging is not yet
/// installed when this runs, so the outcome is reported by `main`.
fn load_config() -> Result<DungeonConfig, ServerError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(DungeonConfig::from_file(config_path)?)
    } else {
        Ok(DungeonConfig::default())
    }
}
