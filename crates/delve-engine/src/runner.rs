//! The engine runner: one task that owns the tick clock and the RNG.
//!
//! [`run_engine`] multiplexes three concerns over a single `select!` loop:
//!
//! - **Ticks**: fire on a fixed interval. A tick that overruns its slot
//!   delays the next one instead of bursting to catch up.
//! - **Intent folds**: `player.joined` and `player.moved` events from the
//!   bus are folded back into world state, so an engine fed by a remote
//!   producer converges on the same state as the one that published.
//! - **Shutdown**: a `watch` flag flipping to `true` (or its sender being
//!   dropped) stops the loop cleanly.
//!
//! Single ownership of the RNG here is what makes a seeded run
//! reproducible end to end.

use std::time::Duration;

use rand::rngs::SmallRng;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use delve_bus::RecvError;
use delve_types::Topic;

use crate::engine::DungeonEngine;

/// Why the runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerStop {
    /// The shutdown flag fired, or its sender was dropped.
    ShutdownRequested,
    /// The event bus closed underneath the intent subscriptions.
    BusClosed,
}

/// Counters for a completed runner, returned once the loop exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerReport {
    /// Why the loop exited.
    pub stop: RunnerStop,
    /// Ticks executed.
    pub ticks: u64,
    /// Join intents folded from the bus.
    pub joins_applied: u64,
    /// Move intents folded from the bus.
    pub moves_applied: u64,
}

/// Drive the engine until shutdown.
///
/// The first tick fires one full interval after startup, matching the
/// cadence players observe from then on.
pub async fn run_engine(
    engine: DungeonEngine,
    tick_interval: Duration,
    mut rng: SmallRng,
    mut shutdown: watch::Receiver<bool>,
) -> RunnerReport {
    let mut joins = engine.bus().subscribe(Topic::PlayerJoined);
    let mut moves = engine.bus().subscribe(Topic::PlayerMoved);

    let first_tick = tokio::time::Instant::now()
        .checked_add(tick_interval)
        .unwrap_or_else(tokio::time::Instant::now);
    let mut interval = tokio::time::interval_at(first_tick, tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval = ?tick_interval, "Engine runner starting");

    let mut report = RunnerReport {
        stop: RunnerStop::ShutdownRequested,
        ticks: 0,
        joins_applied: 0,
        moves_applied: 0,
    };

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let summary = engine.run_tick(&mut rng).await;
                info!(
                    tick = summary.tick,
                    players = summary.player_count,
                    monsters = summary.monster_count,
                    moved = summary.monsters_moved,
                    attacks = summary.attacks,
                    events = summary.events_published,
                    "Tick complete"
                );
                report.ticks = report.ticks.saturating_add(1);
            }
            event = joins.recv() => match event {
                Ok(event) => {
                    engine.apply_event(&event).await;
                    report.joins_applied = report.joins_applied.saturating_add(1);
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, topic = %Topic::PlayerJoined, "Intent consumer lagged");
                }
                Err(RecvError::Closed) => {
                    report.stop = RunnerStop::BusClosed;
                    break;
                }
            },
            event = moves.recv() => match event {
                Ok(event) => {
                    engine.apply_event(&event).await;
                    report.moves_applied = report.moves_applied.saturating_add(1);
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, topic = %Topic::PlayerMoved, "Intent consumer lagged");
                }
                Err(RecvError::Closed) => {
                    report.stop = RunnerStop::BusClosed;
                    break;
                }
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!(
        reason = ?report.stop,
        ticks = report.ticks,
        joins = report.joins_applied,
        moves = report.moves_applied,
        "Engine runner stopped"
    );
    report
}

/// Spawn [`run_engine`] on the current tokio runtime.
pub fn spawn_engine(
    engine: DungeonEngine,
    tick_interval: Duration,
    rng: SmallRng,
    shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<RunnerReport> {
    tokio::spawn(run_engine(engine, tick_interval, rng, shutdown))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use delve_bus::EventBus;
    use delve_map::DungeonMap;
    use delve_types::{DungeonEvent, Player, PlayerClass, Position};

    use super::*;
    use crate::engine::{DungeonEngine, EngineSettings};

    fn quiet_engine() -> DungeonEngine {
        let mut rng = SmallRng::seed_from_u64(7);
        let map = DungeonMap::generate(8, 8, 0.0, &mut rng).unwrap();
        let settings = EngineSettings {
            max_monsters: 0,
            spawn_chance: 0.0,
            loot_chance: 0.0,
        };
        DungeonEngine::new(map, EventBus::new(), settings)
    }

    #[tokio::test]
    async fn runner_ticks_until_shutdown() {
        let engine = quiet_engine();
        let (tx, rx) = watch::channel(false);
        let handle = spawn_engine(
            engine.clone(),
            Duration::from_millis(5),
            SmallRng::seed_from_u64(1),
            rx,
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        tx.send(true).unwrap();
        let report = handle.await.unwrap();

        assert_eq!(report.stop, RunnerStop::ShutdownRequested);
        assert!(report.ticks >= 2);
        assert_eq!(engine.tick_count().await, report.ticks);
    }

    #[tokio::test]
    async fn runner_folds_remote_intents() {
        let engine = quiet_engine();
        let (tx, rx) = watch::channel(false);
        let handle = spawn_engine(
            engine.clone(),
            Duration::from_millis(5),
            SmallRng::seed_from_u64(2),
            rx,
        );

        // Let the runner task establish its subscriptions before publishing.
        tokio::time::sleep(Duration::from_millis(20)).await;

        // A producer elsewhere announces a join; the runner folds it in.
        let remote = Player::new("Remote", PlayerClass::Mage, engine.map().entrance());
        engine.bus().publish(DungeonEvent::PlayerJoined {
            player: remote.clone(),
        });

        let mut admitted = false;
        for _ in 0..100 {
            if engine.player(remote.id).await.is_some() {
                admitted = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(admitted, "join intent never folded");

        // Same for a move of that player.
        engine.bus().publish(DungeonEvent::PlayerMoved {
            player_id: remote.id,
            from: remote.position,
            to: Position::new(2, 1),
        });

        let mut moved = false;
        for _ in 0..100 {
            let position = engine.player(remote.id).await.map(|p| p.position);
            if position == Some(Position::new(2, 1)) {
                moved = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(moved, "move intent never folded");

        tx.send(true).unwrap();
        let report = handle.await.unwrap();
        assert!(report.joins_applied >= 1);
        assert!(report.moves_applied >= 1);
    }

    #[tokio::test]
    async fn dropped_shutdown_sender_stops_the_runner() {
        let engine = quiet_engine();
        let (tx, rx) = watch::channel(false);
        let handle = spawn_engine(
            engine,
            Duration::from_secs(60),
            SmallRng::seed_from_u64(3),
            rx,
        );

        drop(tx);
        let report = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.stop, RunnerStop::ShutdownRequested);
        assert_eq!(report.ticks, 0);
    }
}
