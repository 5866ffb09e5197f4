//! The projector task and its read handle.
//!
//! [`spawn_stats`] subscribes to the whole bus before the task starts,
//! so no event published after the call can be missed. The task folds
//! events into shared state until shutdown or bus close; readers take
//! the lock shared and always see a fully-applied prefix of the stream.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use delve_bus::{EventBus, RecvError, Subscription};
use delve_types::{DungeonEvent, PlayerId};

use crate::error::StatsError;
use crate::profile::PlayerProfile;
use crate::state::StatsState;

/// Why the projector stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsStop {
    /// The shutdown flag fired, or its sender was dropped.
    ShutdownRequested,
    /// The event bus closed.
    BusClosed,
}

/// Counters for a completed projector, returned once the task exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    /// Why the task exited.
    pub stop: StatsStop,
    /// Events folded into the read model.
    pub events_folded: u64,
    /// Events dropped by bus lag; profiles undercount by this many.
    pub events_missed: u64,
}

/// Cloneable read handle over the projector's state.
#[derive(Debug, Clone)]
pub struct StatsReader {
    state: Arc<RwLock<StatsState>>,
}

impl StatsReader {
    /// The profile for `player_id`.
    ///
    /// # Errors
    ///
    /// [`StatsError::ProfileNotFound`] when no join event for this id has
    /// been folded yet.
    pub async fn profile(&self, player_id: PlayerId) -> Result<PlayerProfile, StatsError> {
        self.state
            .read()
            .await
            .profile(player_id)
            .ok_or(StatsError::ProfileNotFound(player_id))
    }

    /// All profiles in join order.
    pub async fn profiles(&self) -> Vec<PlayerProfile> {
        self.state.read().await.profiles()
    }

    /// Profiles ordered by xp descending; ties keep join order.
    pub async fn leaderboard(&self) -> Vec<PlayerProfile> {
        self.state.read().await.leaderboard()
    }

    /// The most recent `limit` events in arrival order, or the whole log.
    pub async fn events(&self, limit: Option<usize>) -> Vec<DungeonEvent> {
        self.state.read().await.events(limit)
    }

    /// How many events have been folded since startup.
    pub async fn event_count(&self) -> usize {
        self.state.read().await.event_count()
    }
}

/// Subscribe to the bus and spawn the projector task.
///
/// Returns the read handle and the task's join handle. The subscription
/// is taken synchronously, so every event published after this call is
/// either folded or counted as missed.
pub fn spawn_stats(
    bus: &EventBus,
    shutdown: watch::Receiver<bool>,
) -> (StatsReader, JoinHandle<StatsReport>) {
    let events = bus.subscribe_all();
    let state = Arc::new(RwLock::new(StatsState::new()));
    let reader = StatsReader {
        state: Arc::clone(&state),
    };
    let handle = tokio::spawn(project(state, events, shutdown));
    (reader, handle)
}

/// The projector loop.
async fn project(
    state: Arc<RwLock<StatsState>>,
    mut events: Subscription,
    mut shutdown: watch::Receiver<bool>,
) -> StatsReport {
    info!("Stats projector starting");

    let mut report = StatsReport {
        stop: StatsStop::ShutdownRequested,
        events_folded: 0,
        events_missed: 0,
    };

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    state.write().await.apply(&event);
                    report.events_folded = report.events_folded.saturating_add(1);
                }
                Err(RecvError::Lagged(missed)) => {
                    report.events_missed = report.events_missed.saturating_add(missed);
                    warn!(missed, "Stats projector lagged; profiles will undercount");
                }
                Err(RecvError::Closed) => {
                    report.stop = StatsStop::BusClosed;
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
        folded = report.events_folded,
        missed = report.events_missed,
        "Stats projector stopped"
    );
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use delve_types::{Player, PlayerClass, Position};

    use super::*;

    async fn wait_for_count(reader: &StatsReader, expected: usize) {
        for _ in 0..200 {
            if reader.event_count().await >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert!(
            reader.event_count().await >= expected,
            "projector never folded {expected} events"
        );
    }

    #[tokio::test]
    async fn projector_folds_published_events() {
        let bus = EventBus::new();
        let (_tx, rx) = watch::channel(false);
        let (reader, _handle) = spawn_stats(&bus, rx);

        let player = Player::new("Tor", PlayerClass::Warrior, Position::new(1, 1));
        let id = player.id;
        bus.publish(DungeonEvent::PlayerJoined { player });
        bus.publish(DungeonEvent::PlayerDamaged {
            player_id: id,
            damage: 8,
            remaining_hp: 92,
        });

        wait_for_count(&reader, 2).await;

        let profile = reader.profile(id).await.unwrap();
        assert_eq!(profile.total_damage_received, 8);
        assert_eq!(profile.player.hp, 92);
    }

    #[tokio::test]
    async fn unknown_player_yields_profile_not_found() {
        let bus = EventBus::new();
        let (_tx, rx) = watch::channel(false);
        let (reader, _handle) = spawn_stats(&bus, rx);

        let ghost = PlayerId::new();
        let err = reader.profile(ghost).await;
        assert_eq!(err, Err(StatsError::ProfileNotFound(ghost)));
    }

    #[tokio::test]
    async fn projector_stops_on_shutdown_signal() {
        let bus = EventBus::new();
        let (tx, rx) = watch::channel(false);
        let (reader, handle) = spawn_stats(&bus, rx);

        let player = Player::new("Tor", PlayerClass::Mage, Position::new(1, 1));
        bus.publish(DungeonEvent::PlayerJoined { player });
        wait_for_count(&reader, 1).await;

        tx.send(true).unwrap();
        let report = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.stop, StatsStop::ShutdownRequested);
        assert_eq!(report.events_folded, 1);
    }

    #[tokio::test]
    async fn projector_stops_when_the_bus_closes() {
        let bus = EventBus::new();
        let (_tx, rx) = watch::channel(false);
        let (_reader, handle) = spawn_stats(&bus, rx);

        drop(bus);
        let report = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.stop, StatsStop::BusClosed);
    }
}
