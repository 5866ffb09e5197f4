//! The [`DungeonEngine`]: shared world state plus the command surface.
//!
//! The engine is a cheap-to-clone handle over `Arc`-shared state. All
//! mutation funnels through three paths, and each one publishes its event
//! after the state change while still holding the write lock:
//!
//! - the command surface ([`DungeonEngine::join`],
//!   [`DungeonEngine::move_player`]), driven by the gateway,
//! - the tick pipeline ([`DungeonEngine::run_tick`]), driven by the runner,
//! - the bus folds ([`DungeonEngine::apply_event`]), driven by the runner's
//!   intent subscriptions.
//!
//! Readers take the lock shared, so snapshots never observe a half-applied
//! tick or command.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info};

use delve_bus::EventBus;
use delve_map::DungeonMap;
use delve_types::{
    Direction, DungeonEvent, Monster, ParseDirectionError, Player, PlayerClass, PlayerId, Position,
};

use crate::config::DungeonConfig;
use crate::error::EngineError;
use crate::state::WorldState;
use crate::tick::{self, TickSummary};

/// Tunable knobs for the tick pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    /// Monster population cap; spawning pauses at this count.
    pub max_monsters: usize,
    /// Probability per tick of attempting a monster spawn.
    pub spawn_chance: f64,
    /// Probability per tick of dropping one loot item.
    pub loot_chance: f64,
}

impl EngineSettings {
    /// Stock dungeon tuning.
    pub const DEFAULT: Self = Self {
        max_monsters: 5,
        spawn_chance: 0.3,
        loot_chance: 0.1,
    };

    /// Extract engine settings from loaded configuration.
    pub const fn from_config(config: &DungeonConfig) -> Self {
        Self {
            max_monsters: config.spawn.max_monsters,
            spawn_chance: config.spawn.spawn_chance,
            loot_chance: config.loot.drop_chance,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Cloneable handle to the shared dungeon world.
#[derive(Debug, Clone)]
pub struct DungeonEngine {
    state: Arc<RwLock<WorldState>>,
    map: Arc<DungeonMap>,
    bus: EventBus,
    settings: EngineSettings,
}

impl DungeonEngine {
    /// Create an engine over a freshly generated map.
    ///
    /// The world starts empty at tick zero; nothing happens until the
    /// runner starts driving [`DungeonEngine::run_tick`].
    pub fn new(map: DungeonMap, bus: EventBus, settings: EngineSettings) -> Self {
        Self {
            state: Arc::new(RwLock::new(WorldState::new())),
            map: Arc::new(map),
            bus,
            settings,
        }
    }

    /// The immutable dungeon grid.
    pub fn map(&self) -> &DungeonMap {
        &self.map
    }

    /// The event bus every mutation publishes to.
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Admit a new player at the dungeon entrance.
    ///
    /// Join accepts any name and class without validation; the player
    /// starts at full hp with zero xp. Publishes `player.joined`.
    pub async fn join(&self, name: impl Into<String>, class: PlayerClass) -> Player {
        let player = Player::new(name, class, self.map.entrance());

        let mut state = self.state.write().await;
        state.apply_player_joined(&player);
        info!(
            player_id = %player.id,
            name = %player.name,
            class = ?player.class,
            "Player joined"
        );
        self.bus.publish(DungeonEvent::PlayerJoined {
            player: player.clone(),
        });
        player
    }

    /// Step a player one cell in `direction`.
    ///
    /// A step into a wall or off the grid is not an error: the player stays
    /// put, nothing is published, and the current position comes back.
    /// Publishes `player.moved` for an accepted step.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlayerNotFound`] when the id is unknown, and
    /// [`EngineError::InvalidDirection`] when `direction` is not one of
    /// north, south, east, or west (case-insensitive).
    pub async fn move_player(
        &self,
        player_id: PlayerId,
        direction: &str,
    ) -> Result<Position, EngineError> {
        let mut state = self.state.write().await;
        let Some(player) = state.players.get(&player_id) else {
            return Err(EngineError::PlayerNotFound(player_id));
        };
        let from = player.position;

        let direction = match direction.parse::<Direction>() {
            Ok(direction) => direction,
            Err(ParseDirectionError(raw)) => return Err(EngineError::InvalidDirection(raw)),
        };

        let to = from.step(direction);
        if !self.map.is_walkable(to) {
            debug!(%player_id, %from, blocked = %to, "Move rejected by the map");
            return Ok(from);
        }

        state.apply_player_moved(player_id, to);
        debug!(%player_id, %from, %to, "Player moved");
        self.bus.publish(DungeonEvent::PlayerMoved {
            player_id,
            from,
            to,
        });
        Ok(to)
    }

    /// Fold a bus event back into world state.
    ///
    /// Join and move intents can arrive over the bus from another producer
    /// as well as from this engine's own publishes. Both folds are
    /// idempotent, so an echo of a command already applied locally is
    /// harmless. Every other topic is ignored.
    pub async fn apply_event(&self, event: &DungeonEvent) {
        match event {
            DungeonEvent::PlayerJoined { player } => {
                self.state.write().await.apply_player_joined(player);
            }
            DungeonEvent::PlayerMoved { player_id, to, .. } => {
                self.state.write().await.apply_player_moved(*player_id, *to);
            }
            _ => {}
        }
    }

    /// Run one tick of the dungeon under the write lock.
    pub async fn run_tick(&self, rng: &mut impl Rng) -> TickSummary {
        let mut state = self.state.write().await;
        tick::run_tick(&mut state, &self.map, &self.bus, &self.settings, rng)
    }

    /// Look up a single player by id.
    pub async fn player(&self, player_id: PlayerId) -> Option<Player> {
        self.state.read().await.players.get(&player_id).cloned()
    }

    /// All players in join order, dead ones included.
    pub async fn players(&self) -> Vec<Player> {
        self.state.read().await.players.values().cloned().collect()
    }

    /// All live monsters in spawn order.
    pub async fn monsters(&self) -> Vec<Monster> {
        self.state.read().await.monsters.values().cloned().collect()
    }

    /// How many ticks have executed since the world started.
    pub async fn tick_count(&self) -> u64 {
        self.state.read().await.tick
    }
}
