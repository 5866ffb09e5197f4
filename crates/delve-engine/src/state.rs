//! The mutable world state owned by the engine.
//!
//! [`WorldState`] bundles everything the tick pipeline mutates: the tick
//! counter and the player and monster collections. It is held behind a
//! single lock by the engine handle, so a tick is atomic with respect to
//! external readers; no partial-tick state is ever observable.
//!
//! The `apply_*` methods are the intent folds: they absorb
//! `player.joined` and `player.moved` events idempotently, so the same
//! event can arrive through the command path and again through the bus
//! without corrupting state.

use std::collections::BTreeMap;

use delve_types::{Monster, MonsterId, Player, PlayerId, Position};

/// Players, monsters, and the tick counter.
///
/// Keyed by v7 ids, so `BTreeMap` iteration visits entities in creation
/// order, matching the order they were announced on the bus.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    /// Number of completed ticks.
    pub tick: u64,
    /// All players, dead ones included; players are never removed.
    pub players: BTreeMap<PlayerId, Player>,
    /// All living monsters.
    pub monsters: BTreeMap<MonsterId, Monster>,
}

impl WorldState {
    /// Create an empty world at tick zero.
    pub const fn new() -> Self {
        Self {
            tick: 0,
            players: BTreeMap::new(),
            monsters: BTreeMap::new(),
        }
    }

    /// Fold a `player.joined` event into state.
    ///
    /// Insert-if-absent: a replayed join must not reset a player who has
    /// already moved or taken damage.
    pub fn apply_player_joined(&mut self, player: &Player) {
        self.players
            .entry(player.id)
            .or_insert_with(|| player.clone());
    }

    /// Fold a `player.moved` event into state.
    ///
    /// Sets the absolute destination; unknown ids are ignored.
    pub fn apply_player_moved(&mut self, player_id: PlayerId, to: Position) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.position = to;
        }
    }
}
