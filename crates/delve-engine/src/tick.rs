//! Tick cycle: the 4-step loop that advances the dungeon each interval.
//!
//! Each tick runs through these steps, in order:
//!
//! 1. **Spawn** -- roll against the spawn chance and, if the population is
//!    below the monster cap, place a random monster on a free floor cell.
//!
//! 2. **Movement** -- every monster rolls one direction and steps if the
//!    target cell is walkable; blocked monsters stay where they are.
//!
//! 3. **Combat** -- every monster strikes every living player within melee
//!    range. Hit points floor at zero and dead players stay in state.
//!
//! 4. **Loot** -- roll against the drop chance and announce a random item
//!    on a free floor cell. Loot lives only in the event stream.
//!
//! Every state change publishes its [`DungeonEvent`] after the mutation,
//! inside the same tick, so subscribers observe effects in the order they
//! happened. A tick with the same starting state, map, and RNG sequence is
//! fully deterministic.

use delve_bus::EventBus;
use delve_map::DungeonMap;
use delve_types::{Direction, DungeonEvent, Loot, LootKind, Monster, MonsterKind};
use rand::Rng;
use tracing::{debug, info};

use crate::engine::EngineSettings;
use crate::state::WorldState;

/// Maximum Manhattan distance at which a monster can strike a player.
pub const ATTACK_RANGE: u32 = 1;

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Player count at end of tick, dead players included.
    pub player_count: usize,
    /// Monster population at end of tick.
    pub monster_count: usize,
    /// Species spawned this tick, if the spawn roll succeeded.
    pub spawned: Option<MonsterKind>,
    /// How many monsters stepped to a new cell.
    pub monsters_moved: u32,
    /// Melee strikes landed this tick.
    pub attacks: u32,
    /// Loot kind dropped this tick, if the drop roll succeeded.
    pub loot_dropped: Option<LootKind>,
    /// Total events published to the bus during this tick.
    pub events_published: u32,
}

/// Execute one complete tick of the dungeon.
///
/// This is the engine's main entry point. It advances the tick counter,
/// runs all 4 steps in sequence, and returns a summary of what happened.
/// Publishes happen inline, so a caller holding the state lock guarantees
/// snapshot readers never observe a half-applied tick.
pub fn run_tick(
    state: &mut WorldState,
    map: &DungeonMap,
    bus: &EventBus,
    settings: &EngineSettings,
    rng: &mut impl Rng,
) -> TickSummary {
    state.tick = state.tick.saturating_add(1);
    let tick = state.tick;
    info!(
        tick,
        players = state.players.len(),
        monsters = state.monsters.len(),
        "Tick started"
    );

    // --- Step 1: Spawn ---
    let spawned = step_spawn(state, map, bus, settings, rng);

    // --- Step 2: Movement ---
    let monsters_moved = step_movement(state, map, bus, rng);

    // --- Step 3: Combat ---
    let attacks = step_combat(state, bus);

    // --- Step 4: Loot ---
    let loot_dropped = step_loot(map, bus, settings, rng);

    // Spawn, each move, and loot publish one event each; every attack
    // publishes the attack and the damage it caused.
    let events_published = u32::from(spawned.is_some())
        .saturating_add(monsters_moved)
        .saturating_add(attacks.saturating_mul(2))
        .saturating_add(u32::from(loot_dropped.is_some()));

    TickSummary {
        tick,
        player_count: state.players.len(),
        monster_count: state.monsters.len(),
        spawned,
        monsters_moved,
        attacks,
        loot_dropped,
        events_published,
    }
}

/// Step 1: Spawn.
///
/// Bails silently when the cap is reached or the spawn roll fails, and
/// with a debug line when no free floor cell can be found. Returns the
/// spawned species otherwise.
fn step_spawn(
    state: &mut WorldState,
    map: &DungeonMap,
    bus: &EventBus,
    settings: &EngineSettings,
    rng: &mut impl Rng,
) -> Option<MonsterKind> {
    if state.monsters.len() >= settings.max_monsters {
        return None;
    }
    if !rng.random_bool(settings.spawn_chance) {
        return None;
    }
    let Some(position) = map.random_floor_position(rng) else {
        debug!("Spawn skipped; no free floor cell found");
        return None;
    };
    let idx = rng.random_range(0..MonsterKind::ALL.len());
    let kind = MonsterKind::ALL.get(idx).copied()?;

    let monster = Monster::spawn(kind, position);
    debug!(monster_id = %monster.id, ?kind, %position, "Monster spawned");
    state.monsters.insert(monster.id, monster.clone());
    bus.publish(DungeonEvent::MonsterSpawned { monster });
    Some(kind)
}

/// Step 2: Movement.
///
/// Each monster rolls one direction per tick. The roll is consumed even
/// when the step is blocked, so movement stays deterministic under a
/// seeded RNG regardless of wall layout.
fn step_movement(
    state: &mut WorldState,
    map: &DungeonMap,
    bus: &EventBus,
    rng: &mut impl Rng,
) -> u32 {
    let mut moved = 0_u32;
    for monster in state.monsters.values_mut() {
        let idx = rng.random_range(0..Direction::ALL.len());
        let Some(direction) = Direction::ALL.get(idx).copied() else {
            continue;
        };

        let from = monster.position;
        let to = from.step(direction);
        if !map.is_walkable(to) {
            continue;
        }

        monster.position = to;
        moved = moved.saturating_add(1);
        bus.publish(DungeonEvent::MonsterMoved {
            monster_id: monster.id,
            from,
            to,
        });
    }
    moved
}

/// Step 3: Combat.
///
/// Every monster strikes every living player within [`ATTACK_RANGE`].
/// Strikes resolve sequentially in monster order, so a later monster sees
/// the hp left by an earlier one, and the `PlayerDamaged` event always
/// carries the post-hit value. Players at 0 hp are skipped, never removed.
fn step_combat(state: &mut WorldState, bus: &EventBus) -> u32 {
    let mut attacks = 0_u32;
    for monster in state.monsters.values() {
        for player in state.players.values_mut() {
            if !player.is_alive() {
                continue;
            }
            if monster.position.manhattan(player.position) > ATTACK_RANGE {
                continue;
            }

            player.hp = player.hp.saturating_sub(monster.damage).max(0);
            attacks = attacks.saturating_add(1);
            bus.publish(DungeonEvent::MonsterAttacked {
                monster_id: monster.id,
                player_id: player.id,
                damage: monster.damage,
            });
            bus.publish(DungeonEvent::PlayerDamaged {
                player_id: player.id,
                damage: monster.damage,
                remaining_hp: player.hp,
            });
        }
    }
    attacks
}

/// Step 4: Loot.
///
/// Drops are announcements only; no inventory is kept. Bails silently
/// when the roll fails or no free floor cell can be found.
fn step_loot(
    map: &DungeonMap,
    bus: &EventBus,
    settings: &EngineSettings,
    rng: &mut impl Rng,
) -> Option<LootKind> {
    if !rng.random_bool(settings.loot_chance) {
        return None;
    }
    let position = map.random_floor_position(rng)?;
    let idx = rng.random_range(0..LootKind::ALL.len());
    let kind = LootKind::ALL.get(idx).copied()?;

    let loot = Loot::new(kind, position);
    debug!(loot_id = %loot.id, ?kind, %position, "Loot dropped");
    bus.publish(DungeonEvent::LootDropped { loot });
    Some(kind)
}
