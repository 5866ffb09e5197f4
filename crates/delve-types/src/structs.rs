//! Core entity structs for the Delve dungeon simulation.
//!
//! Covers [`Position`] plus the three entity kinds that appear in events
//! and snapshots: [`Player`], [`Monster`], and [`Loot`]. Serialized field
//! names are camelCase to match the event wire format.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, LootKind, MonsterKind, PlayerClass};
use crate::ids::{LootId, MonsterId, PlayerId};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A grid coordinate. `(0, 0)` is the top-left corner.
///
/// Coordinates are signed so that off-map steps (e.g. west from `x = 0`)
/// are representable and can be rejected by walkability checks instead of
/// wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, increasing to the east.
    pub x: i32,
    /// Row, increasing to the south.
    pub y: i32,
}

impl Position {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Manhattan distance to `other`.
    ///
    /// Distance 0 is the same cell; distance 1 is cardinal adjacency.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player character inside the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier assigned at join time.
    pub id: PlayerId,
    /// Display name chosen by the client.
    pub name: String,
    /// Current cell.
    pub position: Position,
    /// Hit points, `0..=100`. A player at 0 hp is dead but stays in state.
    pub hp: i32,
    /// Experience points. Currently only ever the starting value.
    pub xp: u32,
    /// Chosen character class.
    #[serde(rename = "playerClass")]
    pub class: PlayerClass,
}

impl Player {
    /// Starting and maximum hit points.
    pub const MAX_HP: i32 = 100;

    /// Create a fresh player at `position` with full hp and zero xp.
    pub fn new(name: impl Into<String>, class: PlayerClass, position: Position) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            position,
            hp: Self::MAX_HP,
            xp: 0,
            class,
        }
    }

    /// Whether the player can still be targeted by monsters.
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

// ---------------------------------------------------------------------------
// Monster
// ---------------------------------------------------------------------------

/// A monster roaming the dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Stable identifier assigned at spawn time.
    pub id: MonsterId,
    /// Species, which fixes the starting stats.
    #[serde(rename = "type")]
    pub kind: MonsterKind,
    /// Current cell.
    pub position: Position,
    /// Remaining hit points.
    pub hp: i32,
    /// Damage dealt per attack.
    pub damage: i32,
}

impl Monster {
    /// Spawn a monster of `kind` at `position` with its base stats.
    pub fn spawn(kind: MonsterKind, position: Position) -> Self {
        Self {
            id: MonsterId::new(),
            kind,
            position,
            hp: kind.base_hp(),
            damage: kind.base_damage(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loot
// ---------------------------------------------------------------------------

/// A loot item dropped on the dungeon floor.
///
/// Loot exists only in the event stream; the engine does not keep an
/// inventory of dropped items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    /// Stable identifier assigned at drop time.
    pub id: LootId,
    /// What kind of item this is.
    #[serde(rename = "type")]
    pub kind: LootKind,
    /// The cell it landed on.
    pub position: Position,
}

impl Loot {
    /// Create a loot item of `kind` at `position`.
    pub fn new(kind: LootKind, position: Position) -> Self {
        Self {
            id: LootId::new(),
            kind,
            position,
        }
    }
}
