//! Enumeration types for the Delve dungeon simulation.
//!
//! Wire values are lowercase `snake_case` strings (`"floor"`,
//! `"treasure_room"`, `"goblin"`) so snapshots and events stay readable.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Map cells
// ---------------------------------------------------------------------------

/// The kind of a single dungeon grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Open ground. The only kind monsters and loot may be placed on.
    Floor,
    /// Impassable rock.
    Wall,
    /// The fixed player spawn point near the top-left corner.
    Entrance,
    /// The goal room near the bottom-right corner.
    TreasureRoom,
}

impl CellKind {
    /// Whether entities may stand on this cell.
    ///
    /// Everything except [`CellKind::Wall`] is walkable. Placement of new
    /// monsters and loot is stricter and requires [`CellKind::Floor`].
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// A cardinal movement direction.
///
/// The grid origin is the top-left corner, so north decreases `y` and
/// south increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Up: `y - 1`.
    North,
    /// Down: `y + 1`.
    South,
    /// Right: `x + 1`.
    East,
    /// Left: `x - 1`.
    West,
}

impl Direction {
    /// All four directions, for uniform sampling.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The `(dx, dy)` unit offset for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// Error returned when a direction string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parse case-insensitively, so `"North"` and `"north"` both work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            _ => Err(ParseDirectionError(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// The character class chosen when a player joins.
///
/// Classes are cosmetic for now; combat resolution ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerClass {
    /// Melee fighter.
    Warrior,
    /// Spellcaster.
    Mage,
    /// Sneak and skirmisher.
    Rogue,
}

// ---------------------------------------------------------------------------
// Monsters
// ---------------------------------------------------------------------------

/// The species of a monster, which fixes its base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterKind {
    /// Weakest and most common: 20 hp, 5 damage.
    Goblin,
    /// Mid-tier: 30 hp, 8 damage.
    Skeleton,
    /// Apex threat: 100 hp, 25 damage.
    Dragon,
}

impl MonsterKind {
    /// All species, for uniform spawn sampling.
    pub const ALL: [Self; 3] = [Self::Goblin, Self::Skeleton, Self::Dragon];

    /// Hit points a freshly spawned monster of this kind starts with.
    pub const fn base_hp(self) -> i32 {
        match self {
            Self::Goblin => 20,
            Self::Skeleton => 30,
            Self::Dragon => 100,
        }
    }

    /// Damage dealt per attack.
    pub const fn base_damage(self) -> i32 {
        match self {
            Self::Goblin => 5,
            Self::Skeleton => 8,
            Self::Dragon => 25,
        }
    }
}

// ---------------------------------------------------------------------------
// Loot
// ---------------------------------------------------------------------------

/// The kind of a dropped loot item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootKind {
    /// A pile of coins.
    Gold,
    /// A healing potion.
    Potion,
    /// A weapon upgrade.
    Weapon,
}

impl LootKind {
    /// All loot kinds, for uniform drop sampling.
    pub const ALL: [Self; 3] = [Self::Gold, Self::Potion, Self::Weapon];
}
