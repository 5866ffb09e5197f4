//! Shared type definitions for the Delve dungeon simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Delve workspace: identifiers, map and entity vocabulary, and the event
//! envelope that every other crate speaks.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (cells, directions, classes, monsters, loot)
//! - [`structs`] -- Core entity structs (position, player, monster, loot)
//! - [`events`] -- The [`events::DungeonEvent`] envelope and its topics

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    CellKind, Direction, LootKind, MonsterKind, ParseDirectionError, PlayerClass,
};
pub use events::{DungeonEvent, ParseTopicError, Topic};
pub use ids::{LootId, MonsterId, PlayerId};
pub use structs::{Loot, Monster, Player, Position};
