//! Dungeon grid generation and walkability queries for the Delve simulation.
//!
//! # Modules
//!
//! - [`dungeon_map`] -- The [`DungeonMap`] grid, its generator, and queries
//! - [`error`] -- [`MapError`] for construction failures

pub mod dungeon_map;
pub mod error;

pub use dungeon_map::{DungeonMap, MapSnapshot};
pub use error::MapError;
