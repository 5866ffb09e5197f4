//! World simulation engine for the Delve dungeon.
//!
//! This crate owns the 4-step tick cycle that drives the dungeon (spawn,
//! movement, combat, loot), the command surface players reach through the
//! gateway, and the runner task that schedules both.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `delve.yaml` into
//!   strongly-typed structs.
//! - [`engine`] -- The cloneable [`DungeonEngine`] handle: shared state,
//!   commands, queries.
//! - [`error`] -- Command-surface error types.
//! - [`runner`] -- The single task that drives ticks and folds bus intents.
//! - [`state`] -- Mutable world state and its idempotent event folds.
//! - [`tick`] -- The 4-step tick cycle.

pub mod config;
pub mod engine;
pub mod error;
pub mod runner;
pub mod state;
pub mod tick;

pub use config::{ConfigError, DungeonConfig};
pub use engine::{DungeonEngine, EngineSettings};
pub use error::EngineError;
pub use runner::{RunnerReport, RunnerStop, run_engine, spawn_engine};
pub use state::WorldState;
pub use tick::{ATTACK_RANGE, TickSummary};
