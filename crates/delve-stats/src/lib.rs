//! Player statistics read model for the Delve dungeon.
//!
//! This crate consumes the full event stream and folds it into
//! per-player profiles and a raw event log. It never touches the engine
//! directly; everything it knows arrived over the bus, which is what
//! lets it run in-process today and out-of-process later without a
//! behavior change.
//!
//! # Modules
//!
//! - [`error`] -- Read-model error types.
//! - [`profile`] -- The [`PlayerProfile`] wire shape.
//! - [`projector`] -- The folding task and the [`StatsReader`] handle.
//! - [`state`] -- Fold rules and query logic over the projected state.

pub mod error;
pub mod profile;
pub mod projector;
pub mod state;

pub use error::StatsError;
pub use profile::PlayerProfile;
pub use projector::{StatsReader, StatsReport, StatsStop, spawn_stats};
pub use state::StatsState;
