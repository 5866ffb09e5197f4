//! Error types for the `delve-engine` crate.
//!
//! The command surface has exactly two failure modes; everything else the
//! engine encounters (failed spawn placement, moves into walls, the monster
//! cap) is a defined no-op rather than an error.

use delve_types::PlayerId;

/// Errors surfaced by the engine's command surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A command referenced a player id the engine has never seen.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A move command carried an unrecognized direction string.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),
}
