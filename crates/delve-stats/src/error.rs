//! Error types for the `delve-stats` crate.

use delve_types::PlayerId;

/// Errors surfaced by the stats read model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// No profile exists for the requested player.
    ///
    /// Profiles appear only once the projector has folded the player's
    /// `player.joined` event, so a just-joined player can be briefly
    /// unknown here while already present in the engine.
    #[error("no profile for player: {0}")]
    ProfileNotFound(PlayerId),
}
