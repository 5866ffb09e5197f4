//! Error types for the Delve server binary.
//!
//! [`ServerError`] is the top-level error type that wraps all possible
//! failure modes during server startup.

/// Top-level error for the Delve server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: delve_engine::ConfigError,
    },

    /// Dungeon map generation failed.
    #[error("map error: {source}")]
    Map {
        /// The underlying map error.
        #[from]
        source: delve_map::MapError,
    },

    /// Gateway server failed to start.
    #[error("gateway error: {source}")]
    Gateway {
        /// The underlying gateway startup error.
        #[from]
        source: delve_gateway::StartupError,
    },
}
