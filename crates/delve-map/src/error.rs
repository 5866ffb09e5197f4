//! Error types for the `delve-map` crate.
//!
//! All fallible operations in this crate return [`MapError`] through the
//! standard [`Result`] type alias.

/// Errors that can occur during map construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// The requested dimensions cannot hold the fixed landmarks.
    ///
    /// Below 4x4 the entrance at `(1, 1)` and the treasure room at
    /// `(width - 2, height - 2)` would occupy the same cell.
    #[error("map too small: {width}x{height} (minimum 4x4)")]
    TooSmall {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// The wall density is outside the valid probability range.
    #[error("wall density {0} outside [0, 1]")]
    InvalidWallDensity(f64),
}
