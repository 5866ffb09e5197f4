//! Error types for the `delve-bus` crate.

use tokio::sync::broadcast;

/// Errors a subscription can encounter while receiving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecvError {
    /// The bus was dropped; no further events will ever arrive.
    #[error("event bus closed")]
    Closed,

    /// The subscriber fell behind and the channel discarded events.
    ///
    /// The count is how many events were skipped. The subscription is
    /// still live and the next `recv` resumes at the oldest retained
    /// event.
    #[error("subscriber lagged, skipped {0} events")]
    Lagged(u64),
}

impl From<broadcast::error::RecvError> for RecvError {
    fn from(err: broadcast::error::RecvError) -> Self {
        match err {
            broadcast::error::RecvError::Closed => Self::Closed,
            broadcast::error::RecvError::Lagged(n) => Self::Lagged(n),
        }
    }
}
