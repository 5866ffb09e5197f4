//! Error types for the Gateway API server.
//!
//! [`GatewayError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Engine and stats errors convert with `?` so handlers stay thin.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use delve_engine::EngineError;
use delve_stats::StatsError;
use delve_types::PlayerId;

/// Errors that can occur in the Gateway API layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No player with the requested id exists.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A move request carried an unrecognized direction string.
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// A UUID could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<EngineError> for GatewayError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::PlayerNotFound(id) => Self::PlayerNotFound(id),
            EngineError::InvalidDirection(raw) => Self::InvalidDirection(raw),
        }
    }
}

impl From<StatsError> for GatewayError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::ProfileNotFound(id) => Self::PlayerNotFound(id),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidDirection(_) | Self::InvalidUuid(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
