//! Error types for the meta-clock engine

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("transition duration must be finite and positive, got {0}")]
    InvalidTransitionDuration(f32),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
