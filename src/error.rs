//! Error types
//!
//! Gameplay itself never fails: ordering hazards are resolved by phase guards.
//! The only fallible surface is loading and validating the session config.

use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvalidRange {
        field: &'static str,
        min: u64,
        max: u64,
    },

    #[error("win margin {margin} must be non-negative and shorter than the track ({track_length})")]
    MarginTooLarge { margin: f32, track_length: f32 },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
