//! Animation engine error types

use thiserror::Error;

/// Errors raised while building or driving animations
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Curve name not present in the easing table
    #[error("Unknown easing curve: {0}")]
    UnknownCurve(String),

    /// Speed name not present in the speed table
    #[error("Unknown speed preset: {0}")]
    UnknownSpeed(String),

    /// No preset template registered under this name
    #[error("Unknown animation preset: {0}")]
    UnknownPreset(String),

    /// Malformed engine configuration
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Failed to read a configuration file
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
