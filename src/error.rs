//! Configuration errors
//!
//! Gameplay never fails: collisions, misses and blocked moves are ordinary
//! control flow. The only failure class is a malformed arena configuration,
//! which is rejected when the session is built.

use thiserror::Error;

/// Errors raised while loading or validating an [`crate::ArenaConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A dimension, speed or interval that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
        /// Value that was supplied.
        value: f64,
    },

    /// A tank variant was configured with no sprite frames.
    #[error("{faction} tank needs at least one sprite frame")]
    NoSpriteFrames {
        /// Which tank variant ("player" or "enemy").
        faction: &'static str,
    },

    /// A `[min, max]` range was inverted.
    #[error("{field}: min {min} exceeds max {max}")]
    InvertedRange {
        /// Offending range name.
        field: &'static str,
        /// Lower bound supplied.
        min: f64,
        /// Upper bound supplied.
        max: f64,
    },

    /// A spawn point would put the tank (partly) outside the world.
    #[error("{what} at ({x}, {y}) lies outside the {width}x{height} world")]
    OutsideWorld {
        /// What was being placed.
        what: &'static str,
        /// Requested x.
        x: f32,
        /// Requested y.
        y: f32,
        /// World width.
        width: f32,
        /// World height.
        height: f32,
    },

    /// The session must start with at least one life.
    #[error("starting lives must be at least 1")]
    NoLives,

    /// The config file could not be parsed.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
