//! Error types for configuration operations

use thiserror::Error;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to locate the configuration file")]
    Path(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("a game needs at least {min} seats, got {count}")]
    SeatCount { count: usize, min: usize },

    #[error("initial time must be greater than zero")]
    ZeroInitialTime,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
