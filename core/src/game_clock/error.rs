//! Error types for game clock construction

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("a game needs at least {min} seats, got {count}")]
    TooFewSeats { count: usize, min: usize },
}
