//! Results of game clock operations

use serde::Serialize;

/// Lifecycle state of the game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClockState {
    /// No time is running. Initial state.
    Paused,
    /// The turn holder's time is depleting
    Running,
    /// At most one seat remains. Terminal.
    GameOver,
}

/// Why an operation was absorbed without touching any state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not valid in the current clock state
    WrongState,
    /// A seat other than the turn holder pressed its button
    WrongSeat,
    /// The target seat is not eligible to take a turn
    InactiveSeat,
    SeatOutOfRange,
}

/// What a turn-affecting operation did
///
/// Every operation either applies completely or is ignored completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The operation ran a seat out of time. `seat` is the first seat
    /// eliminated; a cascade may have eliminated more.
    Eliminated { seat: usize },
    Ignored(Rejection),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}
