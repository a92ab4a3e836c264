//! Read-only view of the game clock for display and status commands

use serde::Serialize;

use super::ClockState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatSnapshot {
    pub remaining_ms: u64,
    pub increment_ms: u64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockSnapshot {
    pub state: ClockState,
    pub current_seat: usize,
    pub seats: Vec<SeatSnapshot>,
}

impl ClockSnapshot {
    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.active).count()
    }

    /// The surviving seat once the game is over
    pub fn winner(&self) -> Option<usize> {
        if self.state != ClockState::GameOver {
            return None;
        }
        let mut active = self.seats.iter().enumerate().filter(|(_, s)| s.active);
        match (active.next(), active.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }
}
