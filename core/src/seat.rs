//! Per-seat time budget
//!
//! A `SeatClock` knows nothing about turn order. It only applies depletion
//! and increment arithmetic to one seat's remaining time.
//!
//! # Exhaustion
//!
//! Once the budget reaches zero it stays there: an exhausting depletion does
//! not earn the increment, and later calls cannot bring the seat back.

use serde::Serialize;

/// Remaining time budget for one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatClock {
    remaining_ms: u64,
    increment_ms: u64,
}

impl SeatClock {
    pub fn new(initial_ms: u64, increment_ms: u64) -> Self {
        Self {
            remaining_ms: initial_ms,
            increment_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn increment_ms(&self) -> u64 {
        self.increment_ms
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Charge a completed move and credit the increment.
    ///
    /// Returns the remaining time after the operation.
    pub fn on_move_done(&mut self, elapsed_ms: u64) -> u64 {
        self.advance(elapsed_ms, self.increment_ms)
    }

    /// Charge elapsed time without crediting anything.
    ///
    /// Returns the remaining time after the operation.
    pub fn subtract_time(&mut self, elapsed_ms: u64) -> u64 {
        self.advance(elapsed_ms, 0)
    }

    fn advance(&mut self, elapsed_ms: u64, credit_ms: u64) -> u64 {
        if self.remaining_ms > elapsed_ms {
            self.remaining_ms = (self.remaining_ms - elapsed_ms).saturating_add(credit_ms);
        } else {
            self.remaining_ms = 0;
        }
        self.remaining_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_done_applies_increment() {
        let mut seat = SeatClock::new(10_000, 2_000);
        assert_eq!(seat.on_move_done(3_000), 9_000);
        assert_eq!(seat.remaining_ms(), 9_000);
    }

    #[test]
    fn test_exhausting_move_skips_increment() {
        let mut seat = SeatClock::new(1_000, 5_000);
        assert_eq!(seat.on_move_done(1_000), 0);

        let mut seat = SeatClock::new(1_000, 5_000);
        assert_eq!(seat.on_move_done(1_500), 0);
        assert!(seat.is_exhausted());
    }

    #[test]
    fn test_zero_elapsed_move_earns_increment() {
        let mut seat = SeatClock::new(4_000, 500);
        assert_eq!(seat.on_move_done(0), 4_500);
        assert_eq!(seat.on_move_done(0), 5_000);
    }

    #[test]
    fn test_subtract_time_never_credits() {
        let mut seat = SeatClock::new(4_000, 500);
        assert_eq!(seat.subtract_time(0), 4_000);
        assert_eq!(seat.subtract_time(1_250), 2_750);
    }

    #[test]
    fn test_subtract_time_clamps_at_zero() {
        let mut seat = SeatClock::new(500, 0);
        assert_eq!(seat.subtract_time(800), 0);
        assert_eq!(seat.remaining_ms(), 0);
    }

    #[test]
    fn test_exhaustion_is_terminal() {
        let mut seat = SeatClock::new(100, 1_000);
        seat.subtract_time(100);
        assert_eq!(seat.on_move_done(0), 0);
        assert_eq!(seat.subtract_time(0), 0);
        assert!(seat.is_exhausted());
    }

    #[test]
    fn test_budget_only_grows_by_increment() {
        let mut seat = SeatClock::new(20_000, 300);
        let mut previous = seat.remaining_ms();
        for elapsed in [0, 150, 4_000, 299, 7_777, 12, 3_000] {
            let after = seat.on_move_done(elapsed);
            assert!(after <= previous + seat.increment_ms());
            previous = after;
            let after = seat.subtract_time(elapsed / 2);
            assert!(after <= previous);
            previous = after;
        }
    }
}
