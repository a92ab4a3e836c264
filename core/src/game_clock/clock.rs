//! The turn/timer state machine
//!
//! Owns every seat's budget, decides whose time is running, and converts
//! wall-clock time into depletion. Two stimulus sources feed it: the
//! periodic `tick` and user actions. Both measure elapsed time from the same
//! sample point, and every measurement moves that point forward, so the two
//! sources never double-count.

use std::fmt;
use std::time::{Duration, Instant};

use quaternity_types::{ClockSettings, MIN_SEATS};

use super::rotation::next_active_seat;
use super::{ClockError, ClockSnapshot, ClockState, Outcome, Rejection, SeatSnapshot};
use crate::notify::{AlertSink, ClockObserver};
use crate::seat::SeatClock;
use crate::time_source::TimeSource;

struct Seat {
    clock: SeatClock,
    /// Eligible to take turns. Cleared by elimination or a manual disable.
    active: bool,
}

/// Shared countdown clock for an N-seat turn-based game
pub struct GameClock {
    seats: Vec<Seat>,
    current: usize,
    state: ClockState,
    last_sample: Instant,
    observer: Box<dyn ClockObserver>,
    alerts: Box<dyn AlertSink>,
    time: Box<dyn TimeSource>,
}

impl GameClock {
    /// Start a paused game with seat 0 holding the turn.
    pub fn new(
        seats: Vec<SeatClock>,
        observer: impl ClockObserver + 'static,
        alerts: impl AlertSink + 'static,
        time: impl TimeSource + 'static,
    ) -> Result<Self, ClockError> {
        if seats.len() < MIN_SEATS {
            return Err(ClockError::TooFewSeats {
                count: seats.len(),
                min: MIN_SEATS,
            });
        }

        let mut observer: Box<dyn ClockObserver> = Box::new(observer);
        for idx in 0..seats.len() {
            observer.unhighlight_seat(idx);
        }
        observer.highlight_seat(0);

        let last_sample = time.now();
        tracing::debug!(seats = seats.len(), "game clock created");

        Ok(Self {
            seats: seats
                .into_iter()
                .map(|clock| Seat {
                    clock,
                    active: true,
                })
                .collect(),
            current: 0,
            state: ClockState::Paused,
            last_sample,
            observer,
            alerts: Box::new(alerts),
            time: Box::new(time),
        })
    }

    /// Build identical seats from the configured time control.
    pub fn from_settings(
        settings: &ClockSettings,
        observer: impl ClockObserver + 'static,
        alerts: impl AlertSink + 'static,
        time: impl TimeSource + 'static,
    ) -> Result<Self, ClockError> {
        let seats = (0..settings.seat_count)
            .map(|_| SeatClock::new(settings.initial_time_ms(), settings.increment_ms()))
            .collect();
        Self::new(seats, observer, alerts, time)
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == ClockState::GameOver
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn current_seat(&self) -> usize {
        self.current
    }

    pub fn is_seat_active(&self, idx: usize) -> bool {
        self.seats.get(idx).is_some_and(|s| s.active)
    }

    /// Derived from the seats on every call, so it cannot drift.
    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.active).count()
    }

    pub fn remaining_ms(&self, idx: usize) -> Option<u64> {
        self.seats.get(idx).map(|s| s.clock.remaining_ms())
    }

    /// The surviving seat once the game is over
    pub fn winner(&self) -> Option<usize> {
        self.snapshot().winner()
    }

    pub fn next_active_seat(&self, from: usize) -> usize {
        next_active_seat(&self.seats, from, |s| s.active)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            state: self.state,
            current_seat: self.current,
            seats: self
                .seats
                .iter()
                .map(|s| SeatSnapshot {
                    remaining_ms: s.clock.remaining_ms(),
                    increment_ms: s.clock.increment_ms(),
                    active: s.active,
                })
                .collect(),
        }
    }

    /// Seats that may legally be passed to `unpause` right now.
    ///
    /// The holder (if still active) followed by the next active seat, or
    /// nothing when fewer than two seats are active.
    pub fn resumable_seats(&self) -> Vec<usize> {
        if self.active_count() < 2 {
            return Vec::new();
        }
        let next = self.next_active_seat(self.current);
        if self.seats[self.current].active {
            vec![self.current, next]
        } else {
            vec![next]
        }
    }

    // ─── Turn-affecting operations ──────────────────────────────────────────

    /// Timer-source entry point: charge the holder and detect timeouts.
    pub fn tick(&mut self) -> Outcome {
        if self.state != ClockState::Running {
            return Outcome::Ignored(Rejection::WrongState);
        }

        let elapsed = self.pick_elapsed_ms();
        let remaining = self.seats[self.current].clock.subtract_time(elapsed);
        self.observer.update_remaining(self.current, remaining);

        if remaining == 0 {
            return self.time_out_current();
        }
        Outcome::Applied
    }

    /// Resume play with `target` holding the turn.
    ///
    /// Handing the turn to another seat counts as the old holder ending its
    /// turn without spending time, so it is credited one increment. A table
    /// with a single active seat stays paused until another is re-enabled.
    pub fn unpause(&mut self, target: usize) -> Outcome {
        if self.state != ClockState::Paused || self.active_count() < 2 {
            return Outcome::Ignored(Rejection::WrongState);
        }
        let Some(seat) = self.seats.get(target) else {
            return Outcome::Ignored(Rejection::SeatOutOfRange);
        };
        if !seat.active {
            return Outcome::Ignored(Rejection::InactiveSeat);
        }

        if target != self.current {
            let holder = self.current;
            if self.seats[holder].active {
                let remaining = self.seats[holder].clock.on_move_done(0);
                self.observer.update_remaining(holder, remaining);
            }
            self.switch_to(target);
        }

        if self.seats[self.current].clock.is_exhausted() {
            return self.time_out_current();
        }

        self.state = ClockState::Running;
        self.last_sample = self.time.now();
        self.observer.alert_running();
        tracing::debug!(seat = self.current, "clock running");
        Outcome::Applied
    }

    /// Stop the holder's time, offering the holder or its successor to resume.
    pub fn pause(&mut self) -> Outcome {
        if self.state != ClockState::Running {
            return Outcome::Ignored(Rejection::WrongState);
        }

        let elapsed = self.pick_elapsed_ms();
        let remaining = self.seats[self.current].clock.subtract_time(elapsed);
        self.observer.update_remaining(self.current, remaining);

        if remaining == 0 {
            return self.time_out_current();
        }

        self.state = ClockState::Paused;
        let next = self.next_active_seat(self.current);
        self.observer.alert_pause([self.current, next]);
        tracing::debug!(seat = self.current, remaining_ms = remaining, "clock paused");
        Outcome::Applied
    }

    /// Pause when running; when paused, resume with the holder, or with the
    /// next active seat if the holder sat out.
    pub fn toggle_pause(&mut self) -> Outcome {
        match self.state {
            ClockState::Running => self.pause(),
            ClockState::Paused => {
                let target = if self.seats[self.current].active {
                    self.current
                } else {
                    self.next_active_seat(self.current)
                };
                self.unpause(target)
            }
            ClockState::GameOver => Outcome::Ignored(Rejection::WrongState),
        }
    }

    /// The holder finished its move. Presses from any other seat are ignored.
    pub fn on_button_pressed(&mut self, seat: usize) -> Outcome {
        if self.state != ClockState::Running {
            return Outcome::Ignored(Rejection::WrongState);
        }
        if seat != self.current {
            return Outcome::Ignored(Rejection::WrongSeat);
        }

        let elapsed = self.pick_elapsed_ms();
        let remaining = self.seats[seat].clock.on_move_done(elapsed);
        self.observer.update_remaining(seat, remaining);

        if remaining == 0 {
            return self.time_out_current();
        }

        let next = self.next_active_seat(seat);
        self.switch_to(next);
        tracing::debug!(from = seat, to = next, elapsed_ms = elapsed, "turn passed");

        if self.seats[next].clock.is_exhausted() {
            return self.time_out_current();
        }
        Outcome::Applied
    }

    /// Let a seat sit out while paused, keeping its budget.
    ///
    /// The turn pointer is left alone; it moves on the next unpause or turn
    /// change. The last active seat cannot be disabled. Returns the legal
    /// unpause targets afterwards (empty when rejected).
    pub fn disable_seat(&mut self, idx: usize) -> Vec<usize> {
        if self.state != ClockState::Paused || idx >= self.seats.len() {
            return Vec::new();
        }

        if self.seats[idx].active && self.active_count() > 1 {
            self.seats[idx].active = false;
            self.observer.disable_seat(idx);
            tracing::info!(seat = idx, "seat disabled");
        }
        self.resumable_seats()
    }

    /// Bring a sat-out seat back into the rotation while paused.
    pub fn enable_seat(&mut self, idx: usize) -> Vec<usize> {
        if self.state != ClockState::Paused || idx >= self.seats.len() {
            return Vec::new();
        }

        if !self.seats[idx].active {
            self.seats[idx].active = true;
            if idx == self.current {
                self.observer.highlight_seat(idx);
            } else {
                self.observer.enable_seat(idx);
            }
            tracing::info!(seat = idx, "seat re-enabled");
        }
        self.resumable_seats()
    }

    // ─── Internals ──────────────────────────────────────────────────────────

    /// Whole milliseconds since the last sample.
    ///
    /// The sample point advances by exactly what was consumed, so the
    /// sub-millisecond remainder is charged on a later measurement.
    fn pick_elapsed_ms(&mut self) -> u64 {
        let now = self.time.now();
        let elapsed_ms = now.saturating_duration_since(self.last_sample).as_millis() as u64;
        self.last_sample += Duration::from_millis(elapsed_ms);
        elapsed_ms
    }

    fn switch_to(&mut self, target: usize) {
        let outgoing = self.current;
        if self.seats[outgoing].active {
            self.observer.unhighlight_seat(outgoing);
        } else {
            self.observer.disable_seat(outgoing);
        }
        self.current = target;
        self.observer.highlight_seat(target);
    }

    /// Eliminate the holder and hand the turn on.
    ///
    /// Repeats while the new holder is already out of time (a re-enabled
    /// eliminated seat), until a seat with time remains or one seat is left.
    fn time_out_current(&mut self) -> Outcome {
        let first = self.current;
        loop {
            let out = self.current;
            self.alerts.timeout_alert(out);
            self.seats[out].active = false;

            if self.active_count() <= 1 {
                self.state = ClockState::GameOver;
                self.observer.alert_lost_by_time(out, None);
                tracing::info!(seat = out, winner = ?self.winner(), "seat lost on time, game over");
                break;
            }

            self.state = ClockState::Paused;
            let next = self.next_active_seat(out);
            self.switch_to(next);
            self.observer.alert_lost_by_time(out, Some(next));
            tracing::info!(seat = out, next, "seat lost on time");

            if !self.seats[next].clock.is_exhausted() {
                break;
            }
        }
        Outcome::Eliminated { seat: first }
    }
}

impl fmt::Debug for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameClock")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("active_count", &self.active_count())
            .finish_non_exhaustive()
    }
}
