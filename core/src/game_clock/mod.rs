//! Game clock: turn order, pause semantics and elimination
//!
//! ```text
//!            unpause(seat)               press / tick / pause
//!  ┌────────┐ ───────────▶ ┌─────────┐ ─────────────────────▶ seat out of time
//!  │ Paused │              │ Running │                              │
//!  └────────┘ ◀─────────── └─────────┘                              ▼
//!      ▲         pause()                            ≥ 2 seats left? ─── no ──▶ GameOver
//!      └─────────────────────────────────────────────────── yes ─┘
//! ```
//!
//! Calls that are not valid in the current state are absorbed and reported
//! as `Outcome::Ignored`; they never partially mutate the clock.

mod clock;
mod error;
mod outcome;
mod rotation;
mod snapshot;


pub use clock::GameClock;
pub use error::ClockError;
pub use outcome::{ClockState, Outcome, Rejection};
pub use rotation::next_active_seat;
pub use snapshot::{ClockSnapshot, SeatSnapshot};
