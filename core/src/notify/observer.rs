//! UI notification interface

use tokio::sync::mpsc;

/// Receives every visible state change of the game clock.
///
/// Calls are synchronous and made while the clock is mid-operation, so
/// implementations must not block.
pub trait ClockObserver: Send {
    fn highlight_seat(&mut self, seat: usize);
    fn unhighlight_seat(&mut self, seat: usize);
    fn disable_seat(&mut self, seat: usize);
    fn enable_seat(&mut self, seat: usize);
    fn update_remaining(&mut self, seat: usize, remaining_ms: u64);
    fn alert_running(&mut self);

    /// Play is paused; either `resumable` seat may take the next turn.
    fn alert_pause(&mut self, resumable: [usize; 2]);

    /// `seat` ran out of time. `successor` is `None` when the game is over.
    fn alert_lost_by_time(&mut self, seat: usize, successor: Option<usize>);
}

/// Observer notifications as plain values, for forwarding across tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    Highlight(usize),
    Unhighlight(usize),
    Disabled(usize),
    Enabled(usize),
    RemainingTime { seat: usize, remaining_ms: u64 },
    Running,
    Paused { resumable: [usize; 2] },
    LostByTime { seat: usize, successor: Option<usize> },
}

/// Forwards every notification as a `ClockEvent`.
///
/// A closed receiver is ignored; the clock keeps running without a view.
impl ClockObserver for mpsc::UnboundedSender<ClockEvent> {
    fn highlight_seat(&mut self, seat: usize) {
        let _ = self.send(ClockEvent::Highlight(seat));
    }

    fn unhighlight_seat(&mut self, seat: usize) {
        let _ = self.send(ClockEvent::Unhighlight(seat));
    }

    fn disable_seat(&mut self, seat: usize) {
        let _ = self.send(ClockEvent::Disabled(seat));
    }

    fn enable_seat(&mut self, seat: usize) {
        let _ = self.send(ClockEvent::Enabled(seat));
    }

    fn update_remaining(&mut self, seat: usize, remaining_ms: u64) {
        let _ = self.send(ClockEvent::RemainingTime { seat, remaining_ms });
    }

    fn alert_running(&mut self) {
        let _ = self.send(ClockEvent::Running);
    }

    fn alert_pause(&mut self, resumable: [usize; 2]) {
        let _ = self.send(ClockEvent::Paused { resumable });
    }

    fn alert_lost_by_time(&mut self, seat: usize, successor: Option<usize>) {
        let _ = self.send(ClockEvent::LostByTime { seat, successor });
    }
}

/// Discards all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ClockObserver for NullObserver {
    fn highlight_seat(&mut self, _seat: usize) {}
    fn unhighlight_seat(&mut self, _seat: usize) {}
    fn disable_seat(&mut self, _seat: usize) {}
    fn enable_seat(&mut self, _seat: usize) {}
    fn update_remaining(&mut self, _seat: usize, _remaining_ms: u64) {}
    fn alert_running(&mut self) {}
    fn alert_pause(&mut self, _resumable: [usize; 2]) {}
    fn alert_lost_by_time(&mut self, _seat: usize, _successor: Option<usize>) {}
}
