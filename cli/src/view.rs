//! Terminal rendering of clock notifications
//!
//! Remaining-time updates arrive on every tick, so they only refresh the
//! cached times; a line is printed when the turn, pause state or seat
//! eligibility changes.

use std::sync::Arc;

use quaternity_core::ClockEvent;
use quaternity_types::AppConfig;
use tokio::sync::{RwLock, mpsc};

/// Format milliseconds as `MM:SS.t`
pub fn format_time(ms: u64) -> String {
    let tenths = ms / 100;
    let mins = tenths / 600;
    let secs = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", mins, secs, tenths % 10)
}

pub struct TerminalView {
    events: mpsc::UnboundedReceiver<ClockEvent>,
    config: Arc<RwLock<AppConfig>>,
    remaining_ms: Vec<u64>,
}

impl TerminalView {
    pub fn new(events: mpsc::UnboundedReceiver<ClockEvent>, config: Arc<RwLock<AppConfig>>) -> Self {
        Self {
            events,
            config,
            remaining_ms: Vec::new(),
        }
    }

    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            if let Some(line) = self.render(&event).await {
                println!("{line}");
            }
        }
    }

    async fn render(&mut self, event: &ClockEvent) -> Option<String> {
        let config = self.config.read().await;
        let name = |seat: usize| config.clock.seat_name(seat);

        match *event {
            ClockEvent::RemainingTime { seat, remaining_ms } => {
                if self.remaining_ms.len() <= seat {
                    self.remaining_ms.resize(seat + 1, 0);
                }
                self.remaining_ms[seat] = remaining_ms;
                None
            }
            ClockEvent::Highlight(seat) => Some(format!("-> {} to move{}", name(seat), self.time_suffix(seat))),
            ClockEvent::Unhighlight(_) => None,
            ClockEvent::Disabled(seat) => Some(format!("   {} is out", name(seat))),
            ClockEvent::Enabled(seat) => Some(format!("   {} is back in", name(seat))),
            ClockEvent::Running => Some("   clock running".to_string()),
            ClockEvent::Paused { resumable: [holder, next] } => Some(format!(
                "   paused, resume with {} (`resume {}`) or {} (`resume {}`)",
                name(holder),
                holder + 1,
                name(next),
                next + 1
            )),
            ClockEvent::LostByTime { seat, successor: Some(next) } => Some(format!(
                "!! {} lost on time, {} is up next",
                name(seat),
                name(next)
            )),
            ClockEvent::LostByTime { seat, successor: None } => {
                Some(format!("!! {} lost on time. Game over.", name(seat)))
            }
        }
    }

    fn time_suffix(&self, seat: usize) -> String {
        self.remaining_ms
            .get(seat)
            .map(|ms| format!(" ({})", format_time(*ms)))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00.0");
        assert_eq!(format_time(9_999), "00:09.9");
        assert_eq!(format_time(61_250), "01:01.2");
        assert_eq!(format_time(600_000), "10:00.0");
    }

    #[tokio::test]
    async fn test_tick_updates_are_silent() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let config = Arc::new(RwLock::new(AppConfig::default()));
        let mut view = TerminalView::new(rx, config);

        let update = ClockEvent::RemainingTime {
            seat: 2,
            remaining_ms: 42_000,
        };
        assert_eq!(view.render(&update).await, None);
        assert_eq!(
            view.render(&ClockEvent::Highlight(2)).await.as_deref(),
            Some("-> Seat 3 to move (00:42.0)")
        );
        assert_eq!(
            view.render(&ClockEvent::LostByTime { seat: 0, successor: None })
                .await
                .as_deref(),
            Some("!! Seat 1 lost on time. Game over.")
        );
    }
}
