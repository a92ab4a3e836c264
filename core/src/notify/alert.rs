//! Audible timeout alerts

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Events that can trigger audio playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// A seat ran out of time: play the timeout tone for `duration`
    Timeout { seat: usize, duration: Duration },
}

/// One-shot notification fired exactly once per timeout
pub trait AlertSink: Send {
    fn timeout_alert(&mut self, seat: usize);
}

pub type AudioSender = mpsc::Sender<AudioEvent>;

/// Create the bounded channel between the clock and the audio service
pub fn create_audio_channel() -> (AudioSender, mpsc::Receiver<AudioEvent>) {
    mpsc::channel(16)
}

/// Queues timeout alerts for the audio service without waiting.
#[derive(Debug, Clone)]
pub struct AudioAlerts {
    sender: AudioSender,
    duration: Duration,
}

impl AudioAlerts {
    pub fn new(sender: AudioSender, duration: Duration) -> Self {
        Self { sender, duration }
    }
}

impl AlertSink for AudioAlerts {
    fn timeout_alert(&mut self, seat: usize) {
        let event = AudioEvent::Timeout {
            seat,
            duration: self.duration,
        };
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(seat, "audio queue full, dropping timeout alert");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(seat, "audio service gone, timeout alert not played");
            }
        }
    }
}

/// Silent sink
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAlerts;

impl AlertSink for NoAlerts {
    fn timeout_alert(&mut self, _seat: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_queued_with_configured_duration() {
        let (tx, mut rx) = create_audio_channel();
        let mut alerts = AudioAlerts::new(tx, Duration::from_millis(750));

        alerts.timeout_alert(2);

        assert_eq!(
            rx.try_recv().ok(),
            Some(AudioEvent::Timeout {
                seat: 2,
                duration: Duration::from_millis(750),
            })
        );
    }

    #[test]
    fn test_full_queue_does_not_block() {
        let (tx, _rx) = mpsc::channel(1);
        let mut alerts = AudioAlerts::new(tx, Duration::from_secs(1));

        alerts.timeout_alert(0);
        alerts.timeout_alert(1);
    }

    #[test]
    fn test_closed_queue_is_ignored() {
        let (tx, rx) = create_audio_channel();
        drop(rx);
        let mut alerts = AudioAlerts::new(tx, Duration::from_secs(1));
        alerts.timeout_alert(3);
    }
}
