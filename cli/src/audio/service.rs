//! Audio playback service
//!
//! Runs in a background task, receiving AudioEvents via channel. Each tone
//! plays on its own thread so the service never waits on playback.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use quaternity_core::AudioEvent;
use quaternity_types::AppConfig;
use tokio::sync::{RwLock, mpsc};

/// Audio service that turns timeout events into sound
pub struct AudioService {
    /// Channel to receive audio events
    event_rx: mpsc::Receiver<AudioEvent>,

    /// Shared settings (can be updated at runtime)
    config: Arc<RwLock<AppConfig>>,
}

impl AudioService {
    pub fn new(event_rx: mpsc::Receiver<AudioEvent>, config: Arc<RwLock<AppConfig>>) -> Self {
        Self { event_rx, config }
    }

    /// Run the audio service (blocking async loop)
    pub async fn run(mut self) {
        while let Some(event) = self.event_rx.recv().await {
            // Read settings and extract what we need, then drop the guard
            let (enabled, volume, frequency_hz) = {
                let config = self.config.read().await;
                (
                    config.audio.enabled,
                    config.audio.volume,
                    config.audio.frequency_hz,
                )
            };

            if !enabled {
                continue;
            }

            match event {
                AudioEvent::Timeout { seat, duration } => {
                    tracing::debug!(seat, ?duration, "playing timeout tone");
                    play_tone(frequency_hz, duration, volume);
                }
            }
        }
    }
}

fn play_tone(frequency_hz: u32, duration: Duration, volume: u8) {
    std::thread::spawn(move || {
        use rodio::source::{SineWave, Source};
        use rodio::{OutputStream, Sink};

        let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
            ring_bell();
            return;
        };
        let Ok(sink) = Sink::try_new(&stream_handle) else {
            ring_bell();
            return;
        };

        let tone = SineWave::new(frequency_hz as f32).take_duration(duration);
        sink.set_volume(volume.min(100) as f32 / 100.0);
        sink.append(tone);
        sink.sleep_until_end();
    });
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
