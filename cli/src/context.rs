use std::sync::Arc;
use std::time::Duration;

use quaternity_core::context::{BackgroundTasks, validate_clock};
use quaternity_core::{
    AppConfig, AppConfigExt, AudioAlerts, AudioSender, ClockDriver, ClockEvent, ClockHandle,
    GameClock, MonotonicClock, create_audio_channel,
};
use tokio::sync::{Mutex, RwLock, mpsc};

use crate::audio::AudioService;
use crate::view::TerminalView;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// The running game. None until the first `new`.
    game: Arc<Mutex<Option<ClockDriver>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
    audio_tx: AudioSender,
    events_tx: mpsc::UnboundedSender<ClockEvent>,
}

impl CliContext {
    /// Load the config and start the audio and view tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        let config = Arc::new(RwLock::new(AppConfig::load()));

        let (audio_tx, audio_rx) = create_audio_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let tasks = BackgroundTasks {
            audio: Some(tokio::spawn(
                AudioService::new(audio_rx, Arc::clone(&config)).run(),
            )),
            view: Some(tokio::spawn(
                TerminalView::new(events_rx, Arc::clone(&config)).run(),
            )),
        };

        Self {
            config,
            game: Arc::new(Mutex::new(None)),
            tasks: Arc::new(Mutex::new(tasks)),
            audio_tx,
            events_tx,
        }
    }

    /// Replace any running game with a fresh one built from the current settings.
    pub async fn start_game(&self) -> Result<ClockHandle, String> {
        let config = self.config.read().await.clone();
        validate_clock(&config.clock).map_err(|e| e.to_string())?;

        self.end_game().await;

        let alerts = AudioAlerts::new(
            self.audio_tx.clone(),
            Duration::from_millis(config.audio.alert_duration_ms),
        );
        let clock = GameClock::from_settings(
            &config.clock,
            self.events_tx.clone(),
            alerts,
            MonotonicClock,
        )
        .map_err(|e| e.to_string())?;

        let driver = ClockDriver::spawn(clock, Duration::from_millis(config.clock.tick_interval_ms));
        let handle = driver.handle();
        *self.game.lock().await = Some(driver);

        tracing::info!(
            seats = config.clock.seat_count,
            initial_secs = config.clock.initial_time_secs,
            increment_secs = config.clock.increment_secs,
            "new game started"
        );
        Ok(handle)
    }

    /// Handle to the running game, if any.
    pub async fn game(&self) -> Option<ClockHandle> {
        self.game.lock().await.as_ref().map(ClockDriver::handle)
    }

    /// Stop the running game's driver, if any.
    pub async fn end_game(&self) {
        let Some(driver) = self.game.lock().await.take() else {
            return;
        };
        match driver.shutdown().await {
            Ok(clock) => tracing::debug!(?clock, "previous game ended"),
            Err(e) => tracing::warn!(error = %e, "previous game did not shut down cleanly"),
        }
    }

    pub async fn shutdown(&self) {
        self.end_game().await;
        self.tasks.lock().await.abort_all();
    }
}
