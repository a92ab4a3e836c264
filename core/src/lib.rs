pub mod context;
pub mod driver;
pub mod game_clock;
pub mod notify;
pub mod seat;
pub mod time_source;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt, AudioSettings, ClockSettings, ConfigError};
pub use driver::{ClockCommand, ClockDriver, ClockHandle, DriverError};
pub use game_clock::{
    ClockError, ClockSnapshot, ClockState, GameClock, Outcome, Rejection, SeatSnapshot,
};
pub use notify::{
    AlertSink, AudioAlerts, AudioEvent, AudioSender, ClockEvent, ClockObserver, NoAlerts,
    NullObserver, create_audio_channel,
};
pub use seat::SeatClock;
pub use time_source::{ManualClock, MonotonicClock, TimeSource};
