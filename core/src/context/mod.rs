mod background_tasks;
mod config;
mod error;

pub use background_tasks::BackgroundTasks;
pub use config::{AppConfig, AppConfigExt, AudioSettings, ClockSettings, MIN_SEATS, validate_clock};
pub use error::ConfigError;
