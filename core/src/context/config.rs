//! Application configuration
//!
//! This module re-exports shared types from quaternity-types and provides
//! validation and persistence for AppConfig.

use std::path::PathBuf;

pub use quaternity_types::{AppConfig, AudioSettings, ClockSettings, MIN_SEATS};

use super::error::ConfigError;

const APP_NAME: &str = "quaternity";
const CONFIG_NAME: &str = "config";

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl AppConfigExt for AppConfig {
    /// Load the stored config, falling back to defaults if it is unreadable
    fn load() -> Self {
        match confy::load::<AppConfig>(APP_NAME, CONFIG_NAME) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }
}

/// Reject time controls the clock cannot run
pub fn validate_clock(settings: &ClockSettings) -> Result<(), ConfigError> {
    if settings.seat_count < MIN_SEATS {
        return Err(ConfigError::SeatCount {
            count: settings.seat_count,
            min: MIN_SEATS,
        });
    }
    if settings.initial_time_secs == 0 {
        return Err(ConfigError::ZeroInitialTime);
    }
    if settings.tick_interval_ms == 0 {
        return Err(ConfigError::ZeroTickInterval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(validate_clock(&ClockSettings::default()).is_ok());
    }

    #[test]
    fn test_rejects_single_seat() {
        let settings = ClockSettings {
            seat_count: 1,
            ..Default::default()
        };
        assert!(matches!(
            validate_clock(&settings),
            Err(ConfigError::SeatCount { count: 1, min: 2 })
        ));
    }

    #[test]
    fn test_rejects_zero_budget_and_tick() {
        let no_time = ClockSettings {
            initial_time_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            validate_clock(&no_time),
            Err(ConfigError::ZeroInitialTime)
        ));

        let no_tick = ClockSettings {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            validate_clock(&no_tick),
            Err(ConfigError::ZeroTickInterval)
        ));
    }

    #[test]
    fn test_path_lookup_failure_is_reported_as_such() {
        let err = ConfigError::Path(confy::ConfyError::BadConfigDirectory(
            "no home directory".to_string(),
        ));
        assert_eq!(err.to_string(), "failed to locate the configuration file");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_path_names_the_app() {
        if let Ok(path) = AppConfig::config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }
}
