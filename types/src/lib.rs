//! Shared configuration types for Quaternity
//!
//! This crate contains serializable configuration types that are shared between
//! the clock core (quaternity-core) and the terminal front end (quaternity-cli).

use serde::{Deserialize, Serialize};

/// Smallest table the clock can run: with one seat left the game is already over.
pub const MIN_SEATS: usize = 2;

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Clock Settings
// ─────────────────────────────────────────────────────────────────────────────

fn default_seat_count() -> usize {
    4
}

fn default_initial_time_secs() -> u64 {
    600
}

fn default_tick_interval_ms() -> u64 {
    125
}

/// Time control for a new game. Every seat starts with the same budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Number of seats at the table
    #[serde(default = "default_seat_count")]
    pub seat_count: usize,

    /// Starting budget per seat, in seconds
    #[serde(default = "default_initial_time_secs")]
    pub initial_time_secs: u64,

    /// Time credited after each completed move, in seconds
    #[serde(default)]
    pub increment_secs: u64,

    /// Nominal interval of the timeout-detection tick
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Optional display labels, indexed by seat
    #[serde(default)]
    pub seat_names: Vec<String>,
}

impl ClockSettings {
    /// Label for a seat, falling back to "Seat N" (1-based) when unnamed.
    pub fn seat_name(&self, idx: usize) -> String {
        self.seat_names
            .get(idx)
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Seat {}", idx + 1))
    }

    pub fn initial_time_ms(&self) -> u64 {
        self.initial_time_secs.saturating_mul(1000)
    }

    pub fn increment_ms(&self) -> u64 {
        self.increment_secs.saturating_mul(1000)
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            seat_count: default_seat_count(),
            initial_time_secs: default_initial_time_secs(),
            increment_secs: 0,
            tick_interval_ms: default_tick_interval_ms(),
            seat_names: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio Settings
// ─────────────────────────────────────────────────────────────────────────────

fn default_audio_volume() -> u8 {
    50
}

fn default_alert_duration_ms() -> u64 {
    1000
}

fn default_frequency_hz() -> u32 {
    440
}

/// Timeout beep configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master enable for all audio
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Volume level (0-100)
    #[serde(default = "default_audio_volume")]
    pub volume: u8,

    /// How long the timeout tone plays
    #[serde(default = "default_alert_duration_ms")]
    pub alert_duration_ms: u64,

    /// Pitch of the timeout tone
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_audio_volume(),
            alert_duration_ms: default_alert_duration_ms(),
            frequency_hz: default_frequency_hz(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

///
/// Note: Persistence methods (load/save) are provided by quaternity-core via the
/// `AppConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub clock: ClockSettings,
    #[serde(default)]
    pub audio: AudioSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_name_falls_back_to_position() {
        let settings = ClockSettings {
            seat_names: vec!["North".to_string(), String::new()],
            ..Default::default()
        };
        assert_eq!(settings.seat_name(0), "North");
        assert_eq!(settings.seat_name(1), "Seat 2");
        assert_eq!(settings.seat_name(3), "Seat 4");
    }

    #[test]
    fn seconds_convert_to_millis() {
        let settings = ClockSettings {
            initial_time_secs: 90,
            increment_secs: 5,
            ..Default::default()
        };
        assert_eq!(settings.initial_time_ms(), 90_000);
        assert_eq!(settings.increment_ms(), 5_000);
    }
}
