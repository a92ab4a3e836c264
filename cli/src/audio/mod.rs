//! Audio subsystem for timeout alerts
//!
//! Plays a sine tone when a seat runs out of time, falling back to the
//! terminal bell when no output device is available.

mod service;

pub use service::AudioService;
