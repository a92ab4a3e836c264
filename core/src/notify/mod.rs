//! Outbound collaborators of the game clock
//!
//! - **Observer**: seat highlighting, remaining-time updates, pause/run alerts
//! - **Alert sink**: the one-shot audible timeout signal
//!
//! Both are fire-and-forget. Nothing the clock sends out is ever read back.

mod alert;
mod observer;

pub use alert::{AlertSink, AudioAlerts, AudioEvent, AudioSender, NoAlerts, create_audio_channel};
pub use observer::{ClockEvent, ClockObserver, NullObserver};
