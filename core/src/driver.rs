//! Runs a `GameClock` on its own tokio task
//!
//! The task owns the clock outright. User actions arrive on a bounded
//! command queue and the timeout-detection tick comes from a
//! `tokio::time::interval`; `select!` handles one of them at a time, so each
//! event is fully processed before the next one is looked at.
//!
//! ```text
//!  ClockHandle ──ClockCommand──▶ ┌──────────────┐ ──▶ ClockObserver
//!                                │  driver task │
//!  interval ─────────tick──────▶ │  (GameClock) │ ──▶ AlertSink
//!                                └──────────────┘
//! ```

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::game_clock::{ClockSnapshot, GameClock, Outcome};

const COMMAND_QUEUE_DEPTH: usize = 32;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("clock driver is no longer running")]
    Closed,

    #[error("clock driver task failed")]
    Join(#[from] tokio::task::JoinError),
}

/// User actions forwarded to the driver task
#[derive(Debug)]
pub enum ClockCommand {
    Press {
        seat: usize,
        reply: oneshot::Sender<Outcome>,
    },
    Pause {
        reply: oneshot::Sender<Outcome>,
    },
    Unpause {
        seat: usize,
        reply: oneshot::Sender<Outcome>,
    },
    TogglePause {
        reply: oneshot::Sender<Outcome>,
    },
    Disable {
        seat: usize,
        reply: oneshot::Sender<Vec<usize>>,
    },
    Enable {
        seat: usize,
        reply: oneshot::Sender<Vec<usize>>,
    },
    Snapshot {
        reply: oneshot::Sender<ClockSnapshot>,
    },
    Shutdown,
}

/// Cloneable sender side of the driver
#[derive(Debug, Clone)]
pub struct ClockHandle {
    commands: mpsc::Sender<ClockCommand>,
}

impl ClockHandle {
    pub async fn press(&self, seat: usize) -> Result<Outcome, DriverError> {
        self.request(|reply| ClockCommand::Press { seat, reply }).await
    }

    pub async fn pause(&self) -> Result<Outcome, DriverError> {
        self.request(|reply| ClockCommand::Pause { reply }).await
    }

    pub async fn unpause(&self, seat: usize) -> Result<Outcome, DriverError> {
        self.request(|reply| ClockCommand::Unpause { seat, reply })
            .await
    }

    pub async fn toggle_pause(&self) -> Result<Outcome, DriverError> {
        self.request(|reply| ClockCommand::TogglePause { reply })
            .await
    }

    /// Returns the legal unpause targets after the change
    pub async fn disable(&self, seat: usize) -> Result<Vec<usize>, DriverError> {
        self.request(|reply| ClockCommand::Disable { seat, reply })
            .await
    }

    /// Returns the legal unpause targets after the change
    pub async fn enable(&self, seat: usize) -> Result<Vec<usize>, DriverError> {
        self.request(|reply| ClockCommand::Enable { seat, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<ClockSnapshot, DriverError> {
        self.request(|reply| ClockCommand::Snapshot { reply }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ClockCommand,
    ) -> Result<T, DriverError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(build(tx))
            .await
            .map_err(|_| DriverError::Closed)?;
        rx.await.map_err(|_| DriverError::Closed)
    }
}

/// A running driver task and the handle used to talk to it
#[derive(Debug)]
pub struct ClockDriver {
    handle: ClockHandle,
    task: JoinHandle<GameClock>,
}

impl ClockDriver {
    /// Move `clock` onto a new task ticking every `tick_interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(clock: GameClock, tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let task = tokio::spawn(run(clock, rx, tick_interval));
        Self {
            handle: ClockHandle { commands: tx },
            task,
        }
    }

    pub fn handle(&self) -> ClockHandle {
        self.handle.clone()
    }

    /// Stop ticking and hand the clock back.
    ///
    /// Commands queued ahead of the shutdown are still processed.
    pub async fn shutdown(self) -> Result<GameClock, DriverError> {
        // A closed queue means the task already ended; join it either way
        let _ = self.handle.commands.send(ClockCommand::Shutdown).await;
        Ok(self.task.await?)
    }
}

async fn run(
    mut clock: GameClock,
    mut commands: mpsc::Receiver<ClockCommand>,
    tick_interval: Duration,
) -> GameClock {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::debug!(?tick_interval, "clock driver started");

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(ClockCommand::Shutdown) | None => break,
                Some(command) => apply(&mut clock, command),
            },
            // The tick source goes quiet once nobody's time can run any more
            _ = ticker.tick(), if !clock.is_game_over() => {
                clock.tick();
            }
        }
    }

    tracing::debug!(state = ?clock.state(), "clock driver stopped");
    clock
}

/// Execute one command. A dropped reply receiver only means the caller
/// stopped waiting; the command itself still takes effect.
fn apply(clock: &mut GameClock, command: ClockCommand) {
    match command {
        ClockCommand::Press { seat, reply } => {
            let _ = reply.send(clock.on_button_pressed(seat));
        }
        ClockCommand::Pause { reply } => {
            let _ = reply.send(clock.pause());
        }
        ClockCommand::Unpause { seat, reply } => {
            let _ = reply.send(clock.unpause(seat));
        }
        ClockCommand::TogglePause { reply } => {
            let _ = reply.send(clock.toggle_pause());
        }
        ClockCommand::Disable { seat, reply } => {
            let _ = reply.send(clock.disable_seat(seat));
        }
        ClockCommand::Enable { seat, reply } => {
            let _ = reply.send(clock.enable_seat(seat));
        }
        ClockCommand::Snapshot { reply } => {
            let _ = reply.send(clock.snapshot());
        }
        ClockCommand::Shutdown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_clock::{ClockState, Rejection};
    use crate::notify::{NoAlerts, NullObserver};
    use crate::seat::SeatClock;
    use crate::time_source::MonotonicClock;

    fn spawn_table(budgets_ms: &[u64]) -> ClockDriver {
        let seats = budgets_ms.iter().map(|&ms| SeatClock::new(ms, 0)).collect();
        let clock = GameClock::new(seats, NullObserver, NoAlerts, MonotonicClock).unwrap();
        ClockDriver::spawn(clock, Duration::from_millis(125))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_run_holder_out_of_time() {
        let driver = spawn_table(&[1_000, 5_000]);
        let handle = driver.handle();

        assert_eq!(handle.unpause(0).await.unwrap(), Outcome::Applied);
        tokio::time::sleep(Duration::from_millis(1_300)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.state, ClockState::GameOver);
        assert_eq!(snapshot.seats[0].remaining_ms, 0);
        assert_eq!(snapshot.winner(), Some(1));

        let clock = driver.shutdown().await.unwrap();
        assert!(clock.is_game_over());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fractional_millisecond_tick_interval() {
        let seats = vec![SeatClock::new(10, 0), SeatClock::new(5_000, 0)];
        let clock = GameClock::new(seats, NullObserver, NoAlerts, MonotonicClock).unwrap();
        let driver = ClockDriver::spawn(clock, Duration::from_micros(1_500));
        let handle = driver.handle();

        handle.unpause(0).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.state, ClockState::GameOver);
        assert_eq!(snapshot.winner(), Some(1));
        driver.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_through_handle() {
        let driver = spawn_table(&[10_000; 4]);
        let handle = driver.handle();

        handle.unpause(0).await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(
            handle.press(2).await.unwrap(),
            Outcome::Ignored(Rejection::WrongSeat)
        );
        assert_eq!(handle.press(0).await.unwrap(), Outcome::Applied);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.current_seat, 1);
        assert_eq!(snapshot.seats[0].remaining_ms, 9_700);

        driver.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_clock_does_not_deplete() {
        let driver = spawn_table(&[10_000, 10_000, 10_000]);
        let handle = driver.handle();

        assert_eq!(handle.disable(1).await.unwrap(), vec![0, 2]);
        tokio::time::sleep(Duration::from_secs(5)).await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.state, ClockState::Paused);
        assert!(snapshot.seats.iter().all(|s| s.remaining_ms == 10_000));

        assert_eq!(handle.toggle_pause().await.unwrap(), Outcome::Applied);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(handle.pause().await.unwrap(), Outcome::Applied);
        assert_eq!(handle.enable(1).await.unwrap(), vec![0, 1]);

        let clock = driver.shutdown().await.unwrap();
        assert_eq!(clock.remaining_ms(0), Some(9_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_fails_after_shutdown() {
        let driver = spawn_table(&[10_000, 10_000]);
        let handle = driver.handle();

        driver.shutdown().await.unwrap();
        assert!(matches!(handle.pause().await, Err(DriverError::Closed)));
    }
}
