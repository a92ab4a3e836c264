use std::io::Write;

use quaternity_core::context::validate_clock;
use quaternity_core::{
    AppConfig, AppConfigExt, ClockHandle, ClockSnapshot, ClockState, Outcome, Rejection,
};

use crate::context::CliContext;
use crate::view::format_time;

/// Seats are numbered from 1 on the command line
fn seat_index(seat: usize) -> Result<usize, String> {
    seat.checked_sub(1)
        .ok_or_else(|| "error: seats are numbered from 1".to_string())
}

async fn running_game(ctx: &CliContext) -> Result<ClockHandle, String> {
    ctx.game()
        .await
        .ok_or_else(|| "no game in progress, start one with `new`".to_string())
}

async fn report(ctx: &CliContext, handle: &ClockHandle, outcome: Outcome) -> Result<(), String> {
    match outcome {
        Outcome::Applied => {}
        Outcome::Eliminated { .. } => {
            let snapshot = handle.snapshot().await.map_err(|e| e.to_string())?;
            if let Some(winner) = snapshot.winner() {
                let name = ctx.config.read().await.clock.seat_name(winner);
                println!("** {name} wins **");
            }
        }
        Outcome::Ignored(reason) => println!("ignored: {}", describe(reason)),
    }
    Ok(())
}

fn describe(reason: Rejection) -> &'static str {
    match reason {
        Rejection::WrongState => "not possible in the current clock state",
        Rejection::WrongSeat => "it is not that seat's turn",
        Rejection::InactiveSeat => "that seat is out of the game",
        Rejection::SeatOutOfRange => "no such seat",
    }
}

fn print_targets(names: impl Fn(usize) -> String, targets: &[usize]) {
    if targets.is_empty() {
        println!("no seat can resume play");
        return;
    }
    let offers: Vec<String> = targets
        .iter()
        .map(|&seat| format!("{} (`resume {}`)", names(seat), seat + 1))
        .collect();
    println!("can resume: {}", offers.join(", "));
}

pub async fn new_game(ctx: &CliContext) -> Result<(), String> {
    ctx.start_game().await?;
    println!("new game ready, start the clock with `resume 1`");
    Ok(())
}

pub async fn press(ctx: &CliContext, seat: usize) -> Result<(), String> {
    let seat = seat_index(seat)?;
    let handle = running_game(ctx).await?;
    let outcome = handle.press(seat).await.map_err(|e| e.to_string())?;
    report(ctx, &handle, outcome).await
}

pub async fn pause(ctx: &CliContext) -> Result<(), String> {
    let handle = running_game(ctx).await?;
    let outcome = handle.pause().await.map_err(|e| e.to_string())?;
    report(ctx, &handle, outcome).await
}

pub async fn resume(ctx: &CliContext, seat: usize) -> Result<(), String> {
    let seat = seat_index(seat)?;
    let handle = running_game(ctx).await?;
    let outcome = handle.unpause(seat).await.map_err(|e| e.to_string())?;
    report(ctx, &handle, outcome).await
}

pub async fn toggle(ctx: &CliContext) -> Result<(), String> {
    let handle = running_game(ctx).await?;
    let outcome = handle.toggle_pause().await.map_err(|e| e.to_string())?;
    report(ctx, &handle, outcome).await
}

pub async fn disable(ctx: &CliContext, seat: usize) -> Result<(), String> {
    let seat = seat_index(seat)?;
    let handle = running_game(ctx).await?;
    let targets = handle.disable(seat).await.map_err(|e| e.to_string())?;
    let config = ctx.config.read().await;
    print_targets(|idx| config.clock.seat_name(idx), &targets);
    Ok(())
}

pub async fn enable(ctx: &CliContext, seat: usize) -> Result<(), String> {
    let seat = seat_index(seat)?;
    let handle = running_game(ctx).await?;
    let targets = handle.enable(seat).await.map_err(|e| e.to_string())?;
    let config = ctx.config.read().await;
    print_targets(|idx| config.clock.seat_name(idx), &targets);
    Ok(())
}

pub async fn show_status(ctx: &CliContext) -> Result<(), String> {
    let handle = running_game(ctx).await?;
    let snapshot = handle.snapshot().await.map_err(|e| e.to_string())?;
    let config = ctx.config.read().await;
    print_status(&snapshot, |idx| config.clock.seat_name(idx));
    Ok(())
}

fn print_status(snapshot: &ClockSnapshot, names: impl Fn(usize) -> String) {
    let state = match snapshot.state {
        ClockState::Paused => "paused",
        ClockState::Running => "running",
        ClockState::GameOver => "game over",
    };
    println!("clock {state}");
    println!("{:<4} {:<20} {:<10} Status", "", "Seat", "Remaining");
    println!("{}", "-".repeat(48));

    for (idx, seat) in snapshot.seats.iter().enumerate() {
        let marker = if idx == snapshot.current_seat { "->" } else { "" };
        let status = if seat.active { "" } else { "out" };
        println!(
            "{:<4} {:<20} {:<10} {}",
            marker,
            names(idx),
            format_time(seat.remaining_ms),
            status
        );
    }

    if let Some(winner) = snapshot.winner() {
        println!("\nWinner: {}", names(winner));
    }
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await;
    let clock = &config.clock;
    if let Ok(path) = AppConfig::config_path() {
        println!("config file:      {}", path.display());
    }
    println!("seats:            {}", clock.seat_count);
    println!("initial time:     {}s", clock.initial_time_secs);
    println!("increment:        {}s", clock.increment_secs);
    println!("tick interval:    {}ms", clock.tick_interval_ms);
    println!(
        "audio:            {} (volume {}, {}Hz for {}ms)",
        if config.audio.enabled { "on" } else { "off" },
        config.audio.volume,
        config.audio.frequency_hz,
        config.audio.alert_duration_ms
    );
    Ok(())
}

/// Apply a change to the stored settings. Takes effect on the next `new`.
async fn update_settings(
    ctx: &CliContext,
    change: impl FnOnce(&mut AppConfig),
) -> Result<(), String> {
    let mut config = ctx.config.write().await;
    let mut updated = config.clone();
    change(&mut updated);
    validate_clock(&updated.clock).map_err(|e| e.to_string())?;
    updated.save().map_err(|e| e.to_string())?;
    *config = updated;
    println!("saved, applies from the next `new`");
    Ok(())
}

pub async fn set_time(ctx: &CliContext, secs: u64) -> Result<(), String> {
    update_settings(ctx, |config| config.clock.initial_time_secs = secs).await
}

pub async fn set_increment(ctx: &CliContext, secs: u64) -> Result<(), String> {
    update_settings(ctx, |config| config.clock.increment_secs = secs).await
}

pub async fn set_seats(ctx: &CliContext, count: usize) -> Result<(), String> {
    update_settings(ctx, |config| config.clock.seat_count = count).await
}

pub async fn exit(ctx: &CliContext) -> Result<(), String> {
    ctx.shutdown().await;
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_index_is_one_based() {
        assert_eq!(seat_index(1), Ok(0));
        assert_eq!(seat_index(4), Ok(3));
        assert!(seat_index(0).is_err());
    }
}
