use clap::{Parser, Subcommand};
use quaternity_cli::CliContext;
use quaternity_cli::commands;
use quaternity_cli::logging;
use quaternity_cli::readline;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    if let Err(err) = commands::new_game(&ctx).await {
        println!("{err}");
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Quaternity four-seat game clock")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// End the current seat's move
    Press { seat: usize },
    Pause,
    /// Start the clock with the given seat to move
    Resume { seat: usize },
    Toggle,
    /// Let a seat sit out (while paused)
    Disable { seat: usize },
    /// Bring a seat back (while paused)
    Enable { seat: usize },
    Status,
    /// Start a fresh game from the saved settings
    New,
    Config,
    SetTime { secs: u64 },
    SetIncrement { secs: u64 },
    SetSeats { count: usize },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "quaternity".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Press { seat }) => commands::press(ctx, seat).await?,
        Some(Commands::Pause) => commands::pause(ctx).await?,
        Some(Commands::Resume { seat }) => commands::resume(ctx, seat).await?,
        Some(Commands::Toggle) => commands::toggle(ctx).await?,
        Some(Commands::Disable { seat }) => commands::disable(ctx, seat).await?,
        Some(Commands::Enable { seat }) => commands::enable(ctx, seat).await?,
        Some(Commands::Status) => commands::show_status(ctx).await?,
        Some(Commands::New) => commands::new_game(ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await?,
        Some(Commands::SetTime { secs }) => commands::set_time(ctx, secs).await?,
        Some(Commands::SetIncrement { secs }) => commands::set_increment(ctx, secs).await?,
        Some(Commands::SetSeats { count }) => commands::set_seats(ctx, count).await?,
        Some(Commands::Exit) => {
            commands::exit(ctx).await?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
