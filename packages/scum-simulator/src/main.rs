//! Scum simulator CLI - plays complete games in memory with bot players.
//!
//! Useful for soaking the round engine and for eyeballing how often seats
//! keep their rank from one round to the next.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use metrics::build_game_metrics;
use output::OutputWriter;
use scum_backend::domain::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "scum-simulator")]
#[command(about = "In-memory scum game simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seats at the table
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Rounds per game
    #[arg(short, long, default_value = "5")]
    rounds: u32,

    /// Decks shuffled together
    #[arg(long, default_value = "1")]
    decks: u8,

    /// Same-rank run that clears the pile (0 disables)
    #[arg(long, default_value = "4")]
    explode: u8,

    /// Power card alias
    #[arg(long, default_value = "3C")]
    power_card: String,

    /// Base seed; game N uses `seed + N`. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs filtered by `RUST_LOG`, as the backend does
    #[arg(long)]
    json_logs: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the JSONL file
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        scum_backend::telemetry::init_tracing();
    } else {
        // Silent by default, only show warnings/errors
        let filter = if args.verbose {
            "debug"
        } else if args.show_output {
            "info"
        } else {
            "warn"
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&args.players) {
        return Err(format!(
            "--players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
            args.players
        )
        .into());
    }
    let config = GameConfig::default()
        .with_deck_count(args.decks)
        .with_explode_pile_count(args.explode)
        .with_power_card_alias(&args.power_card)?;
    config.validate()?;

    if args.show_output {
        info!(
            games = args.games,
            players = args.players,
            rounds = args.rounds,
            "Starting scum simulator"
        );
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_no in 1..=args.games {
        let game_start = Instant::now();
        let seed = base_seed.wrapping_add(u64::from(game_no));

        match Simulator::new(args.players, config, seed).simulate_game(args.rounds) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics =
                    build_game_metrics(game_no, seed, &config, args.games, &result, duration_ms);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {game_no}: {e}");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game_no, seed, "Game failed: {e}");
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let (jsonl_path, csv_path) = (jsonl_path.cloned(), csv_path.clone());
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");

    let Some(first) = results.first() else {
        return;
    };
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let seats = first.players.len();
    let mut firsts = vec![0u32; seats];
    let mut lasts = vec![0u32; seats];
    let mut rounds = 0u32;
    for result in results {
        for (seat, ranks) in result.ranks_by_seat().iter().enumerate() {
            firsts[seat] += ranks.iter().filter(|r| **r == 0).count() as u32;
            lasts[seat] += ranks.iter().filter(|r| usize::from(**r) + 1 == seats).count() as u32;
        }
        rounds += result.rounds.len() as u32;
    }

    println!("\n=== Results by Seat ({rounds} rounds) ===");
    for seat in 0..seats {
        let pct = |n: u32| f64::from(n) / f64::from(rounds.max(1)) * 100.0;
        println!(
            "Seat {seat}: first={} ({:.1}%), last={} ({:.1}%)",
            firsts[seat],
            pct(firsts[seat]),
            lasts[seat],
            pct(lasts[seat])
        );
    }
}
