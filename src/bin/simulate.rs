use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;

use snakes_and_ladders::{
    config::GameConfig,
    logging,
    simulate::{SimulationOptions, simulate},
};

/// Play many computer-only games and print aggregate statistics.
#[derive(Parser)]
#[command(name = "simulate", about = "Batch-simulate Snakes and Ladders games")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10_000)]
    games: u32,

    /// Seats per game
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=4))]
    players: u8,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Path to TOML configuration file
    #[arg(long, default_value = "snakes.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    logging::init("warn");
    let cli = Cli::parse();

    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let board = config.board()?;

    let options = SimulationOptions {
        games: cli.games,
        players: cli.players as usize,
        seed: cli.seed,
        max_turns: config.simulation.max_turns,
    };

    let start = Instant::now();
    let report = simulate(&board, &options).context("simulation failed")?;
    let duration = start.elapsed();

    println!("============================================");
    println!("Board: {} snakes, {} ladders", board.snakes().len(), board.ladders().len());
    println!("Games: {}, Finished: {}, Abandoned: {}", report.games, report.finished, report.games - report.finished);
    for (seat, wins) in report.wins.iter().enumerate() {
        println!("Seat {} Wins: {}, Winrate: {:.2}%", seat + 1, wins, report.win_rate(seat));
    }
    println!("Mean rolls per game: {:.2}", report.mean_rolls());
    println!("Ladders climbed: {}, Snake bites: {}, Wasted rolls: {}", report.ladders, report.snakes, report.wasted);
    let busiest: Vec<String> = report.busiest_cells(5)
        .into_iter()
        .map(|(cell, count)| format!("{} ({})", cell, count))
        .collect();
    println!("Busiest cells: {}", busiest.join(", "));
    println!("Simulated in {:?}", duration);
    println!("============================================");
    Ok(())
}
