use hashbrown::HashMap;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, info};

use crate::{
    engine::{TurnEngine, seat_names},
    error::GameError,
    snakes_ladders::{Board, GameOutcome, GameState, MoveKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub games: u32,
    pub players: usize,
    pub seed: u64,
    /// Rolls after which a game is abandoned unfinished.
    pub max_turns: u32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            games: 10_000,
            players: 2,
            seed: 0,
            max_turns: 10_000,
        }
    }
}

/// Aggregate statistics over many computer-only games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub games: u32,
    pub finished: u32,
    pub wins: Vec<u32>,
    pub rolls: u64,
    pub ladders: u64,
    pub snakes: u64,
    pub wasted: u64,
    /// How often a move ended on each cell.
    pub landings: HashMap<u8, u32>,
}

impl SimulationReport {
    fn empty(players: usize) -> Self {
        SimulationReport {
            games: 0,
            finished: 0,
            wins: vec![0; players],
            rolls: 0,
            ladders: 0,
            snakes: 0,
            wasted: 0,
            landings: HashMap::new(),
        }
    }

    fn merge(mut self, other: SimulationReport) -> Self {
        self.games += other.games;
        self.finished += other.finished;
        for (total, wins) in self.wins.iter_mut().zip(other.wins) {
            *total += wins;
        }
        self.rolls += other.rolls;
        self.ladders += other.ladders;
        self.snakes += other.snakes;
        self.wasted += other.wasted;
        for (cell, count) in other.landings {
            *self.landings.entry(cell).or_insert(0) += count;
        }
        self
    }

    pub fn mean_rolls(&self) -> f32 {
        if self.games > 0 {
            self.rolls as f32 / self.games as f32
        } else {
            0.0
        }
    }

    pub fn win_rate(&self, seat: usize) -> f32 {
        match self.wins.get(seat) {
            Some(&wins) if self.finished > 0 => wins as f32 / self.finished as f32 * 100.0,
            _ => 0.0,
        }
    }

    /// The `n` cells moves ended on most often, busiest first.
    pub fn busiest_cells(&self, n: usize) -> Vec<(u8, u32)> {
        let mut cells: Vec<(u8, u32)> = self.landings.iter().map(|(&cell, &count)| (cell, count)).collect();
        cells.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        cells.truncate(n);
        cells
    }
}

fn play_one(board: &Board, options: &SimulationOptions, game: u32) -> Result<SimulationReport, GameError> {
    let mut engine = TurnEngine::with_seed(board.clone(), options.seed.wrapping_add(game as u64));
    let names: Vec<String> = (1..=options.players).map(|i| format!("CPU {}", i)).collect();
    let seats = engine.start_game(&names, options.players)?.players().len();

    let mut report = SimulationReport::empty(seats);
    report.games = 1;

    for _ in 0..options.max_turns {
        let roll = engine.roll_dice();
        let record = engine.apply_roll(roll)?;
        report.rolls += 1;
        match record.kind() {
            MoveKind::Ascended => report.ladders += 1,
            MoveKind::Descended => report.snakes += 1,
            MoveKind::Overshot => report.wasted += 1,
            MoveKind::Advanced => (),
        }
        *report.landings.entry(record.end()).or_insert(0) += 1;

        if let Some(GameOutcome::Won { seat }) = engine.state().map(GameState::outcome) {
            report.finished = 1;
            report.wins[seat] += 1;
            break;
        }
    }

    if report.finished == 0 {
        debug!(game, max_turns = options.max_turns, "game abandoned at turn cap");
    }
    Ok(report)
}

/// Plays `options.games` games in parallel. Game `i` rolls with seed
/// `options.seed + i`, so a report is reproducible.
///
/// One requested player plays against the computer seat, so the report then
/// has two seats.
pub fn simulate(board: &Board, options: &SimulationOptions) -> Result<SimulationReport, GameError> {
    let seats = seat_names::<&str>(&[], options.players)?.0.len();
    info!(games = options.games, seats, seed = options.seed, "simulating");
    (0..options.games)
        .into_par_iter()
        .map(|game| play_one(board, options, game))
        .try_reduce(|| SimulationReport::empty(seats), |a, b| Ok(a.merge(b)))
}
