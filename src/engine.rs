use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument};

use crate::{
    config::GameConfig,
    error::{ConfigError, GameError},
    snakes_ladders::{Board, Die, GameState, MAX_SEATS, MoveKind, MoveRecord, Player, grid::LAST_CELL},
};

pub const COMPUTER_NAME: &str = "Computer";
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Where a turn stands. The engine itself only ever rests in `NotStarted`,
/// `AwaitingRoll` or `GameOver`; the intermediate phases are reported by the
/// session while it plays back a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    NotStarted,
    AwaitingRoll,
    Advancing,
    Redirecting,
    TurnResolved,
    GameOver,
}

/// Expands the setup form into seat names and computer seats.
///
/// Blank or missing names become `Player N`. A single requested player gets a
/// computer opponent in seat 1.
pub fn seat_names<S: AsRef<str>>(names: &[S], requested: usize) -> Result<(Vec<String>, Vec<usize>), GameError> {
    if !(1..=MAX_SEATS).contains(&requested) {
        return Err(GameError::InvalidPlayerCount(requested));
    }
    let mut seats: Vec<String> = (0..requested)
        .map(|i| match names.get(i).map(|n| n.as_ref().trim()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Player {}", i + 1),
        })
        .collect();

    let mut computer_seats = Vec::new();
    if requested == 1 {
        seats.push(COMPUTER_NAME.to_string());
        computer_seats.push(1);
    }
    Ok((seats, computer_seats))
}

/// Turns one die value into a resolved position update.
///
/// Owns the board, the current game and the random source used for rolls.
/// Every operation is synchronous; timing is the caller's business.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    board: Board,
    state: Option<GameState>,
    rng: StdRng,
    history_len: usize,
}

impl TurnEngine {
    pub fn new(board: Board) -> Self {
        TurnEngine {
            board,
            state: None,
            rng: StdRng::from_rng(&mut rand::rng()),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }

    /// An engine whose rolls are reproducible.
    pub fn with_seed(board: Board, seed: u64) -> Self {
        TurnEngine {
            rng: StdRng::seed_from_u64(seed),
            ..TurnEngine::new(board)
        }
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = TurnEngine::new(config.board()?);
        engine.history_len = config.display.history_len;
        Ok(engine)
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Starts a fresh game, replacing any game in progress.
    #[instrument(level = "debug", skip(self, names))]
    pub fn start_game<S: AsRef<str>>(&mut self, names: &[S], requested: usize) -> Result<&GameState, GameError> {
        let (seats, computer_seats) = seat_names(names, requested)?;
        let state = GameState::initialize(&seats, &computer_seats)?;
        info!(players = ?seats, computer = ?computer_seats, "game started");
        Ok(&*self.state.insert(state))
    }

    pub fn roll_dice(&mut self) -> u8 {
        Die::roll_with(&mut self.rng).value()
    }

    /// Applies `roll` for the player whose turn it is and returns the
    /// recorded move.
    ///
    /// A roll that would pass the last cell is wasted. Landing on the last
    /// cell ends the game and the turn does not advance.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_roll(&mut self, roll: u8) -> Result<MoveRecord, GameError> {
        let state = self.state.as_mut().ok_or(GameError::IllegalState("no game in progress"))?;
        if state.is_finished() {
            return Err(GameError::IllegalState("game is already over"));
        }
        let roll = Die::new(roll)?.value();

        let player = state.current_player();
        let start = player.position();
        let raw = start + roll;
        let end = if raw > LAST_CELL {
            start
        } else {
            self.board.resolve_landing(raw)?
        };
        let record = MoveRecord::new(player.name(), player.seat(), roll, start, end);

        match record.kind() {
            MoveKind::Overshot => debug!(player = record.player(), roll, start, "roll overshoots the last cell"),
            MoveKind::Ascended => debug!(player = record.player(), from = raw, to = end, "climbed a ladder"),
            MoveKind::Descended => debug!(player = record.player(), from = raw, to = end, "bitten by a snake"),
            MoveKind::Advanced => debug!(player = record.player(), start, end, "moved"),
        }

        state.move_current_player(end);
        state.record_move(record.clone());

        if end == LAST_CELL {
            state.declare_winner();
            info!(winner = record.player(), moves = state.history().len(), "game won");
        } else {
            state.advance_turn();
        }
        Ok(record)
    }

    pub fn phase(&self) -> TurnPhase {
        match &self.state {
            None => TurnPhase::NotStarted,
            Some(state) if state.is_finished() => TurnPhase::GameOver,
            Some(_) => TurnPhase::AwaitingRoll,
        }
    }

    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.require_state().map(GameState::current_player)
    }

    pub fn positions(&self) -> Result<Vec<u8>, GameError> {
        self.require_state().map(GameState::positions)
    }

    /// The most recent moves, bounded by the configured history length.
    pub fn history_snapshot(&self) -> &[MoveRecord] {
        match &self.state {
            Some(state) => state.recent_history(self.history_len),
            None => &[],
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_finished)
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.state.as_ref().and_then(GameState::winner_name)
    }

    /// Drops the current game. The board and random source are kept.
    pub fn reset(&mut self) {
        if self.state.take().is_some() {
            info!("game reset");
        }
    }

    fn require_state(&self) -> Result<&GameState, GameError> {
        self.state.as_ref().ok_or(GameError::IllegalState("no game in progress"))
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        self.state.as_mut().expect("game started")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(positions: &[u8]) -> TurnEngine {
        let mut engine = TurnEngine::with_seed(Board::classic(), 1);
        let names: Vec<String> = (0..positions.len()).map(|i| format!("P{}", i + 1)).collect();
        engine.start_game(&names, positions.len()).unwrap();
        let state = engine.state.as_mut().unwrap();
        for (seat, &cell) in positions.iter().enumerate() {
            state.place(seat, cell);
        }
        engine
    }

    #[test]
    fn test_overshoot_wastes_roll() {
        let mut engine = engine_at(&[98, 1]);
        let record = engine.apply_roll(3).unwrap();
        assert_eq!((record.start(), record.end()), (98, 98));
        assert_eq!(record.kind(), MoveKind::Overshot);
        assert_eq!(engine.positions().unwrap(), vec![98, 1]);
        assert!(!engine.is_game_over());
        assert_eq!(engine.current_player().unwrap().seat(), 1);
        assert_eq!(engine.history_snapshot().len(), 1);
    }

    #[test]
    fn test_ladder_from_start() {
        let mut engine = engine_at(&[1, 1]);
        let record = engine.apply_roll(3).unwrap();
        assert_eq!(record.end(), 14);
        assert_eq!(record.kind(), MoveKind::Ascended);
        assert_eq!(engine.positions().unwrap(), vec![14, 1]);
    }

    #[test]
    fn test_snake_bite() {
        let mut engine = engine_at(&[85, 1]);
        let record = engine.apply_roll(2).unwrap();
        assert_eq!(record.linear_target(), Some(87));
        assert_eq!(record.end(), 24);
        assert_eq!(record.kind(), MoveKind::Descended);
    }

    #[test]
    fn test_exact_landing_wins() {
        let mut engine = engine_at(&[1, 97]);
        engine.apply_roll(1).unwrap();
        let record = engine.apply_roll(3).unwrap();
        assert_eq!(record.end(), 100);
        assert!(engine.is_game_over());
        assert_eq!(engine.winner_name(), Some("P2"));
        assert_eq!(engine.phase(), TurnPhase::GameOver);
        assert_eq!(engine.current_player().unwrap().seat(), 1);
        assert_eq!(engine.apply_roll(4), Err(GameError::IllegalState("game is already over")));
    }

    #[test]
    fn test_ladder_onto_last_cell_wins() {
        let mut engine = TurnEngine::with_seed(Board::from_links(&[], &[(94, 100)]).unwrap(), 0);
        engine.start_game(&["a", "b"], 2).unwrap();
        engine.state.as_mut().unwrap().place(0, 90);
        let record = engine.apply_roll(4).unwrap();
        assert_eq!(record.kind(), MoveKind::Ascended);
        assert_eq!(record.end(), 100);
        assert!(engine.is_game_over());
        assert_eq!(engine.winner_name(), Some("a"));
    }

    #[test]
    fn test_invalid_roll_and_state() {
        let mut engine = TurnEngine::with_seed(Board::classic(), 0);
        assert_eq!(engine.apply_roll(3), Err(GameError::IllegalState("no game in progress")));
        assert!(engine.current_player().is_err());
        assert!(engine.history_snapshot().is_empty());
        assert_eq!(engine.phase(), TurnPhase::NotStarted);

        engine.start_game(&["a", "b"], 2).unwrap();
        assert_eq!(engine.apply_roll(0), Err(GameError::InvalidRoll(0)));
        assert_eq!(engine.apply_roll(7), Err(GameError::InvalidRoll(7)));
        assert!(engine.state().unwrap().history().is_empty());
        assert_eq!(engine.current_player().unwrap().seat(), 0);
    }

    #[test]
    fn test_single_player_gets_computer() {
        let mut engine = TurnEngine::with_seed(Board::classic(), 0);
        let state = engine.start_game(&["Ada"], 1).unwrap();
        assert_eq!(state.players().len(), 2);
        assert_eq!(state.players()[0].name(), "Ada");
        assert!(!state.players()[0].is_computer());
        assert_eq!(state.players()[1].name(), COMPUTER_NAME);
        assert!(state.players()[1].is_computer());
    }

    #[test]
    fn test_seat_names() {
        let (names, computers) = seat_names(&["  ", "Bea", "Cy", "ignored"], 3).unwrap();
        assert_eq!(names, vec!["Player 1", "Bea", "Cy"]);
        assert!(computers.is_empty());

        let empty: [&str; 0] = [];
        let (names, computers) = seat_names(&empty, 1).unwrap();
        assert_eq!(names, vec!["Player 1", "Computer"]);
        assert_eq!(computers, vec![1]);

        assert_eq!(seat_names(&empty, 0), Err(GameError::InvalidPlayerCount(0)));
        assert_eq!(seat_names(&empty, 5), Err(GameError::InvalidPlayerCount(5)));
    }

    #[test]
    fn test_turns_rotate_and_history_is_bounded() {
        let mut engine = TurnEngine::with_seed(Board::from_links(&[], &[]).unwrap(), 0);
        engine.start_game(&["a", "b", "c"], 3).unwrap();
        for i in 0..12 {
            assert_eq!(engine.current_player().unwrap().seat(), i % 3);
            engine.apply_roll(1).unwrap();
        }
        assert_eq!(engine.positions().unwrap(), vec![5, 5, 5]);
        assert_eq!(engine.history_snapshot().len(), DEFAULT_HISTORY_LEN);
        assert_eq!(engine.state().unwrap().history().len(), 12);
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut a = TurnEngine::with_seed(Board::classic(), 42);
        let mut b = TurnEngine::with_seed(Board::classic(), 42);
        let rolls_a: Vec<u8> = (0..20).map(|_| a.roll_dice()).collect();
        let rolls_b: Vec<u8> = (0..20).map(|_| b.roll_dice()).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|r| (1..=6).contains(r)));
    }

    #[test]
    fn test_reset_clears_game() {
        let mut engine = engine_at(&[1, 1]);
        engine.apply_roll(2).unwrap();
        engine.reset();
        assert_eq!(engine.phase(), TurnPhase::NotStarted);
        assert!(engine.positions().is_err());
        assert_eq!(engine.winner_name(), None);
    }
}
