use crate::{error::GameError, snakes_ladders::{MoveRecord, Player}};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Won { seat: usize },
}

/// Canonical positions, turn order and history of one game.
///
/// Only the turn engine mutates a running game; everything public here is a
/// read-only view apart from `advance_turn` and `record_move`, which are
/// safe to call in any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    players: Vec<Player>,
    turn: usize,
    history: Vec<MoveRecord>,
    winner: Option<usize>,
}

impl GameState {
    /// Seats `names` in order, every token on the first cell.
    pub fn initialize<S: AsRef<str>>(names: &[S], computer_seats: &[usize]) -> Result<Self, GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&names.len()) {
            return Err(GameError::InvalidPlayerCount(names.len()));
        }
        let players = names.iter()
            .enumerate()
            .map(|(seat, name)| Player::new(name.as_ref(), seat, computer_seats.contains(&seat)))
            .collect();

        Ok(GameState {
            players,
            turn: 0,
            history: Vec::new(),
            winner: None,
        })
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn advance_turn(&mut self) {
        if self.is_finished() {
            return;
        }
        self.turn = (self.turn + 1) % self.players.len();
    }

    pub fn record_move(&mut self, record: MoveRecord) {
        self.history.push(record);
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn positions(&self) -> Vec<u8> {
        self.players.iter().map(Player::position).collect()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The last `n` moves, oldest first.
    pub fn recent_history(&self, n: usize) -> &[MoveRecord] {
        &self.history[self.history.len().saturating_sub(n)..]
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|seat| &self.players[seat])
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(Player::name)
    }

    pub fn outcome(&self) -> GameOutcome {
        match self.winner {
            Some(seat) => GameOutcome::Won { seat },
            None => GameOutcome::Ongoing,
        }
    }

    pub(crate) fn move_current_player(&mut self, cell: u8) {
        self.players[self.turn].set_position(cell);
    }

    pub(crate) fn declare_winner(&mut self) {
        self.winner = Some(self.turn);
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, seat: usize, cell: u8) {
        self.players[seat].set_position(cell);
    }
}
