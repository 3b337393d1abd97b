use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::{
    config::{GameConfig, TimingConfig},
    engine::{TurnEngine, TurnPhase},
    error::{ConfigError, GameError},
    snakes_ladders::{Die, MovePath, MoveRecord, Stage},
    timeline::Timeline,
};

/// Notifications for whoever renders the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Rolled { seat: usize, roll: u8 },
    TokenMoved { seat: usize, cell: u8, stage: Stage },
    MoveFinished(MoveRecord),
    TurnChanged { seat: usize },
    GameWon { seat: usize, name: String },
    CelebrationFrame(u32),
    CelebrationFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Advance,
    NextTurn,
    ComputerRoll,
    Celebrate(u32),
}

#[derive(Debug, Clone)]
struct InFlight {
    record: MoveRecord,
    path: MovePath,
}

/// Plays a game back at human speed on top of a [`TurnEngine`].
///
/// The engine resolves a roll at once; the session then replays the move one
/// cell per `step_delay`, pauses between turns and rolls for computer seats.
/// Only one roll sequence is ever in flight: roll requests that arrive while a
/// move is still playing back are ignored.
///
/// Events produced by `start`, `submit_roll` and `request_roll` are buffered
/// and handed out by the next `tick`.
#[derive(Debug, Clone)]
pub struct Session {
    engine: TurnEngine,
    timing: TimingConfig,
    timeline: Timeline<Step>,
    tokens: Vec<u8>,
    in_flight: Option<InFlight>,
    phase: TurnPhase,
    last_roll: Option<u8>,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(engine: TurnEngine, timing: TimingConfig) -> Self {
        Session {
            engine,
            timing,
            timeline: Timeline::new(),
            tokens: Vec::new(),
            in_flight: None,
            phase: TurnPhase::NotStarted,
            last_roll: None,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Session::new(TurnEngine::from_config(config)?, config.timing.clone()))
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Cells where the tokens are drawn right now, by seat. These trail the
    /// engine's positions while a move is playing back.
    pub fn token_cells(&self) -> &[u8] {
        &self.tokens
    }

    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// True unless a human seat may roll right now. A computer seat waiting
    /// for its own roll counts as busy.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.phase != TurnPhase::AwaitingRoll || !self.timeline.is_idle()
    }

    /// Starts a new game, discarding anything still scheduled.
    pub fn start<S: AsRef<str>>(&mut self, names: &[S], requested: usize) -> Result<(), GameError> {
        self.clear();
        let state = self.engine.start_game(names, requested)?;
        self.tokens = state.positions();
        self.phase = TurnPhase::AwaitingRoll;
        self.announce_turn();
        Ok(())
    }

    /// Human roll trigger. Returns the rolled value, or `None` when the
    /// request was ignored because a move is playing back or a computer seat
    /// is up.
    pub fn request_roll(&mut self) -> Result<Option<u8>, GameError> {
        if !self.accepts_human_roll()? {
            return Ok(None);
        }
        let roll = self.engine.roll_dice();
        self.begin_roll(roll).map(Some)
    }

    /// Like [`Session::request_roll`] with a die value supplied by the caller.
    pub fn submit_roll(&mut self, roll: u8) -> Result<Option<u8>, GameError> {
        if !self.accepts_human_roll()? {
            return Ok(None);
        }
        Die::new(roll)?;
        self.begin_roll(roll).map(Some)
    }

    /// Advances the clock by `elapsed` and runs every step that became due.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<SessionEvent> {
        self.timeline.advance(elapsed);
        while let Some(step) = self.timeline.pop_due() {
            trace!(?step, now = ?self.timeline.now(), "step");
            self.run(step);
        }
        std::mem::take(&mut self.events)
    }

    /// Abandons the game and every pending step.
    pub fn reset(&mut self) {
        self.clear();
        self.engine.reset();
    }

    fn clear(&mut self) {
        self.timeline.clear();
        self.tokens.clear();
        self.in_flight = None;
        self.phase = TurnPhase::NotStarted;
        self.last_roll = None;
        self.events.clear();
    }

    fn accepts_human_roll(&self) -> Result<bool, GameError> {
        if self.phase == TurnPhase::NotStarted {
            return Err(GameError::IllegalState("no game in progress"));
        }
        if self.in_flight.is_some() {
            debug!("roll ignored, a move is still playing back");
            return Ok(false);
        }
        if self.phase == TurnPhase::GameOver {
            return Err(GameError::IllegalState("game is already over"));
        }
        if self.phase != TurnPhase::AwaitingRoll {
            debug!(phase = ?self.phase, "roll ignored between turns");
            return Ok(false);
        }
        if self.engine.current_player()?.is_computer() {
            debug!("roll ignored, computer seat is up");
            return Ok(false);
        }
        Ok(true)
    }

    fn begin_roll(&mut self, roll: u8) -> Result<u8, GameError> {
        let record = self.engine.apply_roll(roll)?;
        self.events.push(SessionEvent::Rolled { seat: record.seat(), roll });
        self.last_roll = Some(roll);
        self.phase = TurnPhase::Advancing;
        let path = MovePath::new(&record);
        self.in_flight = Some(InFlight { record, path });
        self.timeline.schedule(self.timing.roll_delay(), Step::Advance);
        Ok(roll)
    }

    fn run(&mut self, step: Step) {
        match step {
            Step::Advance => self.advance(),
            Step::NextTurn => {
                self.phase = TurnPhase::AwaitingRoll;
                self.announce_turn();
            }
            Step::ComputerRoll => {
                let roll = self.engine.roll_dice();
                if let Err(err) = self.begin_roll(roll) {
                    warn!(%err, "computer roll rejected");
                }
            }
            Step::Celebrate(frame) if frame < self.timing.celebration_frames => {
                self.events.push(SessionEvent::CelebrationFrame(frame));
                self.timeline.schedule(self.timing.celebration_frame(), Step::Celebrate(frame + 1));
            }
            Step::Celebrate(_) => self.events.push(SessionEvent::CelebrationFinished),
        }
    }

    fn advance(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };
        let seat = in_flight.record.seat();

        if let Some(step) = in_flight.path.next() {
            self.tokens[seat] = step.cell;
            self.phase = match step.stage {
                Stage::Walk => TurnPhase::Advancing,
                Stage::Slide => TurnPhase::Redirecting,
            };
            self.events.push(SessionEvent::TokenMoved { seat, cell: step.cell, stage: step.stage });
            self.timeline.schedule(self.timing.step_delay(), Step::Advance);
            return;
        }

        let record = in_flight.record.clone();
        self.in_flight = None;
        self.tokens[seat] = record.end();
        self.events.push(SessionEvent::MoveFinished(record));

        if let Some(name) = self.engine.winner_name() {
            info!(winner = name, "celebrating");
            self.events.push(SessionEvent::GameWon { seat, name: name.to_string() });
            self.phase = TurnPhase::GameOver;
            self.timeline.schedule(Duration::ZERO, Step::Celebrate(0));
        } else {
            self.phase = TurnPhase::TurnResolved;
            self.timeline.schedule(self.timing.turn_pause(), Step::NextTurn);
        }
    }

    fn announce_turn(&mut self) {
        let Ok(player) = self.engine.current_player() else {
            return;
        };
        let (seat, is_computer) = (player.seat(), player.is_computer());
        self.events.push(SessionEvent::TurnChanged { seat });
        if is_computer {
            self.timeline.schedule(self.timing.computer_delay(), Step::ComputerRoll);
        }
    }
}
