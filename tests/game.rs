use std::time::Duration;

use snakes_and_ladders::{
    config::GameConfig,
    engine::{TurnEngine, TurnPhase},
    error::GameError,
    session::{Session, SessionEvent},
    snakes_ladders::{Board, MoveKind, MovePath, Stage},
};

fn play_to_end(seed: u64, players: usize) -> TurnEngine {
    let mut engine = TurnEngine::with_seed(Board::classic(), seed);
    let names: Vec<String> = (1..=players).map(|i| format!("P{}", i)).collect();
    engine.start_game(&names, players).unwrap();
    while !engine.is_game_over() {
        let roll = engine.roll_dice();
        engine.apply_roll(roll).unwrap();
    }
    engine
}

#[test]
fn deltas_match_rolls_unless_redirected_or_wasted() {
    let board = Board::classic();
    for seed in 0..50 {
        let engine = play_to_end(seed, 2 + (seed as usize % 3));
        let history = engine.state().unwrap().history();

        let plain: Vec<_> = history.iter().filter(|r| r.kind() == MoveKind::Advanced).collect();
        let delta: u32 = plain.iter().map(|r| (r.end() - r.start()) as u32).sum();
        let rolled: u32 = plain.iter().map(|r| r.roll() as u32).sum();
        assert_eq!(delta, rolled, "seed {}", seed);

        for record in history {
            match record.kind() {
                MoveKind::Overshot => {
                    assert_eq!(record.start(), record.end());
                    assert!(record.start() + record.roll() > 100);
                }
                MoveKind::Ascended | MoveKind::Descended => {
                    let linear = record.start() + record.roll();
                    assert_eq!(board.resolve_landing(linear), Ok(record.end()));
                    assert_ne!(linear, record.end());
                }
                MoveKind::Advanced => assert_eq!(record.start() + record.roll(), record.end()),
            }
        }
    }
}

#[test]
fn turns_rotate_until_the_winning_move() {
    for seed in 0..30 {
        let players = 2 + (seed as usize % 3);
        let engine = play_to_end(seed, players);
        let state = engine.state().unwrap();
        let history = state.history();

        for (i, record) in history.iter().enumerate() {
            assert_eq!(record.seat(), i % players, "seed {} move {}", seed, i);
        }
        let last = history.last().unwrap();
        assert_eq!(last.end(), 100);
        assert_eq!(state.current_player().seat(), last.seat());
        assert_eq!(engine.winner_name(), Some(last.player()));

        let positions = state.positions();
        assert_eq!(positions.iter().filter(|&&p| p == 100).count(), 1);
        assert!(positions.iter().all(|&p| (1..=100).contains(&p)));
    }
}

#[test]
fn no_rolls_after_game_over() {
    let mut engine = play_to_end(7, 2);
    let moves = engine.state().unwrap().history().len();
    assert_eq!(engine.apply_roll(1), Err(GameError::IllegalState("game is already over")));
    assert_eq!(engine.state().unwrap().history().len(), moves);
    assert_eq!(engine.phase(), TurnPhase::GameOver);
}

#[test]
fn paths_end_where_the_engine_put_the_token() {
    let engine = play_to_end(3, 4);
    for record in engine.state().unwrap().history() {
        let path: Vec<_> = MovePath::new(record).collect();
        match record.kind() {
            MoveKind::Overshot => assert!(path.is_empty()),
            kind => {
                assert_eq!(path.last().map(|s| s.cell), Some(record.end()));
                let walk = path.iter().filter(|s| s.stage == Stage::Walk).count();
                assert_eq!(walk, record.roll() as usize);
                let slides = path.len() - walk;
                assert_eq!(slides > 0, kind != MoveKind::Advanced);
            }
        }
    }
}

#[test]
fn single_player_session_runs_to_completion() {
    let config = GameConfig::from_toml(
        "[timing]\nroll_delay = 0\nstep_delay = 0\nturn_pause = 0\ncomputer_delay = 0\ncelebration_frames = 0\n",
    ).unwrap();
    let mut session = Session::from_config(&config).unwrap();
    session.start(&["Ada"], 1).unwrap();

    let mut events = session.tick(Duration::ZERO);
    let mut guard = 0;
    while session.phase() != TurnPhase::GameOver {
        session.request_roll().unwrap();
        events.extend(session.tick(Duration::ZERO));
        guard += 1;
        assert!(guard < 10_000, "game did not finish");
    }

    let engine = session.engine();
    assert!(engine.is_game_over());
    let players = engine.state().unwrap().players();
    assert_eq!(players.len(), 2);
    assert!(players[1].is_computer());

    let computer_rolls = events.iter().filter(|e| matches!(e, SessionEvent::Rolled { seat: 1, .. })).count();
    let human_rolls = events.iter().filter(|e| matches!(e, SessionEvent::Rolled { seat: 0, .. })).count();
    assert_eq!(human_rolls, guard);
    assert!(computer_rolls + 1 >= human_rolls);
    assert!(events.iter().any(|e| matches!(e, SessionEvent::GameWon { .. })));
    assert_eq!(events.last(), Some(&SessionEvent::CelebrationFinished));
    assert_eq!(session.token_cells(), engine.positions().unwrap().as_slice());
}
