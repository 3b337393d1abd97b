use std::{path::PathBuf, sync::OnceLock};

use anyhow::{Context, anyhow};
use clap::Parser;
use nannou::{color::{BLACK, Rgb8, rgb8}, event::{Key, Update}, geom::{Rect, pt2}};
use snakes_and_ladders::{
    config::GameConfig,
    engine::{TurnEngine, TurnPhase},
    logging,
    session::{Session, SessionEvent},
    snakes_ladders::{GridPosition, LinkKind, MoveKind, MoveRecord, grid::BOARD_SIZE},
};

/// Play Snakes and Ladders against friends or the computer.
#[derive(Parser, Debug)]
#[command(name = "snakes_and_ladders")]
struct Cli {
    /// Number of players; 1 adds a computer opponent
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=4))]
    players: u8,

    /// Player name, repeat once per seat
    #[arg(long = "name")]
    names: Vec<String>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "snakes.toml")]
    config: PathBuf,

    /// Seed the dice for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

struct Launch {
    cli: Cli,
    config: GameConfig,
}

static LAUNCH: OnceLock<Launch> = OnceLock::new();

const TOKEN_COLORS: [u32; 4] = [0xD72631, 0x1B98E0, 0xF4A261, 0x8E44AD];
const CELL_COLORS: [u32; 2] = [0xC4E1C1, 0xA3D2CA];
const CELEBRATION_COLORS: [u32; 5] = [0xFFDDC1, 0xFFABAB, 0xFFC3A0, 0xFF677D, 0xD4A5A5];
const PANEL_WIDTH: f32 = 340.0;

fn main() -> anyhow::Result<()> {
    logging::init("info");

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    LAUNCH.set(Launch { cli, config }).map_err(|_| anyhow!("launch settings already set"))?;
    nannou::app(model).update(update).run();
    Ok(())
}

struct Model {
    session: Session,
    config: GameConfig,
    names: Vec<String>,
    requested: usize,
    status: String,
    winner: Option<String>,
    celebration: Option<u32>,
}

fn model(app: &nannou::App) -> Model {
    let launch = LAUNCH.get().expect("launch settings are set before the app starts");
    let config = launch.config.clone();
    let board_px = config.display.cell_size * BOARD_SIZE as f32;

    app.new_window()
        .title("Snakes and Ladders")
        .size((board_px + PANEL_WIDTH) as u32, board_px as u32)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .unwrap();

    let mut engine = TurnEngine::from_config(&config).expect("config was validated on load");
    if let Some(seed) = launch.cli.seed {
        engine.set_seed(seed);
    }

    Model {
        session: Session::new(engine, config.timing.clone()),
        config,
        names: launch.cli.names.clone(),
        requested: launch.cli.players as usize,
        status: setup_status(),
        winner: None,
        celebration: None,
    }
}

fn setup_status() -> String {
    "Press 1-4 to pick players, Enter to start".to_string()
}

fn player_name(model: &Model, seat: usize) -> String {
    model.session.engine()
        .state()
        .and_then(|state| state.player(seat))
        .map_or_else(|| format!("Player {}", seat + 1), |p| p.name().to_string())
}

fn move_message(record: &MoveRecord) -> String {
    match record.kind() {
        MoveKind::Descended => format!("{} got bitten by a snake and slid down to {}!", record.player(), record.end()),
        MoveKind::Ascended => format!("{} climbed a ladder to {}!", record.player(), record.end()),
        MoveKind::Overshot => format!("{} needs an exact roll and stays on {}.", record.player(), record.end()),
        MoveKind::Advanced => format!("{} moved to {}.", record.player(), record.end()),
    }
}

fn update(_app: &nannou::App, model: &mut Model, update: Update) {
    for event in model.session.tick(update.since_last) {
        match event {
            SessionEvent::Rolled { seat, roll } => {
                model.status = format!("{} rolled {}", player_name(model, seat), roll);
            }
            SessionEvent::TokenMoved { .. } => (),
            SessionEvent::MoveFinished(record) => model.status = move_message(&record),
            SessionEvent::TurnChanged { seat } => {
                model.status = format!("{}'s turn", player_name(model, seat));
            }
            SessionEvent::GameWon { name, .. } => {
                model.status = format!("Congratulations, {}!", name);
                model.winner = Some(name);
                model.celebration = Some(0);
            }
            SessionEvent::CelebrationFrame(frame) => model.celebration = Some(frame),
            SessionEvent::CelebrationFinished => model.celebration = None,
        }
    }
}

fn key_pressed(_app: &nannou::App, model: &mut Model, key: Key) {
    let setup = model.session.phase() == TurnPhase::NotStarted;
    match key {
        Key::Key1 | Key::Key2 | Key::Key3 | Key::Key4 if setup => {
            model.requested = match key {
                Key::Key1 => 1,
                Key::Key2 => 2,
                Key::Key3 => 3,
                _ => 4,
            };
        }
        Key::Return if setup => {
            model.winner = None;
            model.celebration = None;
            if let Err(err) = model.session.start(&model.names, model.requested) {
                model.status = err.to_string();
            }
        }
        Key::Space => {
            if let Err(err) = model.session.request_roll() {
                model.status = err.to_string();
            }
        }
        Key::R => {
            model.session.reset();
            model.winner = None;
            model.celebration = None;
            model.status = setup_status();
        }
        _ => (),
    }
}

fn hex(rgb: u32) -> Rgb8 {
    rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn cell_center(board_rect: &Rect, cell_size: f32, cell: u8) -> Option<(f32, f32)> {
    let pos = GridPosition::from_cell(cell).ok()?;
    Some((
        board_rect.left() + (pos.col as f32 + 0.5) * cell_size,
        board_rect.bottom() + (pos.row as f32 + 0.5) * cell_size,
    ))
}

fn view(app: &nannou::App, model: &Model, frame: nannou::frame::Frame) {
    let draw = app.draw();
    draw.background().color(hex(0xE8F6F3));

    let window_rect = app.window_rect();
    let cell_size = model.config.display.cell_size;
    let board_px = cell_size * BOARD_SIZE as f32;
    let board_rect = Rect::from_w_h(board_px, board_px).top_left_of(window_rect);
    let panel_rect = Rect::from_w_h(window_rect.w() - board_px, window_rect.h()).top_right_of(window_rect);
    let board = model.session.engine().board();

    // Cells
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let Ok(cell) = board.from_grid_position(GridPosition::new(row, col)) else {
                continue;
            };
            let x = board_rect.left() + (col as f32 + 0.5) * cell_size;
            let y = board_rect.bottom() + (row as f32 + 0.5) * cell_size;
            let fill = match board.link_at(cell).map(|link| link.kind()) {
                Some(LinkKind::Snake) => hex(0xFFB3B3),
                Some(LinkKind::Ladder) => hex(0xB3FFB3),
                None => hex(CELL_COLORS[((row + col) % 2) as usize]),
            };
            draw.rect()
                .x_y(x, y)
                .w_h(cell_size, cell_size)
                .color(fill)
                .stroke(hex(0x557A95))
                .stroke_weight(1.0);
            draw.text(&cell.to_string())
                .x_y(x, y + cell_size / 4.0)
                .font_size(10)
                .color(hex(0x2E4F4F));
        }
    }

    // Ladders first so snakes are drawn on top
    for link in board.ladders().into_iter().chain(board.snakes()) {
        let (Some(from), Some(to)) = (
            cell_center(&board_rect, cell_size, link.from()),
            cell_center(&board_rect, cell_size, link.to()),
        ) else {
            continue;
        };
        let (color, weight) = match link.kind() {
            LinkKind::Snake => (hex(0xC0392B), 5.0),
            LinkKind::Ladder => (hex(0x8B5A2B), 3.0),
        };
        draw.line()
            .start(pt2(from.0, from.1))
            .end(pt2(to.0, to.1))
            .weight(weight)
            .color(color);
    }

    // Tokens
    for (seat, &cell) in model.session.token_cells().iter().enumerate() {
        let Some((x, y)) = cell_center(&board_rect, cell_size, cell) else {
            continue;
        };
        let offset = (seat as f32 - 1.0) * 12.0;
        draw.ellipse()
            .x_y(x, y - offset)
            .w_h(16.0, 16.0)
            .color(hex(TOKEN_COLORS[seat % TOKEN_COLORS.len()]))
            .stroke(BLACK)
            .stroke_weight(2.0);
    }

    // Panel
    let text_w = panel_rect.w() - 20.0;
    let x = panel_rect.x();
    let mut y = panel_rect.top() - 30.0;

    let roll = model.session.last_roll().unwrap_or(0);
    draw.text(&format!("Roll: {}", roll))
        .x_y(x, y)
        .w(text_w)
        .font_size(24)
        .color(hex(0x496D89));
    y -= 40.0;

    draw.text(&model.status)
        .x_y(x, y)
        .w(text_w)
        .font_size(14)
        .color(hex(0x006400));
    y -= 40.0;

    if model.session.phase() == TurnPhase::NotStarted {
        draw.text(&format!("Players: {}", model.requested))
            .x_y(x, y)
            .w(text_w)
            .font_size(14)
            .color(BLACK);
    } else if let Ok(positions) = model.session.engine().positions() {
        for (seat, position) in positions.iter().enumerate() {
            draw.ellipse()
                .x_y(panel_rect.left() + 20.0, y)
                .w_h(12.0, 12.0)
                .color(hex(TOKEN_COLORS[seat % TOKEN_COLORS.len()]));
            draw.text(&format!("{}: {}", player_name(model, seat), position))
                .x_y(x + 10.0, y)
                .w(text_w - 20.0)
                .font_size(13)
                .left_justify()
                .color(BLACK);
            y -= 20.0;
        }
    }
    y -= 30.0;

    draw.text("History")
        .x_y(x, y)
        .w(text_w)
        .font_size(16)
        .color(BLACK);
    y -= 24.0;

    for record in model.session.engine().history_snapshot() {
        draw.text(&record.to_string())
            .x_y(x, y)
            .w(text_w)
            .font_size(11)
            .left_justify()
            .color(hex(0x2E4F4F));
        y -= 18.0;
    }

    let help = if model.session.phase() == TurnPhase::NotStarted {
        "1-4: players   Enter: start"
    } else if model.session.is_busy() {
        "R: reset"
    } else {
        "Space: roll   R: reset"
    };
    draw.text(help)
        .x_y(x, panel_rect.bottom() + 20.0)
        .w(text_w)
        .font_size(12)
        .color(hex(0x557A95));

    // Winner banner
    if let Some(winner) = &model.winner {
        let (background, accent) = match model.celebration {
            Some(frame) => (
                hex(CELEBRATION_COLORS[frame as usize % CELEBRATION_COLORS.len()]),
                hex(CELEBRATION_COLORS[(frame as usize + 2) % CELEBRATION_COLORS.len()]),
            ),
            None => (hex(0xFFFAF0), hex(0x5CAB7D)),
        };
        draw.rect()
            .x_y(board_rect.x(), board_rect.y())
            .w_h(300.0, 150.0)
            .color(background)
            .stroke(accent)
            .stroke_weight(6.0);
        draw.text(&format!("Congratulations, {}!", winner))
            .x_y(board_rect.x(), board_rect.y() + 20.0)
            .w(280.0)
            .font_size(18)
            .color(hex(0x2E8B57));
        draw.text("Press R for a new game")
            .x_y(board_rect.x(), board_rect.y() - 30.0)
            .w(280.0)
            .font_size(12)
            .color(BLACK);
    }

    draw.to_frame(app, &frame).unwrap();
}
