mod board;
pub use board::Board;
pub use board::{CLASSIC_LADDERS, CLASSIC_SNAKES};

pub mod grid;
pub use grid::GridPosition;

mod link;
pub use link::{Link, LinkKind};

mod player;
pub use player::Player;

mod dice;
pub use dice::Die;

mod move_record;
pub use move_record::{MoveKind, MoveRecord};

mod state;
pub use state::{GameOutcome, GameState, MAX_SEATS, MIN_SEATS};

mod path;
pub use path::{MovePath, PathStep, Stage};
