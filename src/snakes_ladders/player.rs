use crate::snakes_ladders::grid::FIRST_CELL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    position: u8,
    seat: usize,
    is_computer: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, seat: usize, is_computer: bool) -> Self {
        Player {
            name: name.into(),
            position: FIRST_CELL,
            seat,
            is_computer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn is_computer(&self) -> bool {
        self.is_computer
    }

    pub(crate) fn set_position(&mut self, position: u8) {
        self.position = position;
    }
}
