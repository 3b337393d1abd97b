use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Snake,
    Ladder,
}

/// A one-way redirect from `from` to `to`. Snakes point down the board, ladders up.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    from: u8,
    to: u8,
}

impl Link {
    pub const fn new(from: u8, to: u8) -> Self {
        Link { from, to }
    }

    pub fn from(&self) -> u8 {
        self.from
    }

    pub fn to(&self) -> u8 {
        self.to
    }

    pub fn kind(&self) -> LinkKind {
        if self.to < self.from {
            LinkKind::Snake
        } else {
            LinkKind::Ladder
        }
    }
}

impl Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            LinkKind::Snake => write!(f, "Snake({} -> {})", self.from, self.to),
            LinkKind::Ladder => write!(f, "Ladder({} -> {})", self.from, self.to),
        }
    }
}
