use std::fmt::Display;

use crate::snakes_ladders::grid::LAST_CELL;

/// How a single roll played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain advance by the rolled amount.
    Advanced,
    /// Climbed a ladder after the advance.
    Ascended,
    /// Slid down a snake after the advance.
    Descended,
    /// Roll would have passed the last cell, token stayed put.
    Overshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    player: String,
    seat: usize,
    roll: u8,
    start: u8,
    end: u8,
    kind: MoveKind,
}

impl MoveRecord {
    pub fn new(player: impl Into<String>, seat: usize, roll: u8, start: u8, end: u8) -> Self {
        let raw = start as u16 + roll as u16;
        let kind = if raw > LAST_CELL as u16 {
            MoveKind::Overshot
        } else if (end as u16) < raw {
            MoveKind::Descended
        } else if (end as u16) > raw {
            MoveKind::Ascended
        } else {
            MoveKind::Advanced
        };
        MoveRecord { player: player.into(), seat, roll, start, end, kind }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn roll(&self) -> u8 {
        self.roll
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The cell reached by the roll alone, before any snake or ladder.
    /// `None` when the roll overshot.
    pub fn linear_target(&self) -> Option<u8> {
        match self.kind {
            MoveKind::Overshot => None,
            _ => Some(self.start + self.roll),
        }
    }

    pub fn redirected(&self) -> bool {
        matches!(self.kind, MoveKind::Ascended | MoveKind::Descended)
    }
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rolled {} and moved from {} to {}", self.player, self.roll, self.start, self.end)
    }
}
