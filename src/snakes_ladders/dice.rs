use std::fmt::Debug;

use rand::Rng;

use crate::error::GameError;

/// A single six-sided die value, always in 1..=6.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    value: u8,
}

impl Die {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Die { value })
        } else {
            Err(GameError::InvalidRoll(value))
        }
    }

    pub fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Die { value: rng.random_range(Self::MIN..=Self::MAX) }
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

impl Debug for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Die({})", self.value)
    }
}
