use crate::game::board::DIMENSION;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    North,
    South,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::North => Player::South,
            Player::South => Player::North,
        }
    }

    // The two rows where this player may place pieces during setup
    pub fn home_lines(&self) -> RangeInclusive<usize> {
        match self {
            Player::North => 0..=1,
            Player::South => DIMENSION - 2..=DIMENSION - 1,
        }
    }

    pub(crate) fn idx(&self) -> usize {
        match self {
            Player::North => 0,
            Player::South => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::North => write!(f, "North"),
            Player::South => write!(f, "South"),
        }
    }
}
