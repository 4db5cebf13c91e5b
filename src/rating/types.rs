use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use super::input;
use crate::errors::{RatingError, Result};

pub type PlayerNumber = i64;
pub type RatingValue = f64;

/// Each player's rating as seen by an opponent, `None` while unknown.
pub type RatingMap = BTreeMap<PlayerNumber, Option<RatingValue>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    Rated,
    Provisional,
    Unrated,
    Foreign,
}

impl PlayerType {
    pub fn as_str(&self) -> &str {
        match self {
            PlayerType::Rated => "rated",
            PlayerType::Provisional => "provisional",
            PlayerType::Unrated => "unrated",
            PlayerType::Foreign => "foreign",
        }
    }
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which of a player's ratings to report from `Player::new_rating_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingMode {
    /// The rating brought into the tournament.
    Start,
    /// The rating opponents are measured against (bonus-adjusted if any).
    Opponent,
    /// The rating after the tournament.
    #[default]
    Current,
}

/// Outcome of one game from one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Win,
    Draw,
    Loss,
}

impl Score {
    /// Parse the usual spellings: `W w 1 1.0 +`, `D d ½ = 0.5`, `L l 0 0.0 -`.
    pub fn parse(value: &Value) -> Result<Self> {
        let invalid = || RatingError::InvalidScore(input::describe(value));
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(x) if x == 1.0 => Ok(Score::Win),
                Some(x) if x == 0.5 => Ok(Score::Draw),
                Some(x) if x == 0.0 => Ok(Score::Loss),
                _ => Err(invalid()),
            },
            Value::String(s) => match s.trim() {
                "1.0" | "1" | "+" | "W" | "w" => Ok(Score::Win),
                "0.5" | "½" | "=" | "D" | "d" => Ok(Score::Draw),
                "0.0" | "0" | "-" | "L" | "l" => Ok(Score::Loss),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Score::Win => 1.0,
            Score::Draw => 0.5,
            Score::Loss => 0.0,
        }
    }

    /// The same game seen from the other side of the board.
    pub fn reversed(&self) -> Self {
        match self {
            Score::Win => Score::Loss,
            Score::Draw => Score::Draw,
            Score::Loss => Score::Win,
        }
    }
}
