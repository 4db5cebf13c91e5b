use serde_json::Value;

use super::input;
use super::player::Player;
use super::types::{PlayerNumber, RatingValue, Score};
use crate::errors::{RatingError, Result};

/// One player's side of one game.
///
/// Results are created in pairs by `Tournament::add_result`; each player
/// owns its own copy and refers to the opponent by number.
#[derive(Debug, Clone)]
pub struct RatedResult {
    round: u32,
    opponent: PlayerNumber,
    score: Score,
    expected_score: Option<f64>,
    rating_change: Option<f64>,
}

impl PartialEq for RatedResult {
    fn eq(&self, other: &Self) -> bool {
        self.round == other.round && self.opponent == other.opponent && self.score == other.score
    }
}

/// A reference to a player: either the player itself or its number, which
/// may arrive in any of the loose forms player numbers accept.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerRef {
    Number(PlayerNumber),
    Loose(Value),
}

impl PlayerRef {
    pub fn resolve(&self) -> Result<PlayerNumber> {
        match self {
            PlayerRef::Number(num) => Ok(*num),
            PlayerRef::Loose(value) => input::to_integer(value)
                .ok_or_else(|| RatingError::InvalidOpponent(input::describe(value))),
        }
    }
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        PlayerRef::Number(player.num())
    }
}

impl From<PlayerNumber> for PlayerRef {
    fn from(num: PlayerNumber) -> Self {
        PlayerRef::Number(num)
    }
}

impl From<i32> for PlayerRef {
    fn from(num: i32) -> Self {
        PlayerRef::Number(num.into())
    }
}

impl From<&str> for PlayerRef {
    fn from(num: &str) -> Self {
        PlayerRef::Loose(Value::from(num))
    }
}

impl From<String> for PlayerRef {
    fn from(num: String) -> Self {
        PlayerRef::Loose(Value::from(num))
    }
}

impl From<Value> for PlayerRef {
    fn from(value: Value) -> Self {
        PlayerRef::Loose(value)
    }
}

pub(crate) fn parse_round(round: &Value) -> Result<u32> {
    input::to_integer(round)
        .filter(|&r| r > 0)
        .and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| RatingError::InvalidRound(input::describe(round)))
}

impl RatedResult {
    /// Validate and build a result against `opponent`.
    pub fn new(
        round: impl Into<Value>,
        opponent: impl Into<PlayerRef>,
        score: impl Into<Value>,
    ) -> Result<Self> {
        let round = parse_round(&round.into())?;
        let opponent = opponent.into().resolve()?;
        let score = Score::parse(&score.into())?;
        Ok(Self::between(round, opponent, score))
    }

    pub(crate) fn between(round: u32, opponent: PlayerNumber, score: Score) -> Self {
        Self {
            round,
            opponent,
            score,
            expected_score: None,
            rating_change: None,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn opponent(&self) -> PlayerNumber {
        self.opponent
    }

    /// 1.0, 0.5 or 0.0.
    pub fn score(&self) -> f64 {
        self.score.points()
    }

    pub fn outcome(&self) -> Score {
        self.score
    }

    pub fn opponents_score(&self) -> f64 {
        1.0 - self.score()
    }

    /// Elo expectation against the opponent, once rated. `None` when either
    /// side had no usable rating.
    pub fn expected_score(&self) -> Option<f64> {
        self.expected_score
    }

    /// `(score - expected) * K`, only for rated owners.
    pub fn rating_change(&self) -> Option<f64> {
        self.rating_change
    }

    pub(crate) fn reset(&mut self) {
        self.expected_score = None;
        self.rating_change = None;
    }

    /// `kfactor` is `Some` only when the owner is a rated player.
    pub fn rate(
        &mut self,
        own_rating: Option<RatingValue>,
        kfactor: Option<f64>,
        opponent_rating: Option<RatingValue>,
    ) {
        let (Some(own), Some(opponent)) = (own_rating, opponent_rating) else {
            return;
        };
        let expected = 1.0 / (1.0 + 10f64.powf((opponent - own) / 400.0));
        self.expected_score = Some(expected);
        self.rating_change = kfactor.map(|k| (self.score() - expected) * k);
    }
}
