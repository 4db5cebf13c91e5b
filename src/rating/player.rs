use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use super::input;
use super::kfactor::{IcuKFactorRule, KFactorRequest, KFactorRule};
use super::result::RatedResult;
use super::types::{PlayerNumber, PlayerType, RatingMap, RatingMode, RatingValue};
use crate::errors::{RatingError, Result};

const BONUS_CEILING: f64 = 2100.0;

/// A K-factor given directly, or the facts needed to derive one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KFactorInput {
    Request {
        #[serde(default)]
        dob: Option<Value>,
        #[serde(default)]
        joined: Option<Value>,
    },
    Value(Value),
}

/// Optional player attributes. Which of `rating`, `kfactor` and `games` are
/// present decides the kind of player.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlayerAttrs {
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub kfactor: Option<KFactorInput>,
    #[serde(default)]
    pub games: Option<Value>,
    #[serde(default)]
    pub desc: Option<Value>,
}

impl PlayerAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rating(mut self, rating: impl Into<Value>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn kfactor(mut self, kfactor: impl Into<Value>) -> Self {
        self.kfactor = Some(KFactorInput::Value(kfactor.into()));
        self
    }

    /// Derive the K-factor from date of birth and date joined.
    pub fn kfactor_from(mut self, dob: impl Into<Value>, joined: impl Into<Value>) -> Self {
        self.kfactor = Some(KFactorInput::Request {
            dob: Some(dob.into()),
            joined: Some(joined.into()),
        });
        self
    }

    pub fn games(mut self, games: impl Into<Value>) -> Self {
        self.games = Some(games.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<Value>) -> Self {
        self.desc = Some(desc.into());
        self
    }
}

/// State only rated players carry.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedState {
    pub rating: RatingValue,
    pub kfactor: f64,
    bonus: f64,
    bonus_rating: Option<RatingValue>,
    pb_rating: Option<RatingValue>,
    pb_performance: Option<RatingValue>,
}

impl RatedState {
    fn new(rating: RatingValue, kfactor: f64) -> Self {
        Self {
            rating,
            kfactor,
            bonus: 0.0,
            bonus_rating: None,
            pb_rating: None,
            pb_performance: None,
        }
    }

    fn reset(&mut self) {
        self.bonus = 0.0;
        self.bonus_rating = None;
        self.pb_rating = None;
        self.pb_performance = None;
    }

    fn has_bonus(&self) -> bool {
        self.bonus > 0.0
    }

    /// Intermediate values are rounded where the historical system rounded
    /// them, so bonuses agree with the rating database to the point.
    fn calculate_bonus(
        &mut self,
        change: f64,
        games: usize,
        performance: Option<RatingValue>,
    ) -> bool {
        if self.kfactor <= 24.0 || games <= 4 || self.rating >= BONUS_CEILING {
            return false;
        }
        self.pb_rating = Some((self.rating + change).round());
        self.pb_performance = performance.map(f64::round);

        if change <= 35.0 || self.rating + change >= BONUS_CEILING {
            return false;
        }
        let threshold = 32.0 + 3.0 * (games as f64 - 4.0);
        let mut bonus = (change - threshold).round();
        if bonus <= 0.0 {
            return false;
        }
        if self.kfactor >= 40.0 {
            bonus = (1.25 * bonus).round();
        }
        for ceiling in [Some(BONUS_CEILING), performance].into_iter().flatten() {
            if self.rating + change + bonus >= ceiling {
                bonus = (ceiling - self.rating - change).round();
            }
        }
        if bonus <= 0.0 {
            return false;
        }
        self.bonus = bonus;
        self.bonus_rating = Some(self.rating + change + bonus);
        true
    }
}

/// The four kinds of player. Attribute combinations outside these cannot
/// be built.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerKind {
    Rated(RatedState),
    Provisional { rating: RatingValue, games: u32 },
    Unrated,
    Foreign { rating: RatingValue },
}

#[derive(Debug, Clone)]
pub struct Player {
    num: PlayerNumber,
    kind: PlayerKind,
    desc: Option<Value>,
    results: Vec<RatedResult>,
    performance: Option<RatingValue>,
    estimated_performance: Option<RatingValue>,
}

pub(crate) fn parse_num(num: &Value) -> Result<PlayerNumber> {
    let invalid = || RatingError::InvalidPlayerNumber(input::describe(num));
    let parsed = input::to_integer(num).unwrap_or(0);
    if parsed == 0 && !input::starts_with_digit(num) {
        return Err(invalid());
    }
    Ok(parsed)
}

fn parse_rating(rating: &Value) -> Result<RatingValue> {
    let parsed = input::to_float(rating).unwrap_or(0.0);
    if parsed == 0.0 && !input::starts_with_digit(rating) {
        return Err(RatingError::InvalidRating(input::describe(rating)));
    }
    Ok(parsed)
}

fn parse_kfactor(kfactor: &Value) -> Result<f64> {
    match input::to_float(kfactor) {
        Some(k) if k > 0.0 => Ok(k),
        _ => Err(RatingError::InvalidKFactor(input::describe(kfactor))),
    }
}

fn parse_games(games: &Value) -> Result<u32> {
    match input::to_integer(games) {
        Some(g) if (1..20).contains(&g) => Ok(g as u32),
        _ => Err(RatingError::InvalidGames(input::describe(games))),
    }
}

/// JSON null counts as not given.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

impl Player {
    /// Build a stand-alone player. K-factor requests need a tournament
    /// start date, so they fail here with `MissingKFactorInput`.
    pub fn new(num: impl Into<Value>, attrs: PlayerAttrs) -> Result<Self> {
        Self::build(&num.into(), attrs, &IcuKFactorRule, None)
    }

    pub(crate) fn build(
        num: &Value,
        attrs: PlayerAttrs,
        rule: &dyn KFactorRule,
        start: Option<NaiveDate>,
    ) -> Result<Self> {
        let num = parse_num(num)?;
        let rating = present(attrs.rating.as_ref()).map(parse_rating).transpose()?;
        let kfactor = match attrs.kfactor {
            None => None,
            Some(KFactorInput::Value(value)) => present(Some(&value)).map(parse_kfactor).transpose()?,
            Some(KFactorInput::Request { dob, joined }) => Some(rule.kfactor(&KFactorRequest {
                rating,
                start,
                dob,
                joined,
            })?),
        };
        let games = present(attrs.games.as_ref()).map(parse_games).transpose()?;

        let kind = match (rating, kfactor, games) {
            (Some(rating), Some(kfactor), None) => PlayerKind::Rated(RatedState::new(rating, kfactor)),
            (Some(rating), None, Some(games)) => PlayerKind::Provisional { rating, games },
            (Some(rating), None, None) => PlayerKind::Foreign { rating },
            (None, None, None) => PlayerKind::Unrated,
            _ => return Err(RatingError::InvalidPlayerCombination),
        };

        Ok(Self {
            num,
            kind,
            desc: present(attrs.desc.as_ref()).cloned(),
            results: Vec::new(),
            performance: None,
            estimated_performance: None,
        })
    }

    pub fn num(&self) -> PlayerNumber {
        self.num
    }

    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    pub fn player_type(&self) -> PlayerType {
        match self.kind {
            PlayerKind::Rated(_) => PlayerType::Rated,
            PlayerKind::Provisional { .. } => PlayerType::Provisional,
            PlayerKind::Unrated => PlayerType::Unrated,
            PlayerKind::Foreign { .. } => PlayerType::Foreign,
        }
    }

    /// Rated and foreign players have a rating that stands on its own.
    pub fn is_full_rating(&self) -> bool {
        matches!(self.kind, PlayerKind::Rated(_) | PlayerKind::Foreign { .. })
    }

    pub fn rating(&self) -> Option<RatingValue> {
        match &self.kind {
            PlayerKind::Rated(state) => Some(state.rating),
            PlayerKind::Provisional { rating, .. } | PlayerKind::Foreign { rating } => Some(*rating),
            PlayerKind::Unrated => None,
        }
    }

    pub fn kfactor(&self) -> Option<f64> {
        match &self.kind {
            PlayerKind::Rated(state) => Some(state.kfactor),
            _ => None,
        }
    }

    pub fn games(&self) -> Option<u32> {
        match self.kind {
            PlayerKind::Provisional { games, .. } => Some(games),
            _ => None,
        }
    }

    /// Bonus awarded by the last rating; `None` for players who cannot get one.
    pub fn bonus(&self) -> Option<f64> {
        match &self.kind {
            PlayerKind::Rated(state) => Some(state.bonus),
            _ => None,
        }
    }

    /// Rounded rating before any bonus, recorded when a bonus was considered.
    pub fn pb_rating(&self) -> Option<RatingValue> {
        match &self.kind {
            PlayerKind::Rated(state) => state.pb_rating,
            _ => None,
        }
    }

    /// Rounded performance before any bonus, recorded when a bonus was considered.
    pub fn pb_performance(&self) -> Option<RatingValue> {
        match &self.kind {
            PlayerKind::Rated(state) => state.pb_performance,
            _ => None,
        }
    }

    pub fn desc(&self) -> Option<&Value> {
        self.desc.as_ref()
    }

    pub fn set_desc(&mut self, desc: impl Into<Value>) {
        self.desc = Some(desc.into());
    }

    /// Results in round order.
    pub fn results(&self) -> &[RatedResult] {
        &self.results
    }

    pub fn score(&self) -> f64 {
        self.results.iter().map(RatedResult::score).sum()
    }

    pub fn expected_score(&self) -> f64 {
        self.results.iter().filter_map(RatedResult::expected_score).sum()
    }

    pub fn rating_change(&self) -> f64 {
        self.results.iter().filter_map(RatedResult::rating_change).sum()
    }

    /// Tournament performance rating; for provisional players it includes
    /// their previous games.
    pub fn performance(&self) -> Option<RatingValue> {
        self.performance
    }

    pub fn new_rating(&self) -> Option<RatingValue> {
        self.new_rating_in(RatingMode::Current)
    }

    /// `None` for provisional and unrated players who could not be rated.
    pub fn new_rating_in(&self, mode: RatingMode) -> Option<RatingValue> {
        match &self.kind {
            PlayerKind::Rated(state) => Some(match mode {
                RatingMode::Start => state.rating,
                RatingMode::Opponent => state.bonus_rating.unwrap_or(state.rating),
                RatingMode::Current => state.rating + self.rating_change() + state.bonus,
            }),
            PlayerKind::Foreign { rating } => Some(*rating),
            PlayerKind::Provisional { .. } | PlayerKind::Unrated => self.performance,
        }
    }

    /// Whether `result` may be added: `Ok(false)` if it is already held.
    pub(crate) fn check_result(&self, result: &RatedResult) -> Result<bool> {
        if result.opponent() == self.num {
            return Err(RatingError::SelfPlay);
        }
        match self.results.iter().find(|r| r.round() == result.round()) {
            Some(existing) if existing == result => Ok(false),
            Some(existing) => Err(RatingError::InconsistentResult(existing.round())),
            None => Ok(true),
        }
    }

    /// Adding the same result twice is a no-op; a different result in an
    /// occupied round is an error.
    pub fn add_result(&mut self, result: RatedResult) -> Result<()> {
        if self.check_result(&result)? {
            let at = self.results.partition_point(|r| r.round() < result.round());
            self.results.insert(at, result);
        }
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.performance = None;
        self.estimated_performance = None;
        if let PlayerKind::Rated(state) = &mut self.kind {
            state.reset();
        }
        self.results.iter_mut().for_each(RatedResult::reset);
    }

    /// The rating this player's own expected scores are computed from.
    fn own_rating(&self) -> Option<RatingValue> {
        if self.is_full_rating() {
            self.rating()
        } else {
            self.performance
        }
    }

    /// Average of opponents' ratings adjusted by ±400 per game, blended
    /// with prior games for provisional players. Opponents without a usable
    /// rating are skipped. Only the estimate is updated.
    pub fn estimate_performance(&mut self, ratings: &RatingMap) {
        let (games, total) = self
            .results
            .iter()
            .filter_map(|r| {
                let opponent = ratings.get(&r.opponent()).copied().flatten()?;
                Some(opponent + (2.0 * r.score() - 1.0) * 400.0)
            })
            .fold((0usize, 0.0), |(games, total), perf| (games + 1, total + perf));

        if games > 0 {
            let (old_games, old_performance) = match self.kind {
                PlayerKind::Provisional { rating, games: prior } => (prior as f64, prior as f64 * rating),
                _ => (0.0, 0.0),
            };
            self.estimated_performance =
                Some((total + old_performance) / (games as f64 + old_games));
        }
    }

    /// Adopt the latest estimate. Returns whether the performance was
    /// already stable to within `threshold` beforehand.
    pub fn update_performance(&mut self, threshold: f64) -> bool {
        let stable = match (self.performance, self.estimated_performance) {
            (Some(current), Some(estimate)) => (current - estimate).abs() < threshold,
            (None, None) => true,
            _ => false,
        };
        if self.estimated_performance.is_some() {
            self.performance = self.estimated_performance;
        }
        stable
    }

    /// Compute expected scores and rating changes for every result. With
    /// `update_bonus`, a bonus already awarded is carried onto the new
    /// rating change.
    pub fn rate(&mut self, ratings: &RatingMap, update_bonus: bool) {
        let own = self.own_rating();
        let kfactor = self.kfactor();
        for result in &mut self.results {
            let opponent = ratings.get(&result.opponent()).copied().flatten();
            result.rate(own, kfactor, opponent);
        }

        if update_bonus {
            let change = self.rating_change();
            if let PlayerKind::Rated(state) = &mut self.kind {
                if state.has_bonus() {
                    state.bonus_rating = Some(state.rating + state.bonus + change);
                }
            }
        }
    }

    /// Award a bonus to a rated player with an exceptional result. Returns
    /// whether one was awarded. With `allow_new_bonus` unset only players
    /// already holding a bonus are reconsidered.
    pub fn calculate_bonus(&mut self, allow_new_bonus: bool) -> bool {
        let change = self.rating_change();
        let games = self.results.len();
        let performance = self.performance;
        let num = self.num;

        let PlayerKind::Rated(state) = &mut self.kind else {
            return false;
        };
        if !allow_new_bonus && !state.has_bonus() {
            return false;
        }
        let granted = state.calculate_bonus(change, games, performance);
        if granted {
            debug!("Player {} awarded a bonus of {}", num, state.bonus);
        }
        granted
    }
}
