use chrono::NaiveDate;
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use super::convergence::{PlayerMap, iterate_performances, opponent_ratings};
use super::kfactor::{IcuKFactorRule, KFactorRule};
use super::player::{Player, PlayerAttrs, parse_num};
use super::result::{PlayerRef, RatedResult, parse_round};
use super::types::{PlayerNumber, Score};
use crate::config::settings::RatingSettings;
use crate::errors::{RatingError, Result};
use crate::util::dates::{DateInput, parse_date};

/// Optional tournament attributes, as accepted by [`Tournament::with_options`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TournamentOptions {
    #[serde(default)]
    pub desc: Option<Value>,
    #[serde(default)]
    pub start: Option<Value>,
    #[serde(default)]
    pub no_bonuses: bool,
}

/// One event's players and results, and the rating calculation over them.
///
/// Add players, then results, then call [`Tournament::rate`]; new ratings
/// are read back from the players.
#[derive(Debug)]
pub struct Tournament {
    desc: Option<Value>,
    start: Option<NaiveDate>,
    no_bonuses: bool,
    players: PlayerMap,
    kfactor_rule: Box<dyn KFactorRule>,
    iterations1: usize,
    iterations2: usize,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    pub fn new() -> Self {
        Self {
            desc: None,
            start: None,
            no_bonuses: false,
            players: PlayerMap::new(),
            kfactor_rule: Box::new(IcuKFactorRule),
            iterations1: 0,
            iterations2: 0,
        }
    }

    pub fn with_options(options: TournamentOptions) -> Result<Self> {
        let mut tournament = Self::new();
        if let Some(desc) = options.desc.filter(|d| !d.is_null()) {
            tournament.set_desc(desc);
        }
        if let Some(start) = options.start.filter(|s| !s.is_null()) {
            tournament.set_start(&start)?;
        }
        tournament.set_no_bonuses(options.no_bonuses);
        Ok(tournament)
    }

    /// Use a different scheme for K-factors given as `{dob, joined}`.
    pub fn with_kfactor_rule(mut self, rule: impl KFactorRule + 'static) -> Self {
        self.kfactor_rule = Box::new(rule);
        self
    }

    pub fn desc(&self) -> Option<&Value> {
        self.desc.as_ref()
    }

    pub fn set_desc(&mut self, desc: impl Into<Value>) {
        self.desc = Some(desc.into());
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn set_start<D: DateInput + ?Sized>(&mut self, start: &D) -> Result<()> {
        self.start = Some(parse_date(start)?);
        Ok(())
    }

    pub fn no_bonuses(&self) -> bool {
        self.no_bonuses
    }

    pub fn set_no_bonuses(&mut self, no_bonuses: bool) {
        self.no_bonuses = no_bonuses;
    }

    /// Sweeps needed to settle performances before bonuses.
    pub fn iterations1(&self) -> usize {
        self.iterations1
    }

    /// Sweeps needed after bonuses; zero when no bonus was awarded.
    pub fn iterations2(&self) -> usize {
        self.iterations2
    }

    /// Players in ascending number order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player(&self, num: impl Into<PlayerRef>) -> Option<&Player> {
        let num = num.into().resolve().ok()?;
        self.players.get(&num)
    }

    pub fn add_player(&mut self, num: impl Into<Value>, attrs: PlayerAttrs) -> Result<&Player> {
        let num = num.into();
        let parsed = parse_num(&num)?;
        if self.players.contains_key(&parsed) {
            return Err(RatingError::DuplicatePlayer(parsed));
        }
        let player = Player::build(&num, attrs, self.kfactor_rule.as_ref(), self.start)?;
        Ok(&*self.players.entry(parsed).or_insert(player))
    }

    /// Record that `player` scored `score` against `opponent` in `round`.
    ///
    /// Both players receive their side of the game. Nothing is recorded
    /// unless both sides are acceptable.
    pub fn add_result(
        &mut self,
        round: impl Into<Value>,
        player: impl Into<PlayerRef>,
        opponent: impl Into<PlayerRef>,
        score: impl Into<Value>,
    ) -> Result<()> {
        let n1 = player.into().resolve()?;
        let n2 = opponent.into().resolve()?;
        let p1 = self.players.get(&n1).ok_or(RatingError::UnknownPlayer(n1))?;
        let p2 = self.players.get(&n2).ok_or(RatingError::UnknownPlayer(n2))?;

        let round = parse_round(&round.into())?;
        let score = Score::parse(&score.into())?;
        let r1 = RatedResult::between(round, n2, score);
        let r2 = RatedResult::between(round, n1, score.reversed());

        let add1 = p1.check_result(&r1)?;
        let add2 = p2.check_result(&r2)?;
        if add1 {
            self.player_mut(n1)?.add_result(r1)?;
        }
        if add2 {
            self.player_mut(n2)?.add_result(r2)?;
        }
        Ok(())
    }

    fn player_mut(&mut self, num: PlayerNumber) -> Result<&mut Player> {
        self.players.get_mut(&num).ok_or(RatingError::UnknownPlayer(num))
    }

    /// Rate with the default (legacy) settings.
    pub fn rate(&mut self) -> Result<()> {
        self.rate_with(&RatingSettings::default())
    }

    /// Phase 1 estimates performances and rates every game. Phase 2, unless
    /// bonuses are off, awards bonuses and re-rates against the
    /// bonus-adjusted ratings. Rating again without changes gives the same
    /// numbers.
    pub fn rate_with(&mut self, settings: &RatingSettings) -> Result<()> {
        info!("Rating {} players", self.players.len());

        self.players.values_mut().for_each(Player::reset);
        self.iterations1 = iterate_performances(
            &mut self.players,
            settings.max_iterations_phase1,
            settings.convergence_threshold,
        )?;
        info!("Phase 1 settled after {} iterations", self.iterations1);
        self.rate_players(false);

        if self.no_bonuses {
            self.iterations2 = 0;
            return Ok(());
        }

        let granted = self.calculate_bonuses(true);
        if granted == 0 {
            self.iterations2 = 0;
            return Ok(());
        }
        debug!("{} bonuses awarded", granted);

        self.rate_players(settings.refresh_bonus_ratings);
        self.iterations2 = iterate_performances(
            &mut self.players,
            settings.max_iterations_phase2,
            settings.convergence_threshold,
        )?;
        info!("Phase 2 settled after {} iterations", self.iterations2);

        if settings.allow_phase2_new_bonuses {
            self.calculate_bonuses(true);
        }
        Ok(())
    }

    fn rate_players(&mut self, update_bonus: bool) {
        let ratings = opponent_ratings(&self.players);
        for player in self.players.values_mut() {
            player.rate(&ratings, update_bonus);
        }
    }

    fn calculate_bonuses(&mut self, allow_new_bonus: bool) -> usize {
        self.players
            .values_mut()
            .map(|player| player.calculate_bonus(allow_new_bonus))
            .filter(|&granted| granted)
            .count()
    }
}
