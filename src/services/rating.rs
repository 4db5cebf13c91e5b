use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::TournamentInput;
use crate::rating::{Player, Tournament};

pub struct RatingService {
    config: AppConfig,
}

impl RatingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Load, rate and render the tournament in `path`.
    pub fn run(&self, path: &Path, no_bonuses: bool) -> Result<String> {
        let input = self.load(path)?;
        let mut tournament = self.build(input)?;
        if no_bonuses {
            tournament.set_no_bonuses(true);
        }
        tournament
            .rate_with(&self.config.rating)
            .context("Failed to rate tournament")?;
        Ok(self.render(&tournament))
    }

    pub fn load(&self, path: &Path) -> Result<TournamentInput> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let input = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse tournament JSON in {}", path.display()))?;
        Ok(input)
    }

    pub fn build(&self, input: TournamentInput) -> Result<Tournament> {
        let mut tournament = Tournament::with_options(input.options)?;

        for player in input.players {
            let label = player.num.to_string();
            tournament
                .add_player(player.num, player.attrs)
                .with_context(|| format!("Invalid player {label}"))?;
        }
        for (i, result) in input.results.into_iter().enumerate() {
            tournament
                .add_result(result.round, result.player, result.opponent, result.score)
                .with_context(|| format!("Invalid result #{}", i + 1))?;
        }

        info!(
            "Loaded {} players from tournament {}",
            tournament.players().count(),
            tournament.desc().map(|d| d.to_string()).unwrap_or_default()
        );
        Ok(tournament)
    }

    pub fn render(&self, tournament: &Tournament) -> String {
        let decimals = self.config.output.decimals;
        let mut lines = Vec::new();

        if let Some(desc) = tournament.desc() {
            let title = desc.as_str().map_or_else(|| desc.to_string(), str::to_owned);
            lines.push(title.bold().to_string());
        }
        let header = format!(
            "{:>6} {:<12} {:>8} {:>6} {:>9} {:>8} {:>11} {:>10} {:>7}",
            "Num", "Type", "Rating", "Score", "Expected", "Change", "Performance", "New", "Bonus"
        );
        lines.push(header.cyan().bold().to_string());
        lines.extend(tournament.players().map(|player| self.render_player(player, decimals)));
        lines.push(format!(
            "Iterations: phase 1 {}, phase 2 {}",
            tournament.iterations1(),
            tournament.iterations2()
        ));
        lines.join("\n")
    }

    fn render_player(&self, player: &Player, decimals: usize) -> String {
        let change = format!("{:>8.*}", decimals, player.rating_change());
        let change = if player.rating_change() > 0.0 {
            change.green()
        } else if player.rating_change() < 0.0 {
            change.red()
        } else {
            change.normal()
        };
        let bonus = match player.bonus() {
            Some(bonus) if bonus > 0.0 => format!("{bonus:>7.0}").yellow(),
            other => format!("{:>7}", optional(other, 0)).normal(),
        };

        format!(
            "{:>6} {:<12} {:>8} {:>6.1} {:>9.3} {} {:>11} {:>10} {}",
            player.num(),
            player.player_type(),
            optional(player.rating(), decimals),
            player.score(),
            player.expected_score(),
            change,
            optional(player.performance(), decimals),
            optional(player.new_rating(), decimals),
            bonus
        )
    }
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}
