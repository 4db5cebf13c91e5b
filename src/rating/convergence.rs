use std::collections::BTreeMap;

use log::{debug, warn};

use super::player::Player;
use super::types::{PlayerNumber, RatingMap, RatingMode};
use crate::errors::{RatingError, Result};

pub type PlayerMap = BTreeMap<PlayerNumber, Player>;

/// Ratings every player presents to its opponents right now.
pub fn opponent_ratings(players: &PlayerMap) -> RatingMap {
    players
        .iter()
        .map(|(&num, player)| (num, player.new_rating_in(RatingMode::Opponent)))
        .collect()
}

fn should_continue(stable: bool, iteration: usize, max_iterations: usize) -> bool {
    !stable && iteration < max_iterations
}

/// Re-estimate every performance until none moves by `threshold` or more.
///
/// Each sweep estimates all players against the same snapshot before any
/// performance is replaced. Returns the number of sweeps. With a budget of
/// more than one sweep, failing to settle is an error.
pub fn iterate_performances(
    players: &mut PlayerMap,
    max_iterations: usize,
    threshold: f64,
) -> Result<usize> {
    let mut stable = false;
    let mut iteration = 0;

    while should_continue(stable, iteration, max_iterations) {
        let ratings = opponent_ratings(players);
        for player in players.values_mut() {
            player.estimate_performance(&ratings);
        }
        stable = players
            .values_mut()
            .fold(true, |ok, player| player.update_performance(threshold) && ok);
        iteration += 1;
        debug!("Performance sweep {} (stable: {})", iteration, stable);
    }

    if max_iterations > 1 && !stable {
        warn!("Performance estimation still moving after {} sweeps", iteration);
        return Err(RatingError::NonConvergence(iteration));
    }
    Ok(iteration)
}
