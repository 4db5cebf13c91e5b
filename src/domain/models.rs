use serde::Deserialize;
use serde_json::Value;

use crate::rating::{PlayerAttrs, TournamentOptions};

/// A tournament file: optional event details, the players, then the games.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentInput {
    #[serde(flatten)]
    pub options: TournamentOptions,
    #[serde(default)]
    pub players: Vec<PlayerInput>,
    #[serde(default)]
    pub results: Vec<ResultInput>,
}

/// Player entry
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInput {
    pub num: Value,
    #[serde(flatten)]
    pub attrs: PlayerAttrs,
}

/// One game, scored from `player`'s side
#[derive(Debug, Clone, Deserialize)]
pub struct ResultInput {
    pub round: Value,
    pub player: Value,
    pub opponent: Value,
    pub score: Value,
}
