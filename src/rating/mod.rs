mod convergence;
pub mod input;
pub mod kfactor;
pub mod player;
pub mod result;
pub mod tournament;
pub mod types;

pub use convergence::{PlayerMap, iterate_performances, opponent_ratings};
pub use kfactor::{IcuKFactorRule, KFactorRequest, KFactorRule};
pub use player::{KFactorInput, Player, PlayerAttrs, PlayerKind, RatedState};
pub use result::{PlayerRef, RatedResult};
pub use tournament::{Tournament, TournamentOptions};
pub use types::{PlayerNumber, PlayerType, RatingMap, RatingMode, RatingValue, Score};
