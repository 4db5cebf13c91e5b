use thiserror::Error;

/// Every failure the rating engine can report.
///
/// Input values are carried as text so the message shows exactly what the
/// caller supplied, padding included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("invalid player num ({0})")]
    InvalidPlayerNumber(String),

    #[error("invalid player rating ({0})")]
    InvalidRating(String),

    #[error("invalid player k-factor ({0})")]
    InvalidKFactor(String),

    #[error("invalid number of games ({0})")]
    InvalidGames(String),

    #[error("invalid combination of player attributes")]
    InvalidPlayerCombination,

    #[error("invalid round number ({0})")]
    InvalidRound(String),

    #[error("invalid opponent ({0})")]
    InvalidOpponent(String),

    #[error("invalid score ({0})")]
    InvalidScore(String),

    #[error("invalid date ({0})")]
    InvalidDate(String),

    #[error("missing {0} for K-factor calculation")]
    MissingKFactorInput(&'static str),

    #[error("player with number {0} already exists")]
    DuplicatePlayer(i64),

    #[error("no such player number ({0})")]
    UnknownPlayer(i64),

    #[error("inconsistent result in round {0}")]
    InconsistentResult(u32),

    #[error("players cannot score results against themselves")]
    SelfPlay,

    #[error("performance rating estimation did not converge after {0} iterations")]
    NonConvergence(usize),
}

pub type Result<T> = std::result::Result<T, RatingError>;
