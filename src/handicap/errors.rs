use thiserror::Error;

use super::types::Score;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandicapError {
    #[error("no scoring level matches a score of {score}")]
    NoMatchingLevel { score: Score },
}

/// Problems with a game type's scoring table.
///
/// Levels are numbered from 1 in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("a scoring table needs at least one level")]
    NoLevels,
    #[error("level {level} has an empty range ({min} > {max})")]
    EmptyRange { level: usize, min: Score, max: Score },
    #[error("levels {first} and {second} both match some scores")]
    Overlapping { first: usize, second: usize },
    #[error("levels are not ordered by score")]
    Misordered,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    #[error("grade boundaries must be strictly ascending (boundary {position} is out of order)")]
    NotAscending { position: usize },
    #[error("at most {max} grade boundaries are supported, got {count}")]
    TooMany { count: usize, max: usize },
}
