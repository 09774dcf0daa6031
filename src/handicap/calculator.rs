use super::errors::HandicapError;
use super::types::{Handicap, HandicapChange, RuleLevel, Score, ScoringRules};

/// Applies a score to a handicap using a game type's rules.
///
/// Levels are tried in priority order and the first one whose condition the
/// score satisfies supplies the delta. A score outside every level is an error;
/// no default adjustment is assumed.
pub fn calculate_handicap(
    current: Handicap,
    score: Score,
    rules: &ScoringRules,
) -> Result<HandicapChange, HandicapError> {
    let level = select_level(score, rules).ok_or(HandicapError::NoMatchingLevel { score })?;
    Ok(HandicapChange::apply(current, level.adjustment))
}

pub fn select_level(score: Score, rules: &ScoringRules) -> Option<&RuleLevel> {
    rules
        .levels()
        .iter()
        .find(|level| level.condition.matches(score))
}
