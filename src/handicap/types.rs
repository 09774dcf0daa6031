use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::errors::RulesError;

pub type Score = i32;
pub type Handicap = Decimal;

/// Which scores a rule level applies to. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCondition {
    AtMost(Score),
    AtLeast(Score),
    Between { min: Score, max: Score },
}

impl ScoreCondition {
    pub fn matches(&self, score: Score) -> bool {
        match *self {
            ScoreCondition::AtMost(limit) => score <= limit,
            ScoreCondition::AtLeast(limit) => score >= limit,
            ScoreCondition::Between { min, max } => (min..=max).contains(&score),
        }
    }

    /// Inclusive lower and upper bound, `None` meaning unbounded.
    fn span(&self) -> (Option<Score>, Option<Score>) {
        match *self {
            ScoreCondition::AtMost(limit) => (None, Some(limit)),
            ScoreCondition::AtLeast(limit) => (Some(limit), None),
            ScoreCondition::Between { min, max } => (Some(min), Some(max)),
        }
    }

    fn is_below(&self, other: &ScoreCondition) -> bool {
        match (self.span().1, other.span().0) {
            (Some(high), Some(low)) => high < low,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLevel {
    pub condition: ScoreCondition,
    pub adjustment: Decimal,
}

impl RuleLevel {
    pub fn new(condition: ScoreCondition, adjustment: Decimal) -> Self {
        Self {
            condition,
            adjustment,
        }
    }
}

/// Rule levels in priority order, most exceptional result first.
///
/// Construction guarantees the levels are disjoint and sit in monotonic
/// score order, so at most one of them matches any score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    levels: Vec<RuleLevel>,
}

impl ScoringRules {
    pub fn new(levels: Vec<RuleLevel>) -> Result<Self, RulesError> {
        validate_levels(&levels)?;
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[RuleLevel] {
        &self.levels
    }
}

fn validate_levels(levels: &[RuleLevel]) -> Result<(), RulesError> {
    if levels.is_empty() {
        return Err(RulesError::NoLevels);
    }

    for (idx, level) in levels.iter().enumerate() {
        if let ScoreCondition::Between { min, max } = level.condition {
            if min > max {
                return Err(RulesError::EmptyRange {
                    level: idx + 1,
                    min,
                    max,
                });
            }
        }
    }

    check_disjoint(levels)?;
    check_monotonic(levels)
}

fn check_disjoint(levels: &[RuleLevel]) -> Result<(), RulesError> {
    for (i, first) in levels.iter().enumerate() {
        for (j, second) in levels.iter().enumerate().skip(i + 1) {
            let separated = first.condition.is_below(&second.condition)
                || second.condition.is_below(&first.condition);
            if !separated {
                return Err(RulesError::Overlapping {
                    first: i + 1,
                    second: j + 1,
                });
            }
        }
    }
    Ok(())
}

fn check_monotonic(levels: &[RuleLevel]) -> Result<(), RulesError> {
    let pairs = || levels.windows(2).map(|w| (&w[0].condition, &w[1].condition));
    let ascending = pairs().all(|(a, b)| a.is_below(b));
    let descending = pairs().all(|(a, b)| b.is_below(a));

    if ascending || descending {
        Ok(())
    } else {
        Err(RulesError::Misordered)
    }
}

/// Outcome of applying one score to a handicap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandicapChange {
    pub new_handicap: Handicap,
    pub delta: Decimal,
}

impl HandicapChange {
    pub fn apply(current: Handicap, delta: Decimal) -> Self {
        Self {
            new_handicap: current + delta,
            delta,
        }
    }
}

/// Whole-number handicap used on the course, rounding half to even.
pub fn playing_handicap(handicap: Handicap) -> i64 {
    handicap
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .unwrap_or_default()
}
