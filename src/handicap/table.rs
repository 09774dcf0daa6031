use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::RulesError;
use super::types::{RuleLevel, Score, ScoreCondition, ScoringRules};

/// Whether a game type rewards low scores (Stroke) or high scores (Stableford).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDirection {
    LowerIsBetter,
    HigherIsBetter,
}

/// The four-level scoring table an administrator fills in for a game type.
///
/// Level 1 is a threshold for the best results, levels 2 and 3 are inclusive
/// ranges, level 4 is a threshold for the poorest results. The direction of
/// both thresholds follows from comparing level 1 with level 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    pub level_1: Score,
    pub level_1_result: Decimal,
    pub level_2_min: Score,
    pub level_2_max: Score,
    pub level_2_result: Decimal,
    pub level_3_min: Score,
    pub level_3_max: Score,
    pub level_3_result: Decimal,
    pub level_4: Score,
    pub level_4_result: Decimal,
}

impl RuleTable {
    pub fn direction(&self) -> ScoreDirection {
        if self.level_1 < self.level_4 {
            ScoreDirection::LowerIsBetter
        } else {
            ScoreDirection::HigherIsBetter
        }
    }

    pub fn to_rules(&self) -> Result<ScoringRules, RulesError> {
        let (best, worst) = match self.direction() {
            ScoreDirection::LowerIsBetter => (
                ScoreCondition::AtMost(self.level_1),
                ScoreCondition::AtLeast(self.level_4),
            ),
            ScoreDirection::HigherIsBetter => (
                ScoreCondition::AtLeast(self.level_1),
                ScoreCondition::AtMost(self.level_4),
            ),
        };

        ScoringRules::new(vec![
            RuleLevel::new(best, self.level_1_result),
            RuleLevel::new(
                ScoreCondition::Between {
                    min: self.level_2_min,
                    max: self.level_2_max,
                },
                self.level_2_result,
            ),
            RuleLevel::new(
                ScoreCondition::Between {
                    min: self.level_3_min,
                    max: self.level_3_max,
                },
                self.level_3_result,
            ),
            RuleLevel::new(worst, self.level_4_result),
        ])
    }
}
