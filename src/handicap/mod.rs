pub mod calculator;
pub mod errors;
pub mod grading;
pub mod table;
pub mod types;

pub use calculator::calculate_handicap;
pub use errors::{GradeError, HandicapError, RulesError};
pub use grading::{grade_players, GradeBoundaries, GradeBucket, Gradeable};
pub use table::{RuleTable, ScoreDirection};
pub use types::{
    playing_handicap, Handicap, HandicapChange, RuleLevel, Score, ScoreCondition, ScoringRules,
};
