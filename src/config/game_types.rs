use rust_decimal::Decimal;

use crate::handicap::RuleTable;

/// Game type seeded into a fresh database
///
/// Results are in tenths of a stroke, so `-20` is a 2.0 reduction.
#[derive(Debug, Clone)]
pub struct GameTypeConfig {
    pub name: &'static str,
    pub best: i32,
    pub second: (i32, i32),
    pub third: (i32, i32),
    pub worst: i32,
    pub results_tenths: [i64; 4],
}

impl GameTypeConfig {
    pub fn rule_table(&self) -> RuleTable {
        let [r1, r2, r3, r4] = self.results_tenths.map(|tenths| Decimal::new(tenths, 1));

        RuleTable {
            level_1: self.best,
            level_1_result: r1,
            level_2_min: self.second.0,
            level_2_max: self.second.1,
            level_2_result: r2,
            level_3_min: self.third.0,
            level_3_max: self.third.1,
            level_3_result: r3,
            level_4: self.worst,
            level_4_result: r4,
        }
    }
}

/// The game types a club starts with
pub fn default_game_types() -> Vec<GameTypeConfig> {
    vec![
        GameTypeConfig {
            name: "Stroke",
            best: 69,
            second: (70, 71),
            third: (72, 73),
            worst: 74,
            results_tenths: [-20, -10, -5, 3],
        },
        GameTypeConfig {
            name: "Stableford",
            best: 41,
            second: (39, 40),
            third: (37, 38),
            worst: 36,
            results_tenths: [-20, -10, -5, 3],
        },
    ]
}
