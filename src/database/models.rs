use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rusqlite::types::Type;

use crate::handicap::{Gradeable, Handicap, RuleTable};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub handicap: Decimal,
    pub latest_handicap_change: Option<Decimal>,
    pub latest_game: Option<NaiveDate>,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Gradeable for Player {
    fn handicap(&self) -> Handicap {
        self.handicap
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub handicap: Decimal,
}

#[derive(Debug, Clone)]
pub struct PlayerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub handicap: Decimal,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct GameType {
    pub id: i64,
    pub name: String,
    pub rules: RuleTable,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub id: i64,
    pub game_date: NaiveDate,
    pub game_type_id: i64,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct GameScore {
    pub id: i64,
    pub game_id: i64,
    pub player_id: i64,
    pub score: i32,
    pub handicap_change: Decimal,
}

// DTOs for joined queries
#[derive(Debug, Clone)]
pub struct GameSummaryRow {
    pub id: i64,
    pub game_date: NaiveDate,
    pub game_type_name: String,
    pub player_count: i64,
}

#[derive(Debug, Clone)]
pub struct ScoreHistoryRow {
    pub score_id: i64,
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub game_type_name: String,
    pub score: i32,
    pub handicap_change: Decimal,
}

/// Handicaps are stored as TEXT so they round-trip exactly.
pub(crate) fn decimal_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    parse_decimal(idx, &text)
}

pub(crate) fn optional_decimal_column(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<Decimal>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| parse_decimal(idx, &t)).transpose()
}

fn parse_decimal(idx: usize, text: &str) -> rusqlite::Result<Decimal> {
    text.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
