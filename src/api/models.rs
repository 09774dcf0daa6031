use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::{GameSummaryRow, GameType, Player, ScoreHistoryRow};
use crate::handicap::{playing_handicap, GradeBucket, RuleTable, ScoreDirection};
use crate::services::recording::{AppliedScore, RecordedGame};

// --- Requests ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayerRequest {
    pub first_name: String,
    pub last_name: String,
    pub handicap: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    pub first_name: String,
    pub last_name: String,
    pub handicap: Decimal,
    pub active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeRequest {
    pub name: String,
    pub rules: RuleTable,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntryRequest {
    pub player_id: i64,
    pub score: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGameRequest {
    pub game_date: NaiveDate,
    pub game_type_id: i64,
    pub scores: Vec<ScoreEntryRequest>,
}

#[derive(Deserialize)]
pub struct UpdateScoreRequest {
    pub score: i32,
}

#[derive(Deserialize)]
pub struct GradeConfigRequest {
    pub boundaries: Vec<Decimal>,
}

// --- Responses ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub handicap: Decimal,
    pub playing_handicap: i64,
    pub latest_game: Option<NaiveDate>,
    pub latest_handicap_change: Option<Decimal>,
    pub active: bool,
}

impl From<Player> for PlayerListItem {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.id,
            display_name: format!("{}, {}", player.last_name, player.first_name),
            playing_handicap: playing_handicap(player.handicap),
            first_name: player.first_name,
            last_name: player.last_name,
            handicap: player.handicap,
            latest_game: player.latest_game,
            latest_handicap_change: player.latest_handicap_change,
            active: player.active,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryItem {
    pub score_id: i64,
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub game_type: String,
    pub score: i32,
    pub handicap_change: Decimal,
}

impl From<ScoreHistoryRow> for ScoreHistoryItem {
    fn from(row: ScoreHistoryRow) -> Self {
        Self {
            score_id: row.score_id,
            game_id: row.game_id,
            game_date: row.game_date,
            game_type: row.game_type_name,
            score: row.score,
            handicap_change: row.handicap_change,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    pub player: PlayerListItem,
    pub history: Vec<ScoreHistoryItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListItem {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub game_type: String,
    pub player_count: i64,
}

impl From<GameSummaryRow> for GameListItem {
    fn from(row: GameSummaryRow) -> Self {
        Self {
            game_id: row.id,
            game_date: row.game_date,
            game_type: row.game_type_name,
            player_count: row.player_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedScoreItem {
    pub player_id: i64,
    pub display_name: String,
    pub score: i32,
    pub new_handicap: Decimal,
    pub handicap_change: Decimal,
}

impl From<AppliedScore> for RecordedScoreItem {
    fn from(applied: AppliedScore) -> Self {
        Self {
            player_id: applied.player.id,
            display_name: format!("{}, {}", applied.player.last_name, applied.player.first_name),
            score: applied.score,
            new_handicap: applied.change.new_handicap,
            handicap_change: applied.change.delta,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGameResponse {
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub game_type: String,
    pub results: Vec<RecordedScoreItem>,
}

impl From<RecordedGame> for RecordGameResponse {
    fn from(recorded: RecordedGame) -> Self {
        Self {
            game_id: recorded.game.id,
            game_date: recorded.game.game_date,
            game_type: recorded.game_type_name,
            results: recorded.scores.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreItem {
    pub score_id: i64,
    pub game_id: i64,
    pub player_id: i64,
    pub score: i32,
    pub handicap_change: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeItem {
    pub game_type_id: i64,
    pub name: String,
    pub direction: ScoreDirection,
    pub rules: RuleTable,
    pub active: bool,
}

impl From<GameType> for GameTypeItem {
    fn from(game_type: GameType) -> Self {
        Self {
            game_type_id: game_type.id,
            name: game_type.name,
            direction: game_type.rules.direction(),
            rules: game_type.rules,
            active: game_type.active,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeItem {
    pub label: String,
    pub lower: Option<Decimal>,
    pub upper: Option<Decimal>,
    pub players: Vec<PlayerListItem>,
}

impl From<GradeBucket<Player>> for GradeItem {
    fn from(bucket: GradeBucket<Player>) -> Self {
        Self {
            label: bucket.label,
            lower: bucket.lower,
            upper: bucket.upper,
            players: bucket.players.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct GradeConfigResponse {
    pub boundaries: Vec<Decimal>,
}
