use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{decimal_column, GameScore, ScoreHistoryRow};

pub fn insert_score(
    conn: &Connection,
    game_id: i64,
    player_id: i64,
    score: i32,
    handicap_change: Decimal,
) -> Result<GameScore> {
    let sql = "INSERT INTO game_scores (game_id, player_id, score, handicap_change) VALUES (?1, ?2, ?3, ?4) RETURNING id, game_id, player_id, score, handicap_change";

    conn.query_row(
        sql,
        params![game_id, player_id, score, handicap_change.to_string()],
        parse_score_row,
    )
    .with_context(|| format!("Failed to insert score for player {}", player_id))
}

/// Corrects the recorded score only; the handicap change stays as recorded.
pub fn update_score(conn: &Connection, id: i64, score: i32) -> Result<Option<GameScore>> {
    let sql = "UPDATE game_scores SET score = ?1 WHERE id = ?2 RETURNING id, game_id, player_id, score, handicap_change";

    conn.query_row(sql, params![score, id], parse_score_row)
        .optional()
        .context("Failed to update score")
}

fn parse_score_row(row: &rusqlite::Row) -> rusqlite::Result<GameScore> {
    Ok(GameScore {
        id: row.get(0)?,
        game_id: row.get(1)?,
        player_id: row.get(2)?,
        score: row.get(3)?,
        handicap_change: decimal_column(row, 4)?,
    })
}

pub fn list_by_game(conn: &Connection, game_id: i64) -> Result<Vec<GameScore>> {
    let sql = "SELECT id, game_id, player_id, score, handicap_change FROM game_scores WHERE game_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![game_id], parse_score_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// A player's scores, most recent game first.
pub fn history_for_player(conn: &Connection, player_id: i64) -> Result<Vec<ScoreHistoryRow>> {
    let sql = "
        SELECT
            s.id,
            g.id,
            g.game_date,
            t.name,
            s.score,
            s.handicap_change
        FROM game_scores s
        JOIN games g ON s.game_id = g.id
        JOIN game_types t ON g.game_type_id = t.id
        WHERE s.player_id = ?1
        ORDER BY g.game_date DESC, g.id DESC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id], |row| {
            Ok(ScoreHistoryRow {
                score_id: row.get(0)?,
                game_id: row.get(1)?,
                game_date: row.get(2)?,
                game_type_name: row.get(3)?,
                score: row.get(4)?,
                handicap_change: decimal_column(row, 5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
