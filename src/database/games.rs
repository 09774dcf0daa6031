use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::models::{Game, GameSummaryRow};

pub fn insert_game(conn: &Connection, game_date: NaiveDate, game_type_id: i64) -> Result<Game> {
    let sql = "INSERT INTO games (game_date, game_type_id) VALUES (?1, ?2) RETURNING id, game_date, game_type_id, created_at";

    conn.query_row(sql, params![game_date, game_type_id], parse_game_row)
        .context("Failed to insert game")
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        game_date: row.get(1)?,
        game_type_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Every game, newest first, with its type and how many players scored.
pub fn list_summaries(conn: &Connection) -> Result<Vec<GameSummaryRow>> {
    let sql = "
        SELECT
            g.id,
            g.game_date,
            t.name,
            COUNT(s.id) as player_count
        FROM games g
        JOIN game_types t ON g.game_type_id = t.id
        LEFT JOIN game_scores s ON s.game_id = g.id
        GROUP BY g.id, g.game_date, t.name
        ORDER BY g.game_date DESC, g.id DESC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(GameSummaryRow {
                id: row.get(0)?,
                game_date: row.get(1)?,
                game_type_name: row.get(2)?,
                player_count: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
